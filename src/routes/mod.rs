//! HTTP handlers and the response mapping shared by them.

use actix_web::error::{InternalError, JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse};
use serde_json::json;

use crate::forms::FieldErrors;
use crate::services::ServiceError;

pub mod cliente;
pub mod vehiculo;

/// 400 with the field to message map.
pub fn validation_failed(errors: &FieldErrors) -> HttpResponse {
    log::info!("Rejected request: {errors}");
    HttpResponse::BadRequest().json(errors)
}

/// `{"error": message}` with the given status.
pub fn error_body(status: actix_web::http::StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(json!({ "error": message.into() }))
}

/// Maps a service failure to its HTTP response.
///
/// `not_found` is the message returned on 404.
pub fn service_error_response(err: &ServiceError, not_found: &str) -> HttpResponse {
    use actix_web::http::StatusCode;

    match err {
        ServiceError::NotFound => error_body(StatusCode::NOT_FOUND, not_found),
        ServiceError::Conflict(message) => error_body(StatusCode::CONFLICT, message.as_str()),
        ServiceError::TypeConstraint(message) => {
            error_body(StatusCode::BAD_REQUEST, message.as_str())
        }
        ServiceError::Storage(_) | ServiceError::Internal(_) => {
            log::error!("Request failed: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(json!({ "body": err.to_string() }));
    InternalError::from_response(err, response).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(json!({ "query": err.to_string() }));
    InternalError::from_response(err, response).into()
}

pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(json!({ "path": err.to_string() }));
    InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;

    use super::*;

    #[actix_web::test]
    async fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::NotFound, StatusCode::NOT_FOUND),
            (ServiceError::Conflict("dup".into()), StatusCode::CONFLICT),
            (ServiceError::TypeConstraint("bad".into()), StatusCode::BAD_REQUEST),
            (ServiceError::Storage("disk".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (ServiceError::Internal("db".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(service_error_response(&err, "no").status(), status);
        }
    }

    #[actix_web::test]
    async fn not_found_carries_message() {
        let response = service_error_response(&ServiceError::NotFound, "Cliente no encontrado");
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, json!({"error": "Cliente no encontrado"}));
    }
}
