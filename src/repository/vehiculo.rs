use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::types::VehiculoId;
use crate::domain::vehiculo::{NewVehiculo, UpdateVehiculo, Vehiculo, VehiculoFilter};
use crate::models::vehiculo::{
    NewVehiculo as DbNewVehiculo, UpdateVehiculo as DbUpdateVehiculo, Vehiculo as DbVehiculo,
};
use crate::pagination::SortDirection;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, VehiculoListQuery, VehiculoReader, VehiculoSortField, VehiculoWriter,
};
use crate::schema::vehiculos;

type BoxedVehiculos<'a> = vehiculos::BoxedQuery<'a, Sqlite>;

/// Narrows the base query by every filter that is present.
fn filtered(filter: &VehiculoFilter) -> BoxedVehiculos<'_> {
    let mut items = vehiculos::table.into_boxed::<Sqlite>();

    if let Some(marca) = &filter.marca {
        items = items.filter(vehiculos::marca.eq(marca.as_str()));
    }
    if let Some(categoria) = &filter.categoria {
        items = items.filter(vehiculos::categoria.eq(categoria.as_str()));
    }
    if let Some(modelo) = &filter.modelo {
        items = items.filter(vehiculos::modelo.eq(modelo.as_str()));
    }
    if let Some(min_year) = filter.min_year {
        items = items.filter(vehiculos::year.ge(min_year));
    }
    if let Some(is_deleted) = filter.is_deleted {
        items = items.filter(vehiculos::is_deleted.eq(is_deleted));
    }
    if let Some(km_max) = filter.km_max {
        items = items.filter(vehiculos::km.le(km_max));
    }
    if let Some(precio_max) = filter.precio_max {
        items = items.filter(vehiculos::precio.le(precio_max));
    }
    if let Some(stock_min) = filter.stock_min {
        items = items.filter(vehiculos::stock.ge(stock_min));
    }

    items
}

/// Orders by the requested column, breaking ties by id so pages are stable.
fn sorted(
    items: BoxedVehiculos<'_>,
    sort_by: VehiculoSortField,
    direction: SortDirection,
) -> BoxedVehiculos<'_> {
    macro_rules! order_by {
        ($column:expr) => {
            match direction {
                SortDirection::Asc => items.order($column.asc()),
                SortDirection::Desc => items.order($column.desc()),
            }
        };
    }

    let items = match sort_by {
        VehiculoSortField::Id => return order_by!(vehiculos::id),
        VehiculoSortField::Marca => order_by!(vehiculos::marca),
        VehiculoSortField::Categoria => order_by!(vehiculos::categoria),
        VehiculoSortField::Modelo => order_by!(vehiculos::modelo),
        VehiculoSortField::Year => order_by!(vehiculos::year),
        VehiculoSortField::Km => order_by!(vehiculos::km),
        VehiculoSortField::Precio => order_by!(vehiculos::precio),
        VehiculoSortField::Stock => order_by!(vehiculos::stock),
        VehiculoSortField::IsDeleted => order_by!(vehiculos::is_deleted),
        VehiculoSortField::CreatedAt => order_by!(vehiculos::created_at),
        VehiculoSortField::UpdatedAt => order_by!(vehiculos::updated_at),
    };

    items.then_order_by(vehiculos::id.asc())
}

fn into_domain(rows: Vec<DbVehiculo>) -> RepositoryResult<Vec<Vehiculo>> {
    rows.into_iter()
        .map(|row| Vehiculo::try_from(row).map_err(RepositoryError::from))
        .collect()
}

impl VehiculoReader for DieselRepository {
    fn get_vehiculo_by_id(&self, id: VehiculoId) -> RepositoryResult<Option<Vehiculo>> {
        let mut conn = self.conn()?;

        let vehiculo = vehiculos::table
            .find(id.to_string())
            .first::<DbVehiculo>(&mut conn)
            .optional()?;

        Ok(vehiculo.map(Vehiculo::try_from).transpose()?)
    }

    fn list_vehiculos(&self, query: VehiculoListQuery) -> RepositoryResult<(usize, Vec<Vehiculo>)> {
        let mut conn = self.conn()?;

        // Count before applying pagination.
        let total = filtered(&query.filter)
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items = sorted(filtered(&query.filter), query.sort_by, query.direction);
        if let Some(page) = &query.pagination {
            items = items.offset(page.offset()).limit(page.limit());
        }

        let rows = items.load::<DbVehiculo>(&mut conn)?;

        Ok((total, into_domain(rows)?))
    }
}

impl VehiculoWriter for DieselRepository {
    fn create_vehiculo(&self, new_vehiculo: &NewVehiculo) -> RepositoryResult<Vehiculo> {
        let mut conn = self.conn()?;
        let insertable = DbNewVehiculo::from_domain(new_vehiculo, Utc::now().naive_utc());

        let created = diesel::insert_into(vehiculos::table)
            .values(&insertable)
            .get_result::<DbVehiculo>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_vehiculo(
        &self,
        id: VehiculoId,
        updates: &UpdateVehiculo,
    ) -> RepositoryResult<Vehiculo> {
        let mut conn = self.conn()?;
        let changes = DbUpdateVehiculo::from_domain(updates, Utc::now().naive_utc());

        let updated = diesel::update(vehiculos::table.find(id.to_string()))
            .set(&changes)
            .get_result::<DbVehiculo>(&mut conn)?;

        Ok(updated.try_into()?)
    }

    fn update_vehiculo_imagen(&self, id: VehiculoId, imagen: &str) -> RepositoryResult<Vehiculo> {
        let mut conn = self.conn()?;

        let updated = diesel::update(vehiculos::table.find(id.to_string()))
            .set((
                vehiculos::imagen.eq(imagen),
                vehiculos::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbVehiculo>(&mut conn)?;

        Ok(updated.try_into()?)
    }

    fn delete_vehiculo(&self, id: VehiculoId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected = diesel::update(vehiculos::table.find(id.to_string()))
            .set((
                vehiculos::is_deleted.eq(true),
                vehiculos::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
