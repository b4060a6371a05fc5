use chrono::Utc;
use diesel::prelude::*;

use crate::domain::cliente::{Cliente, NewCliente, UpdateCliente};
use crate::domain::types::Dni;
use crate::models::cliente::{
    Cliente as DbCliente, NewCliente as DbNewCliente, UpdateCliente as DbUpdateCliente,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ClienteReader, ClienteWriter, DieselRepository};
use crate::schema::clientes;

impl ClienteReader for DieselRepository {
    fn get_cliente_by_dni(&self, dni: &Dni) -> RepositoryResult<Option<Cliente>> {
        let mut conn = self.conn()?;

        let cliente = clientes::table
            .find(dni.as_str())
            .first::<DbCliente>(&mut conn)
            .optional()?;

        Ok(cliente.map(Cliente::try_from).transpose()?)
    }

    fn list_clientes(&self) -> RepositoryResult<Vec<Cliente>> {
        let mut conn = self.conn()?;

        let rows = clientes::table
            .order(clientes::dni.asc())
            .load::<DbCliente>(&mut conn)?;

        rows.into_iter()
            .map(|row| Cliente::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl ClienteWriter for DieselRepository {
    fn create_cliente(&self, new_cliente: &NewCliente) -> RepositoryResult<Cliente> {
        let mut conn = self.conn()?;
        let insertable = DbNewCliente::from_domain(new_cliente, Utc::now().naive_utc());

        let created = diesel::insert_into(clientes::table)
            .values(&insertable)
            .get_result::<DbCliente>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_cliente(&self, dni: &Dni, updates: &UpdateCliente) -> RepositoryResult<Cliente> {
        let mut conn = self.conn()?;
        let changes = DbUpdateCliente::from_domain(updates, Utc::now().naive_utc());

        let updated = diesel::update(clientes::table.find(dni.as_str()))
            .set(&changes)
            .get_result::<DbCliente>(&mut conn)?;

        Ok(updated.try_into()?)
    }

    fn update_cliente_imagen(&self, dni: &Dni, imagen: &str) -> RepositoryResult<Cliente> {
        let mut conn = self.conn()?;

        let updated = diesel::update(clientes::table.find(dni.as_str()))
            .set((
                clientes::imagen.eq(imagen),
                clientes::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbCliente>(&mut conn)?;

        Ok(updated.try_into()?)
    }

    fn delete_cliente(&self, dni: &Dni) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(clientes::table.find(dni.as_str())).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
