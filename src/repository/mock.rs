//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::cliente::{Cliente, NewCliente, UpdateCliente};
use crate::domain::types::{Dni, VehiculoId};
use crate::domain::vehiculo::{NewVehiculo, UpdateVehiculo, Vehiculo};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ClienteReader, ClienteWriter, VehiculoListQuery, VehiculoReader, VehiculoWriter,
};

mock! {
    pub Repository {}

    impl ClienteReader for Repository {
        fn get_cliente_by_dni(&self, dni: &Dni) -> RepositoryResult<Option<Cliente>>;
        fn list_clientes(&self) -> RepositoryResult<Vec<Cliente>>;
    }

    impl ClienteWriter for Repository {
        fn create_cliente(&self, new_cliente: &NewCliente) -> RepositoryResult<Cliente>;
        fn update_cliente(&self, dni: &Dni, updates: &UpdateCliente) -> RepositoryResult<Cliente>;
        fn update_cliente_imagen(&self, dni: &Dni, imagen: &str) -> RepositoryResult<Cliente>;
        fn delete_cliente(&self, dni: &Dni) -> RepositoryResult<()>;
    }

    impl VehiculoReader for Repository {
        fn get_vehiculo_by_id(&self, id: VehiculoId) -> RepositoryResult<Option<Vehiculo>>;
        fn list_vehiculos(
            &self,
            query: VehiculoListQuery,
        ) -> RepositoryResult<(usize, Vec<Vehiculo>)>;
    }

    impl VehiculoWriter for Repository {
        fn create_vehiculo(&self, new_vehiculo: &NewVehiculo) -> RepositoryResult<Vehiculo>;
        fn update_vehiculo(
            &self,
            id: VehiculoId,
            updates: &UpdateVehiculo,
        ) -> RepositoryResult<Vehiculo>;
        fn update_vehiculo_imagen(&self, id: VehiculoId, imagen: &str) -> RepositoryResult<Vehiculo>;
        fn delete_vehiculo(&self, id: VehiculoId) -> RepositoryResult<()>;
    }
}
