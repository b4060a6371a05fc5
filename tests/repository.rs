use std::collections::HashSet;

use madmotor_api::domain::cliente::{NewCliente, UpdateCliente};
use madmotor_api::domain::types::{
    Apellido, Categoria, ClienteEmail, CodigoPostal, Direccion, Dni, Marca, Modelo, Nombre,
    PhoneNumber, VehiculoId,
};
use madmotor_api::domain::vehiculo::{NewVehiculo, UpdateVehiculo, VehiculoFilter};
use madmotor_api::pagination::SortDirection;
use madmotor_api::repository::errors::RepositoryError;
use madmotor_api::repository::{
    ClienteReader, ClienteWriter, DieselRepository, VehiculoListQuery, VehiculoReader,
    VehiculoSortField, VehiculoWriter,
};

mod common;

fn new_cliente(dni: &str, nombre: &str) -> NewCliente {
    NewCliente {
        dni: Dni::new(dni).unwrap(),
        nombre: Nombre::new(nombre).unwrap(),
        apellido: Apellido::new("García").unwrap(),
        direccion: Direccion::new("Calle Mayor 1").unwrap(),
        codigo_postal: CodigoPostal::new("28013").unwrap(),
        telefono: PhoneNumber::new("612345678").unwrap(),
        correo: ClienteEmail::new(format!("{}@example.com", nombre.to_lowercase())).unwrap(),
        imagen: None,
    }
}

fn new_vehiculo(marca: &str, categoria: &str, year: i32, km: f64, precio: f64, stock: i32) -> NewVehiculo {
    NewVehiculo {
        id: VehiculoId::new(),
        marca: Marca::new(marca).unwrap(),
        categoria: Categoria::new(categoria).unwrap(),
        modelo: Modelo::new(format!("{marca} {year}")).unwrap(),
        year,
        km,
        precio,
        stock,
        imagen: None,
    }
}

fn seed_vehiculos(repo: &DieselRepository) -> Vec<VehiculoId> {
    [
        new_vehiculo("Seat", "Familiar", 2018, 90000.0, 9000.0, 1),
        new_vehiculo("Seat", "Deportivo", 2021, 15000.0, 21000.0, 3),
        new_vehiculo("Toyota", "Familiar", 2020, 40000.0, 16000.0, 0),
        new_vehiculo("Toyota", "SUV", 2023, 5000.0, 35000.0, 7),
        new_vehiculo("Renault", "Familiar", 2015, 150000.0, 4000.0, 2),
    ]
    .iter()
    .map(|v| repo.create_vehiculo(v).unwrap().id)
    .collect()
}

#[test]
fn test_cliente_repository_crud() {
    let test_db = common::TestDb::new("test_cliente_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let ana = repo.create_cliente(&new_cliente("12345678Z", "Ana")).unwrap();
    repo.create_cliente(&new_cliente("00000000T", "Pablo")).unwrap();
    assert_eq!(ana.telefono, "+34612345678");
    assert_eq!(ana.created_at, ana.updated_at);

    let all = repo.list_clientes().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].dni.as_str(), "00000000T");

    let updates = UpdateCliente {
        nombre: Some(Nombre::new("Ana María").unwrap()),
        ..Default::default()
    };
    let updated = repo.update_cliente(&ana.dni, &updates).unwrap();
    assert_eq!(updated.nombre, "Ana María");
    assert_eq!(updated.apellido, "García");

    let with_image = repo
        .update_cliente_imagen(&ana.dni, "/files/ana.png")
        .unwrap();
    assert_eq!(with_image.imagen.as_deref(), Some("/files/ana.png"));

    repo.delete_cliente(&ana.dni).unwrap();
    assert!(repo.get_cliente_by_dni(&ana.dni).unwrap().is_none());
    assert!(matches!(
        repo.delete_cliente(&ana.dni),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_cliente_duplicate_dni_is_constraint_violation() {
    let test_db = common::TestDb::new("test_cliente_duplicate_dni.db");
    let repo = DieselRepository::new(test_db.pool());

    repo.create_cliente(&new_cliente("12345678Z", "Ana")).unwrap();
    let result = repo.create_cliente(&new_cliente("12345678Z", "Otra"));

    assert!(matches!(
        result,
        Err(RepositoryError::ConstraintViolation(_))
    ));
}

#[test]
fn test_update_missing_cliente_is_not_found() {
    let test_db = common::TestDb::new("test_update_missing_cliente.db");
    let repo = DieselRepository::new(test_db.pool());
    let updates = UpdateCliente {
        nombre: Some(Nombre::new("Nadie").unwrap()),
        ..Default::default()
    };

    let result = repo.update_cliente(&Dni::new("87654321X").unwrap(), &updates);

    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[test]
fn test_vehiculo_repository_crud_and_soft_delete() {
    let test_db = common::TestDb::new("test_vehiculo_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let created = repo
        .create_vehiculo(&new_vehiculo("Seat", "Familiar", 2021, 15000.0, 18500.0, 4))
        .unwrap();
    assert!(!created.is_deleted);

    let fetched = repo.get_vehiculo_by_id(created.id).unwrap().unwrap();
    assert_eq!(fetched, created);

    let updates = UpdateVehiculo {
        precio: Some(17000.0),
        stock: Some(2),
        ..Default::default()
    };
    let updated = repo.update_vehiculo(created.id, &updates).unwrap();
    assert_eq!(updated.precio, 17000.0);
    assert_eq!(updated.stock, 2);
    assert_eq!(updated.marca, "Seat");

    repo.delete_vehiculo(created.id).unwrap();
    let deleted = repo.get_vehiculo_by_id(created.id).unwrap().unwrap();
    assert!(deleted.is_deleted);

    assert!(matches!(
        repo.delete_vehiculo(VehiculoId::new()),
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        repo.update_vehiculo(VehiculoId::new(), &updates),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_vehiculo_filters_are_inclusive_bounds() {
    let test_db = common::TestDb::new("test_vehiculo_filters.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_vehiculos(&repo);

    let list = |filter: VehiculoFilter| repo.list_vehiculos(VehiculoListQuery::new(filter)).unwrap();

    let (total, items) = list(VehiculoFilter::default());
    assert_eq!(total, 5);
    assert_eq!(items.len(), 5);

    let (total, items) = list(VehiculoFilter {
        min_year: Some(2020),
        ..Default::default()
    });
    assert_eq!(total, 3);
    assert!(items.iter().all(|v| v.year >= 2020));

    let (total, items) = list(VehiculoFilter {
        km_max: Some(40000.0),
        ..Default::default()
    });
    assert_eq!(total, 3);
    assert!(items.iter().all(|v| v.km <= 40000.0));

    let (total, _) = list(VehiculoFilter {
        stock_min: Some(3),
        ..Default::default()
    });
    assert_eq!(total, 2);

    let (total, items) = list(VehiculoFilter {
        marca: Some("Seat".to_string()),
        categoria: Some("Familiar".to_string()),
        ..Default::default()
    });
    assert_eq!(total, 1);
    assert_eq!(items[0].year, 2018);

    let (total, _) = list(VehiculoFilter {
        precio_max: Some(16000.0),
        ..Default::default()
    });
    assert_eq!(total, 3);
}

#[test]
fn test_vehiculo_dropping_a_filter_never_loses_matches() {
    let test_db = common::TestDb::new("test_vehiculo_filter_relaxation.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_vehiculos(&repo);
    let retired = repo
        .create_vehiculo(&new_vehiculo("Seat", "Deportivo", 2021, 12000.0, 20000.0, 5))
        .unwrap();
    repo.delete_vehiculo(retired.id).unwrap();

    let ids = |filter: &VehiculoFilter| -> HashSet<VehiculoId> {
        let (total, items) = repo
            .list_vehiculos(VehiculoListQuery::new(filter.clone()))
            .unwrap();
        assert_eq!(total, items.len());
        items.into_iter().map(|v| v.id).collect()
    };

    let strict = VehiculoFilter {
        marca: Some("Seat".to_string()),
        categoria: Some("Deportivo".to_string()),
        modelo: Some("Seat 2021".to_string()),
        min_year: Some(2021),
        is_deleted: Some(false),
        km_max: Some(15000.0),
        precio_max: Some(21000.0),
        stock_min: Some(3),
    };
    let matched = ids(&strict);
    assert_eq!(matched.len(), 1);

    let relaxations = [
        VehiculoFilter { marca: None, ..strict.clone() },
        VehiculoFilter { categoria: None, ..strict.clone() },
        VehiculoFilter { modelo: None, ..strict.clone() },
        VehiculoFilter { min_year: None, ..strict.clone() },
        VehiculoFilter { is_deleted: None, ..strict.clone() },
        VehiculoFilter { km_max: None, ..strict.clone() },
        VehiculoFilter { precio_max: None, ..strict.clone() },
        VehiculoFilter { stock_min: None, ..strict.clone() },
    ];
    for relaxed in &relaxations {
        assert!(matched.is_subset(&ids(relaxed)), "{relaxed:?}");
    }

    let without_flag = ids(&relaxations[4]);
    assert!(without_flag.contains(&retired.id));
    assert!(matched.is_subset(&ids(&VehiculoFilter::default())));
}

#[test]
fn test_vehiculo_is_deleted_filter() {
    let test_db = common::TestDb::new("test_vehiculo_is_deleted_filter.db");
    let repo = DieselRepository::new(test_db.pool());
    let ids = seed_vehiculos(&repo);
    repo.delete_vehiculo(ids[0]).unwrap();

    let query = |flag| {
        VehiculoListQuery::new(VehiculoFilter {
            is_deleted: Some(flag),
            ..Default::default()
        })
    };

    let (deleted, items) = repo.list_vehiculos(query(true)).unwrap();
    assert_eq!(deleted, 1);
    assert_eq!(items[0].id, ids[0]);

    let (active, _) = repo.list_vehiculos(query(false)).unwrap();
    assert_eq!(active, 4);
}

#[test]
fn test_vehiculo_sorting_and_paging() {
    let test_db = common::TestDb::new("test_vehiculo_sorting_and_paging.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_vehiculos(&repo);

    let (total, first_page) = repo
        .list_vehiculos(
            VehiculoListQuery::new(VehiculoFilter::default())
                .sort(VehiculoSortField::Precio, SortDirection::Desc)
                .paginate(0, 2),
        )
        .unwrap();
    assert_eq!(total, 5);
    let precios: Vec<f64> = first_page.iter().map(|v| v.precio).collect();
    assert_eq!(precios, vec![35000.0, 21000.0]);

    let (_, last_page) = repo
        .list_vehiculos(
            VehiculoListQuery::new(VehiculoFilter::default())
                .sort(VehiculoSortField::Precio, SortDirection::Desc)
                .paginate(2, 2),
        )
        .unwrap();
    assert_eq!(last_page.len(), 1);
    assert_eq!(last_page[0].precio, 4000.0);

    let (_, ascending) = repo
        .list_vehiculos(
            VehiculoListQuery::new(VehiculoFilter::default())
                .sort(VehiculoSortField::Year, SortDirection::Asc),
        )
        .unwrap();
    let years: Vec<i32> = ascending.iter().map(|v| v.year).collect();
    assert_eq!(years, vec![2015, 2018, 2020, 2021, 2023]);

    let (_, beyond) = repo
        .list_vehiculos(VehiculoListQuery::new(VehiculoFilter::default()).paginate(9, 10))
        .unwrap();
    assert!(beyond.is_empty());
}
