//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_categories;
mod m20240301_000002_create_dealers;
mod m20240301_000003_create_cars;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_categories::Migration),
            Box::new(m20240301_000002_create_dealers::Migration),
            Box::new(m20240301_000003_create_cars::Migration),
        ]
    }
}
