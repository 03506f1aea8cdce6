//! `SeaORM` migrations for the service schema.
//!
//! The bundled migrator lets the service bootstrap an empty database; the
//! admin collaborator owns the schema thereafter.

pub use sea_orm_migration::prelude::*;

mod m20250806_000001_create_hosts_and_update_rules;

/// Migration entrypoint used by `sea_orm_migration::MigratorTrait`.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(
            m20250806_000001_create_hosts_and_update_rules::Migration,
        )]
    }
}
