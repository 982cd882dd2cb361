//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_sector;
mod m20240301_000002_create_company;
mod m20240301_000003_create_app_user;
mod m20240301_000004_create_user_credentials;
mod m20240301_000005_create_user_role;
mod m20240301_000006_create_leave;
mod m20240301_000007_create_cash_advance;
mod m20240301_000008_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_sector::Migration),
            Box::new(m20240301_000002_create_company::Migration),
            Box::new(m20240301_000003_create_app_user::Migration),
            Box::new(m20240301_000004_create_user_credentials::Migration),
            Box::new(m20240301_000005_create_user_role::Migration),
            Box::new(m20240301_000006_create_leave::Migration),
            Box::new(m20240301_000007_create_cash_advance::Migration),
            // Indexes should always be applied last
            Box::new(m20240301_000008_add_indexes::Migration),
        ]
    }
}
