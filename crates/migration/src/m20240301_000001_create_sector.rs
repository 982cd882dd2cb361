//! Create `sector` table.
//!
//! Lookup of business sectors a company belongs to.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sector::Table)
                    .if_not_exists()
                    .col(uuid(Sector::Id).primary_key())
                    .col(string_len(Sector::Name, 128).unique_key())
                    .col(string_len(Sector::Status, 16))
                    .col(timestamp_with_time_zone(Sector::CreatedAt))
                    .col(timestamp_with_time_zone_null(Sector::UpdatedAt))
                    .col(timestamp_with_time_zone_null(Sector::DeletedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Sector::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Sector { Table, Id, Name, Status, CreatedAt, UpdatedAt, DeletedAt }
