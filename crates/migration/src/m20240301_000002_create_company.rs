//! Create `company` table with FK to `sector`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Company::Table)
                    .if_not_exists()
                    .col(uuid(Company::Id).primary_key())
                    .col(string_len(Company::Name, 128))
                    .col(string_len(Company::Email, 255))
                    .col(string_len(Company::PhoneNumber, 32))
                    .col(uuid(Company::SectorId))
                    .col(integer(Company::NumberOfEmployees))
                    .col(string_len(Company::Status, 16))
                    .col(timestamp_with_time_zone(Company::CreatedAt))
                    .col(timestamp_with_time_zone_null(Company::UpdatedAt))
                    .col(timestamp_with_time_zone_null(Company::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_company_sector")
                            .from(Company::Table, Company::SectorId)
                            .to(Sector::Table, Sector::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Company::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Company { Table, Id, Name, Email, PhoneNumber, SectorId, NumberOfEmployees, Status, CreatedAt, UpdatedAt, DeletedAt }

#[derive(DeriveIden)]
enum Sector { Table, Id }
