//! Create `leave` table.
//!
//! A leave is requested by an employee and answered by a director of the same company.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Leave::Table)
                    .if_not_exists()
                    .col(uuid(Leave::Id).primary_key())
                    .col(string_len(Leave::LeaveType, 16))
                    .col(string_len_null(Leave::Description, 1024))
                    .col(date(Leave::StartDate))
                    .col(date(Leave::EndDate))
                    .col(integer(Leave::NumberOfDays))
                    .col(uuid(Leave::AppUserId))
                    .col(uuid(Leave::CompanyId))
                    .col(uuid_null(Leave::DirectorId))
                    .col(timestamp_with_time_zone_null(Leave::ReplyDate))
                    .col(string_len(Leave::Status, 16))
                    .col(timestamp_with_time_zone(Leave::CreatedAt))
                    .col(timestamp_with_time_zone_null(Leave::UpdatedAt))
                    .col(timestamp_with_time_zone_null(Leave::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leave_app_user")
                            .from(Leave::Table, Leave::AppUserId)
                            .to(AppUser::Table, AppUser::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leave_company")
                            .from(Leave::Table, Leave::CompanyId)
                            .to(Company::Table, Company::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leave_director")
                            .from(Leave::Table, Leave::DirectorId)
                            .to(AppUser::Table, AppUser::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Leave::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Leave {
    Table,
    Id,
    LeaveType,
    Description,
    StartDate,
    EndDate,
    NumberOfDays,
    AppUserId,
    CompanyId,
    DirectorId,
    ReplyDate,
    Status,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum AppUser { Table, Id }

#[derive(DeriveIden)]
enum Company { Table, Id }
