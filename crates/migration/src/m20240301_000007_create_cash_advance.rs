//! Create `cash_advance` table.
//!
//! Money requested by an employee ahead of payroll; amounts are fixed-point decimals.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CashAdvance::Table)
                    .if_not_exists()
                    .col(uuid(CashAdvance::Id).primary_key())
                    .col(string_len(CashAdvance::Description, 1024))
                    .col(decimal(CashAdvance::RequestedAmount).decimal_len(16, 2))
                    .col(decimal_null(CashAdvance::ApprovedAmount).decimal_len(16, 2))
                    .col(uuid_null(CashAdvance::DirectorId))
                    .col(uuid(CashAdvance::AdvanceToId))
                    .col(uuid(CashAdvance::CompanyId))
                    .col(string_len(CashAdvance::IsPaymentProcessed, 16))
                    .col(date_null(CashAdvance::FinalDateRequest))
                    .col(timestamp_with_time_zone_null(CashAdvance::ReplyDate))
                    .col(string_len(CashAdvance::Status, 16))
                    .col(timestamp_with_time_zone(CashAdvance::CreatedAt))
                    .col(timestamp_with_time_zone_null(CashAdvance::UpdatedAt))
                    .col(timestamp_with_time_zone_null(CashAdvance::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cash_advance_app_user")
                            .from(CashAdvance::Table, CashAdvance::AdvanceToId)
                            .to(AppUser::Table, AppUser::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cash_advance_company")
                            .from(CashAdvance::Table, CashAdvance::CompanyId)
                            .to(Company::Table, Company::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cash_advance_director")
                            .from(CashAdvance::Table, CashAdvance::DirectorId)
                            .to(AppUser::Table, AppUser::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CashAdvance::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum CashAdvance {
    Table,
    Id,
    Description,
    RequestedAmount,
    ApprovedAmount,
    DirectorId,
    AdvanceToId,
    CompanyId,
    IsPaymentProcessed,
    FinalDateRequest,
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
