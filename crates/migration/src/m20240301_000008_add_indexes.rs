use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // AppUser: lookups by company and by lifecycle status (registrations list)
        manager
            .create_index(
                Index::create()
                    .name("idx_app_user_company")
                    .table(AppUser::Table)
                    .col(AppUser::CompanyId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_app_user_status")
                    .table(AppUser::Table)
                    .col(AppUser::Status)
                    .to_owned(),
            )
            .await?;

        // UserRole: one row per (user, role)
        manager
            .create_index(
                Index::create()
                    .name("uniq_user_role_user_role")
                    .table(UserRole::Table)
                    .col(UserRole::UserId)
                    .col(UserRole::Role)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Leave / CashAdvance: company request queues
        manager
            .create_index(
                Index::create()
                    .name("idx_leave_company_status")
                    .table(Leave::Table)
                    .col(Leave::CompanyId)
                    .col(Leave::Status)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_cash_advance_company_status")
                    .table(CashAdvance::Table)
                    .col(CashAdvance::CompanyId)
                    .col(CashAdvance::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_app_user_company").table(AppUser::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_app_user_status").table(AppUser::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_user_role_user_role").table(UserRole::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_leave_company_status").table(Leave::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_cash_advance_company_status").table(CashAdvance::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AppUser { Table, CompanyId, Status }

#[derive(DeriveIden)]
enum UserRole { Table, UserId, Role }

#[derive(DeriveIden)]
enum Leave { Table, CompanyId, Status }

#[derive(DeriveIden)]
enum CashAdvance { Table, CompanyId, Status }
