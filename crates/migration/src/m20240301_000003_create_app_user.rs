//! Create `app_user` table with optional FK to `company`.
//!
//! Site administrators have no company; everyone else belongs to one.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AppUser::Table)
                    .if_not_exists()
                    .col(uuid(AppUser::Id).primary_key())
                    .col(string_len(AppUser::UserName, 255).unique_key())
                    .col(string_len(AppUser::Email, 255))
                    .col(string_len(AppUser::Name, 128))
                    .col(string_len_null(AppUser::SecondName, 128))
                    .col(string_len(AppUser::Surname, 128))
                    .col(string_len_null(AppUser::Title, 128))
                    .col(string_len_null(AppUser::BloodGroup, 16))
                    .col(string_len_null(AppUser::Profession, 128))
                    .col(date_null(AppUser::BirthDate))
                    .col(string_len_null(AppUser::IdentityId, 32))
                    .col(string_len_null(AppUser::ImagePath, 512))
                    .col(uuid_null(AppUser::CompanyId))
                    .col(string_len(AppUser::Status, 16))
                    .col(timestamp_with_time_zone(AppUser::CreatedAt))
                    .col(timestamp_with_time_zone_null(AppUser::UpdatedAt))
                    .col(timestamp_with_time_zone_null(AppUser::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_app_user_company")
                            .from(AppUser::Table, AppUser::CompanyId)
                            .to(Company::Table, Company::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(AppUser::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum AppUser {
    Table,
    Id,
    UserName,
    Email,
    Name,
    SecondName,
    Surname,
    Title,
    BloodGroup,
    Profession,
    BirthDate,
    IdentityId,
    ImagePath,
    CompanyId,
    Status,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Company { Table, Id }
