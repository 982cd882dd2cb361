#![cfg(test)]
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use models::{app_user, company, db, enums::{Role, Status}, sector, user_role};

/// A freshly migrated database per test (in-memory sqlite unless `TEST_DATABASE_URL` is set).
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    db::connect_migrated(&db::test_database_url()).await
}

pub async fn seed_sector(db: &DatabaseConnection) -> anyhow::Result<sector::Model> {
    Ok(sector::create(db, &format!("Sector {}", Uuid::new_v4().simple())).await?)
}

pub async fn seed_company(db: &DatabaseConnection) -> anyhow::Result<company::Model> {
    let s = seed_sector(db).await?;
    let c = company::create(
        db,
        company::CompanyFields {
            name: "Acme Ltd".into(),
            email: "info@acme.com".into(),
            phone_number: "+90 212 555 0101".into(),
            sector_id: s.id,
            number_of_employees: 25,
        },
        Status::Active,
    )
    .await?;
    Ok(c)
}

/// Active user with `role`; the password is not set.
pub async fn seed_user(db: &DatabaseConnection, email: &str, company_id: Option<Uuid>, role: Role) -> anyhow::Result<app_user::Model> {
    let profile = app_user::Profile { name: "Test".into(), surname: "User".into(), ..Default::default() };
    let u = app_user::create(db, email, profile, company_id, Status::Active).await?;
    user_role::assign(db, u.id, role).await?;
    Ok(u)
}
