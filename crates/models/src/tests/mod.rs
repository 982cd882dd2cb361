/// Entity CRUD and soft-delete lifecycle tests
pub mod crud_tests;


use sea_orm::DatabaseConnection;

use crate::{company, db, enums::Status, sector};

/// Fresh migrated database for one test.
pub(crate) async fn setup_test_db() -> anyhow::Result<DatabaseConnection> {
    db::connect_migrated(&db::test_database_url()).await
}

pub(crate) async fn seed_company(db: &DatabaseConnection, status: Status) -> anyhow::Result<(sector::Model, company::Model)> {
    let s = sector::create(db, &format!("Sector {}", uuid::Uuid::new_v4())).await?;
    let c = company::create(
        db,
        company::CompanyFields {
            name: "Acme Ltd".into(),
            email: format!("info+{}@acme.com", uuid::Uuid::new_v4().simple()),
            phone_number: "+90 212 555 0101".into(),
            sector_id: s.id,
            number_of_employees: 12,
        },
        status,
    )
    .await?;
    Ok((s, c))
}
