use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::EntityTrait;
use std::str::FromStr;

use super::{seed_company, setup_test_db};
use crate::enums::{LeaveType, PaymentStatus, Role, Status};
use crate::errors::ModelError;
use crate::{app_user, cash_advance, company, leave, sector, user_credentials, user_role};

fn profile(name: &str) -> app_user::Profile {
    app_user::Profile { name: name.into(), surname: "Yilmaz".into(), ..Default::default() }
}

#[tokio::test]
async fn sector_create_list_soft_delete() -> Result<()> {
    let db = setup_test_db().await?;
    let a = sector::create(&db, "Logistics").await?;
    let _b = sector::create(&db, "Banking").await?;

    let names: Vec<String> = sector::list_visible(&db).await?.into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["Banking".to_string(), "Logistics".to_string()]);

    assert!(sector::soft_delete(&db, a.id).await?);
    let visible = sector::list_visible(&db).await?;
    assert_eq!(visible.len(), 1);

    // row remains, marked deleted
    let row = sector::Entity::find_by_id(a.id).one(&db).await?.unwrap();
    assert_eq!(row.status, Status::Deleted);
    assert!(row.deleted_at.is_some());

    assert!(!sector::soft_delete(&db, uuid::Uuid::new_v4()).await?);
    Ok(())
}

#[tokio::test]
async fn sector_rejects_blank_name() -> Result<()> {
    let db = setup_test_db().await?;
    let err = sector::create(&db, "  ").await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
    Ok(())
}

#[tokio::test]
async fn company_validation() -> Result<()> {
    let db = setup_test_db().await?;
    let s = sector::create(&db, "Retail").await?;
    let bad = company::CompanyFields {
        name: "Shop".into(),
        email: "shop@retail.com".into(),
        phone_number: "abc".into(),
        sector_id: s.id,
        number_of_employees: 3,
    };
    assert!(company::create(&db, bad.clone(), Status::Active).await.is_err());
    let negative = company::CompanyFields { phone_number: "0212 555 01 01".into(), number_of_employees: -1, ..bad };
    assert!(company::create(&db, negative, Status::Active).await.is_err());
    Ok(())
}

#[tokio::test]
async fn app_user_roles_and_credentials() -> Result<()> {
    let db = setup_test_db().await?;
    let (_s, c) = seed_company(&db, Status::Active).await?;

    let u = app_user::create(&db, "Ayse@Acme.com", profile("Ayse"), Some(c.id), Status::Active).await?;
    assert_eq!(u.user_name, "ayse@acme.com");
    assert_eq!(u.full_name(), "Ayse Yilmaz");

    let found = app_user::find_by_user_name(&db, "AYSE@acme.com").await?.unwrap();
    assert_eq!(found.id, u.id);

    // user_name is unique
    assert!(app_user::create(&db, "ayse@acme.com", profile("Other"), Some(c.id), Status::Active).await.is_err());

    user_role::assign(&db, u.id, Role::CompanyAdministrator).await?;
    user_role::assign(&db, u.id, Role::CompanyAdministrator).await?;
    user_role::assign(&db, u.id, Role::Employee).await?;
    let mut roles = user_role::roles_of(&db, u.id).await?;
    roles.sort_by_key(|r| r.display_name());
    assert_eq!(roles, vec![Role::CompanyAdministrator, Role::Employee]);

    let first = user_credentials::upsert_password(&db, u.id, "hash-1".into(), "argon2").await?;
    let second = user_credentials::upsert_password(&db, u.id, "hash-2".into(), "argon2").await?;
    assert_eq!(first.id, second.id);
    assert_eq!(user_credentials::find_by_user(&db, u.id).await?.unwrap().password_hash, "hash-2");
    Ok(())
}

#[tokio::test]
async fn leave_is_created_passive_with_weekday_count() -> Result<()> {
    let db = setup_test_db().await?;
    let (_s, c) = seed_company(&db, Status::Active).await?;
    let u = app_user::create(&db, "emp@acme.com", profile("Emre"), Some(c.id), Status::Active).await?;

    let l = leave::create(
        &db,
        leave::NewLeave {
            leave_type: LeaveType::Annual,
            description: Some("  ".into()),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
            app_user_id: u.id,
            company_id: c.id,
        },
    )
    .await?;
    assert_eq!(l.status, Status::Passive);
    assert_eq!(l.number_of_days, 6);
    assert_eq!(l.description, None);

    assert!(leave::soft_delete(&db, l.id).await?);
    assert_eq!(leave::Entity::find_by_id(l.id).one(&db).await?.unwrap().status, Status::Deleted);
    Ok(())
}

#[tokio::test]
async fn cash_advance_is_created_pending() -> Result<()> {
    let db = setup_test_db().await?;
    let (_s, c) = seed_company(&db, Status::Active).await?;
    let u = app_user::create(&db, "emp@acme.com", profile("Emre"), Some(c.id), Status::Active).await?;

    let ca = cash_advance::create(
        &db,
        cash_advance::NewCashAdvance {
            description: "Rent deposit".into(),
            requested_amount: Decimal::from_str("1500.50")?,
            final_date_request: Some(Utc::now().date_naive() + Duration::days(7)),
            advance_to_id: u.id,
            company_id: c.id,
        },
    )
    .await?;
    assert_eq!(ca.status, Status::Passive);
    assert_eq!(ca.is_payment_processed, PaymentStatus::Pending);
    assert_eq!(ca.requested_amount, Decimal::from_str("1500.5")?);

    let past = cash_advance::NewCashAdvance {
        description: "Late".into(),
        requested_amount: Decimal::from(10),
        final_date_request: Some(Utc::now().date_naive() - Duration::days(1)),
        advance_to_id: u.id,
        company_id: c.id,
    };
    assert!(matches!(cash_advance::create(&db, past).await, Err(ModelError::Validation(_))));
    Ok(())
}
