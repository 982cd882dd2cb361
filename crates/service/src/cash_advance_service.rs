use chrono::Utc;
use common::metrics;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::{info, instrument};
use uuid::Uuid;

use models::{app_user, cash_advance, enums::{PaymentStatus, Status}};
use crate::dto::cash_advance::{CashAdvanceCreateDto, CashAdvanceUpdateDto, CashAdvanceVm};
use crate::errors::ServiceError;
use crate::leave_service::{names_of, requester};

async fn to_vms(db: &DatabaseConnection, rows: Vec<cash_advance::Model>) -> Result<Vec<CashAdvanceVm>, ServiceError> {
    let ids: Vec<Uuid> = rows.iter().flat_map(|c| std::iter::once(c.advance_to_id).chain(c.director_id)).collect();
    let names = names_of(db, ids).await?;
    Ok(rows
        .into_iter()
        .map(|c| CashAdvanceVm {
            id: c.id,
            description: c.description,
            requested_amount: c.requested_amount,
            approved_amount: c.approved_amount,
            advance_to_id: c.advance_to_id,
            personal_name: names.get(&c.advance_to_id).cloned().unwrap_or_default(),
            company_id: c.company_id,
            director_id: c.director_id,
            director_name: c.director_id.and_then(|d| names.get(&d).cloned()),
            is_payment_processed: c.is_payment_processed,
            final_date_request: c.final_date_request,
            reply_date: c.reply_date,
            status: c.status,
            created_at: c.created_at,
        })
        .collect())
}

fn first(mut v: Vec<CashAdvanceVm>) -> Result<CashAdvanceVm, ServiceError> {
    v.pop().ok_or_else(|| ServiceError::not_found("cash advance"))
}

async fn find_live(db: &DatabaseConnection, id: Uuid) -> Result<Option<cash_advance::Model>, ServiceError> {
    let found = cash_advance::Entity::find_by_id(id).one(db).await.map_err(ServiceError::db)?;
    Ok(found.filter(|c| c.deleted_at.is_none()))
}

async fn find_pending(db: &DatabaseConnection, id: Uuid) -> Result<cash_advance::Model, ServiceError> {
    let c = find_live(db, id).await?.ok_or_else(|| ServiceError::not_found("cash advance"))?;
    if c.status != Status::Passive || c.is_payment_processed != PaymentStatus::Pending {
        return Err(ServiceError::Validation("cash advance request was already answered".into()));
    }
    Ok(c)
}

/// Request an advance for the signed-in user; payment starts out pending.
#[instrument(skip(db, dto), fields(amount = %dto.requested_amount))]
pub async fn create(db: &DatabaseConnection, dto: CashAdvanceCreateDto, user_name: &str) -> Result<CashAdvanceVm, ServiceError> {
    let (u, company_id) = requester(db, user_name).await?;
    let created = cash_advance::create(
        db,
        cash_advance::NewCashAdvance {
            description: dto.description,
            requested_amount: dto.requested_amount,
            final_date_request: dto.final_date_request,
            advance_to_id: u.id,
            company_id,
        },
    )
    .await?;
    info!(cash_advance_id = %created.id, user_id = %u.id, "cash_advance_requested");
    metrics::record_event("cash_advance_request");
    first(to_vms(db, vec![created]).await?)
}

/// Edit a request that is still pending.
pub async fn update(db: &DatabaseConnection, dto: CashAdvanceUpdateDto) -> Result<CashAdvanceVm, ServiceError> {
    let current = find_pending(db, dto.id).await?;
    cash_advance::validate_description(&dto.description)?;
    cash_advance::validate_amount(dto.requested_amount)?;
    cash_advance::validate_final_date(dto.final_date_request, Utc::now().date_naive())?;
    let mut am: cash_advance::ActiveModel = current.into();
    am.description = Set(dto.description.trim().to_string());
    am.requested_amount = Set(dto.requested_amount.round_dp(2));
    am.final_date_request = Set(dto.final_date_request);
    am.updated_at = Set(Some(Utc::now().into()));
    let updated = am.update(db).await.map_err(ServiceError::db)?;
    first(to_vms(db, vec![updated]).await?)
}

/// Soft-delete a request. Returns `false` when it does not exist.
pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    Ok(cash_advance::soft_delete(db, id).await?)
}

/// Withdraw a request on behalf of its owner. Approved and paid advances stay on record.
pub async fn withdraw(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    let Some(c) = find_live(db, id).await? else { return Ok(false) };
    if matches!(c.is_payment_processed, PaymentStatus::Approved | PaymentStatus::Paid) {
        return Err(ServiceError::Validation("approved cash advance cannot be withdrawn".into()));
    }
    let withdrawn = cash_advance::soft_delete(db, c.id).await?;
    info!(cash_advance_id = %id, "cash_advance_withdrawn");
    Ok(withdrawn)
}

pub async fn get_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<CashAdvanceUpdateDto>, ServiceError> {
    Ok(find_live(db, id).await?.map(CashAdvanceUpdateDto::from))
}

pub async fn get_vm_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<CashAdvanceVm>, ServiceError> {
    match find_live(db, id).await? {
        Some(c) => Ok(Some(first(to_vms(db, vec![c]).await?)?)),
        None => Ok(None),
    }
}

/// The user's own requests in any state, except those withdrawn.
pub async fn get_personel_cash_advances(db: &DatabaseConnection, user_name: &str) -> Result<Vec<CashAdvanceVm>, ServiceError> {
    let Some(u) = app_user::find_by_user_name(db, user_name).await? else {
        return Ok(Vec::new());
    };
    let rows = cash_advance::Entity::find()
        .filter(cash_advance::Column::AdvanceToId.eq(u.id))
        .filter(cash_advance::Column::DeletedAt.is_null())
        .order_by_desc(cash_advance::Column::CreatedAt)
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    to_vms(db, rows).await
}

/// Pending requests of the company.
pub async fn get_cash_advance_requests(db: &DatabaseConnection, company_id: Uuid) -> Result<Vec<CashAdvanceVm>, ServiceError> {
    let rows = cash_advance::Entity::find()
        .filter(cash_advance::Column::CompanyId.eq(company_id))
        .filter(cash_advance::Column::Status.eq(Status::Passive))
        .filter(cash_advance::Column::DeletedAt.is_null())
        .order_by_asc(cash_advance::Column::CreatedAt)
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    to_vms(db, rows).await
}

/// Approved (and paid) requests of the company.
pub async fn get_all_cash_advances(db: &DatabaseConnection, company_id: Uuid) -> Result<Vec<CashAdvanceVm>, ServiceError> {
    let rows = cash_advance::Entity::find()
        .filter(cash_advance::Column::CompanyId.eq(company_id))
        .filter(cash_advance::Column::Status.is_in(Status::VISIBLE))
        .order_by_desc(cash_advance::Column::CreatedAt)
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    to_vms(db, rows).await
}

/// Grant a pending request, optionally for less than was asked.
#[instrument(skip(db))]
pub async fn approve(
    db: &DatabaseConnection,
    id: Uuid,
    director_id: Uuid,
    approved_amount: Option<Decimal>,
) -> Result<CashAdvanceVm, ServiceError> {
    let current = find_pending(db, id).await?;
    let amount = approved_amount.unwrap_or(current.requested_amount).round_dp(2);
    cash_advance::validate_amount(amount)?;
    if amount > current.requested_amount {
        return Err(ServiceError::Validation("approved amount exceeds requested amount".into()));
    }
    let now = Utc::now();
    let mut am: cash_advance::ActiveModel = current.into();
    am.status = Set(Status::Active);
    am.is_payment_processed = Set(PaymentStatus::Approved);
    am.approved_amount = Set(Some(amount));
    am.director_id = Set(Some(director_id));
    am.reply_date = Set(Some(now.into()));
    am.updated_at = Set(Some(now.into()));
    let approved = am.update(db).await.map_err(ServiceError::db)?;
    info!(cash_advance_id = %id, %director_id, %amount, "cash_advance_approved");
    metrics::record_event("cash_advance_approved");
    first(to_vms(db, vec![approved]).await?)
}

/// Rejected requests stay visible to their owner with status `Deleted`.
#[instrument(skip(db))]
pub async fn reject(db: &DatabaseConnection, id: Uuid, director_id: Uuid) -> Result<CashAdvanceVm, ServiceError> {
    let current = find_pending(db, id).await?;
    let now = Utc::now();
    let mut am: cash_advance::ActiveModel = current.into();
    am.status = Set(Status::Deleted);
    am.is_payment_processed = Set(PaymentStatus::Rejected);
    am.director_id = Set(Some(director_id));
    am.reply_date = Set(Some(now.into()));
    am.updated_at = Set(Some(now.into()));
    let rejected = am.update(db).await.map_err(ServiceError::db)?;
    info!(cash_advance_id = %id, %director_id, "cash_advance_rejected");
    metrics::record_event("cash_advance_rejected");
    first(to_vms(db, vec![rejected]).await?)
}

/// Record the payout of an approved request.
#[instrument(skip(db))]
pub async fn mark_paid(db: &DatabaseConnection, id: Uuid) -> Result<CashAdvanceVm, ServiceError> {
    let current = find_live(db, id).await?.ok_or_else(|| ServiceError::not_found("cash advance"))?;
    if current.is_payment_processed != PaymentStatus::Approved {
        return Err(ServiceError::Validation("only approved cash advances can be paid".into()));
    }
    let mut am: cash_advance::ActiveModel = current.into();
    am.is_payment_processed = Set(PaymentStatus::Paid);
    am.updated_at = Set(Some(Utc::now().into()));
    let paid = am.update(db).await.map_err(ServiceError::db)?;
    info!(cash_advance_id = %id, "cash_advance_paid");
    metrics::record_event("cash_advance_paid");
    first(to_vms(db, vec![paid]).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, seed_company, seed_user};
    use models::enums::Role;
    use std::str::FromStr;

    fn dto(amount: &str) -> CashAdvanceCreateDto {
        CashAdvanceCreateDto {
            description: "Car repair".into(),
            requested_amount: Decimal::from_str(amount).unwrap(),
            final_date_request: Some(Utc::now().date_naive() + chrono::Duration::days(10)),
        }
    }

    #[tokio::test]
    async fn approve_then_pay() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let c = seed_company(&db).await?;
        let boss = seed_user(&db, "boss@acme.com", Some(c.id), Role::CompanyAdministrator).await?;
        seed_user(&db, "emp@acme.com", Some(c.id), Role::Employee).await?;

        let vm = create(&db, dto("2000"), "emp@acme.com").await?;
        assert_eq!(vm.is_payment_processed, PaymentStatus::Pending);
        assert_eq!(vm.status, Status::Passive);
        assert_eq!(get_cash_advance_requests(&db, c.id).await?.len(), 1);

        let edited = update(
            &db,
            CashAdvanceUpdateDto { id: vm.id, description: "Car repair and tyres".into(), requested_amount: Decimal::from(2500), final_date_request: None },
        )
        .await?;
        assert_eq!(edited.requested_amount, Decimal::from(2500));

        // cannot pay before approval
        assert!(matches!(mark_paid(&db, vm.id).await, Err(ServiceError::Validation(_))));
        // cannot grant more than asked
        assert!(matches!(approve(&db, vm.id, boss.id, Some(Decimal::from(3000))).await, Err(ServiceError::Validation(_))));

        let approved = approve(&db, vm.id, boss.id, Some(Decimal::from(1800))).await?;
        assert_eq!(approved.is_payment_processed, PaymentStatus::Approved);
        assert_eq!(approved.approved_amount, Some(Decimal::from(1800)));
        assert_eq!(approved.status, Status::Active);
        assert!(get_cash_advance_requests(&db, c.id).await?.is_empty());
        assert_eq!(get_all_cash_advances(&db, c.id).await?.len(), 1);

        let paid = mark_paid(&db, vm.id).await?;
        assert_eq!(paid.is_payment_processed, PaymentStatus::Paid);
        assert!(matches!(mark_paid(&db, vm.id).await, Err(ServiceError::Validation(_))));
        assert!(matches!(update(&db, CashAdvanceUpdateDto::from(cash_advance::Entity::find_by_id(vm.id).one(&db).await?.unwrap())).await, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn approve_defaults_to_requested_amount_and_reject() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let c = seed_company(&db).await?;
        let boss = seed_user(&db, "boss@acme.com", Some(c.id), Role::CompanyAdministrator).await?;
        seed_user(&db, "emp@acme.com", Some(c.id), Role::Employee).await?;

        let a = create(&db, dto("750.25"), "emp@acme.com").await?;
        let b = create(&db, dto("100"), "emp@acme.com").await?;

        let approved = approve(&db, a.id, boss.id, None).await?;
        assert_eq!(approved.approved_amount, Some(Decimal::from_str("750.25")?));
        assert!(matches!(withdraw(&db, a.id).await, Err(ServiceError::Validation(_))));

        let rejected = reject(&db, b.id, boss.id).await?;
        assert_eq!(rejected.is_payment_processed, PaymentStatus::Rejected);
        assert_eq!(rejected.status, Status::Deleted);
        assert_eq!(get_personel_cash_advances(&db, "emp@acme.com").await?.len(), 2);
        assert!(get_vm_by_id(&db, b.id).await?.is_some());

        assert!(withdraw(&db, b.id).await?);
        assert!(!delete(&db, b.id).await?);
        assert!(get_by_id(&db, b.id).await?.is_none());
        assert_eq!(get_personel_cash_advances(&db, "emp@acme.com").await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_amounts_rejected() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let c = seed_company(&db).await?;
        seed_user(&db, "emp@acme.com", Some(c.id), Role::Employee).await?;
        assert!(create(&db, dto("0"), "emp@acme.com").await.unwrap_err().is_validation());
        let mut past = dto("10");
        past.final_date_request = Some(Utc::now().date_naive() - chrono::Duration::days(2));
        assert!(create(&db, past, "emp@acme.com").await.unwrap_err().is_validation());
        Ok(())
    }
}
