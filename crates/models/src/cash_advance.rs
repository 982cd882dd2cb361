use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::{PaymentStatus, Status};
use crate::{app_user, company, errors, validate};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cash_advance")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub requested_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))", nullable)]
    pub approved_amount: Option<Decimal>,
    pub director_id: Option<Uuid>,
    pub advance_to_id: Uuid,
    pub company_id: Uuid,
    pub is_payment_processed: PaymentStatus,
    pub final_date_request: Option<Date>,
    pub reply_date: Option<DateTimeWithTimeZone>,
    pub status: Status,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    AdvanceTo,
    Company,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::AdvanceTo => Entity::belongs_to(app_user::Entity)
                .from(Column::AdvanceToId)
                .to(app_user::Column::Id)
                .into(),
            Relation::Company => Entity::belongs_to(company::Entity)
                .from(Column::CompanyId)
                .to(company::Column::Id)
                .into(),
        }
    }
}

impl Related<app_user::Entity> for Entity {
    fn to() -> RelationDef { Relation::AdvanceTo.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_amount(amount: Decimal) -> Result<(), errors::ModelError> {
    if amount <= Decimal::ZERO {
        return Err(errors::ModelError::validation("amount must be greater than zero"));
    }
    Ok(())
}

pub fn validate_final_date(final_date: Option<Date>, today: Date) -> Result<(), errors::ModelError> {
    match final_date {
        Some(d) if d < today => Err(errors::ModelError::validation("requested payment date is in the past")),
        _ => Ok(()),
    }
}

pub fn validate_description(description: &str) -> Result<(), errors::ModelError> {
    let d = description.trim();
    if d.is_empty() {
        return Err(errors::ModelError::validation("description required"));
    }
    validate::validate_optional("description", Some(d), 1024)
}

#[derive(Clone, Debug)]
pub struct NewCashAdvance {
    pub description: String,
    pub requested_amount: Decimal,
    pub final_date_request: Option<Date>,
    pub advance_to_id: Uuid,
    pub company_id: Uuid,
}

/// Stores a request awaiting approval with payment still pending.
pub async fn create<C: ConnectionTrait>(db: &C, input: NewCashAdvance) -> Result<Model, errors::ModelError> {
    validate_description(&input.description)?;
    validate_amount(input.requested_amount)?;
    validate_final_date(input.final_date_request, Utc::now().date_naive())?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        description: Set(input.description.trim().to_string()),
        requested_amount: Set(input.requested_amount.round_dp(2)),
        approved_amount: Set(None),
        director_id: Set(None),
        advance_to_id: Set(input.advance_to_id),
        company_id: Set(input.company_id),
        is_payment_processed: Set(PaymentStatus::Pending),
        final_date_request: Set(input.final_date_request),
        reply_date: Set(None),
        status: Set(Status::Passive),
        created_at: Set(Utc::now().into()),
        updated_at: Set(None),
        deleted_at: Set(None),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Marks the request deleted. Returns `false` when it does not exist or is already deleted.
pub async fn soft_delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<bool, errors::ModelError> {
    let found = Entity::find_by_id(id).one(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    let Some(found) = found.filter(|m| m.deleted_at.is_none()) else {
        return Ok(false);
    };
    let mut am: ActiveModel = found.into();
    am.status = Set(Status::Deleted);
    am.deleted_at = Set(Some(Utc::now().into()));
    am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(true)
}
