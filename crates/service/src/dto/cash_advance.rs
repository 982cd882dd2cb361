use chrono::NaiveDate;
use models::cash_advance;
use models::enums::{PaymentStatus, Status};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashAdvanceCreateDto {
    pub description: String,
    pub requested_amount: Decimal,
    #[serde(default)]
    pub final_date_request: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashAdvanceUpdateDto {
    pub id: Uuid,
    pub description: String,
    pub requested_amount: Decimal,
    #[serde(default)]
    pub final_date_request: Option<NaiveDate>,
}

impl From<cash_advance::Model> for CashAdvanceUpdateDto {
    fn from(c: cash_advance::Model) -> Self {
        Self { id: c.id, description: c.description, requested_amount: c.requested_amount, final_date_request: c.final_date_request }
    }
}

/// Director's decision; without an amount the requested amount is granted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApproveCashAdvanceDto {
    #[serde(default)]
    pub approved_amount: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CashAdvanceVm {
    pub id: Uuid,
    pub description: String,
    pub requested_amount: Decimal,
    pub approved_amount: Option<Decimal>,
    pub advance_to_id: Uuid,
    pub personal_name: String,
    pub company_id: Uuid,
    pub director_id: Option<Uuid>,
    pub director_name: Option<String>,
    pub is_payment_processed: PaymentStatus,
    pub final_date_request: Option<NaiveDate>,
    pub reply_date: Option<chrono::DateTime<chrono::FixedOffset>>,
    pub status: Status,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
}
