use chrono::NaiveDate;
use models::enums::{LeaveType, Status};
use models::leave;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLeaveDto {
    pub leave_type: LeaveType,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLeaveDto {
    pub id: Uuid,
    pub leave_type: LeaveType,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<leave::Model> for UpdateLeaveDto {
    fn from(l: leave::Model) -> Self {
        Self { id: l.id, leave_type: l.leave_type, description: l.description, start_date: l.start_date, end_date: l.end_date }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaveVm {
    pub id: Uuid,
    pub leave_type: LeaveType,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub number_of_days: i32,
    pub app_user_id: Uuid,
    pub personal_name: String,
    pub company_id: Uuid,
    pub director_id: Option<Uuid>,
    pub director_name: Option<String>,
    pub reply_date: Option<chrono::DateTime<chrono::FixedOffset>>,
    pub status: Status,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
}
