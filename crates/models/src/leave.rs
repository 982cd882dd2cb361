use chrono::{Datelike, Utc};
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::{LeaveType, Status};
use crate::{app_user, company, errors, validate};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "leave")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub leave_type: LeaveType,
    pub description: Option<String>,
    pub start_date: Date,
    pub end_date: Date,
    pub number_of_days: i32,
    pub app_user_id: Uuid,
    pub company_id: Uuid,
    pub director_id: Option<Uuid>,
    pub reply_date: Option<DateTimeWithTimeZone>,
    pub status: Status,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    AppUser,
    Company,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::AppUser => Entity::belongs_to(app_user::Entity)
                .from(Column::AppUserId)
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
    fn to() -> RelationDef { Relation::AppUser.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Longest period a single leave request may span, in calendar days.
pub const MAX_PERIOD_DAYS: i64 = 366;
pub const MAX_DESCRIPTION_LEN: usize = 1024;

/// Weekdays (Mon-Fri) in `start..=end`.
pub fn count_weekdays(start: Date, end: Date) -> i32 {
    if end < start {
        return 0;
    }
    let total = (end - start).num_days() + 1;
    let first = i64::from(start.weekday().num_days_from_monday());
    let tail = (0..total % 7).filter(|i| (first + i) % 7 < 5).count() as i64;
    i32::try_from(total / 7 * 5 + tail).unwrap_or(i32::MAX)
}

/// Checks the period and returns its working-day count.
pub fn validate_period(start: Date, end: Date) -> Result<i32, errors::ModelError> {
    if end < start {
        return Err(errors::ModelError::validation("end date must not be before start date"));
    }
    if (end - start).num_days() + 1 > MAX_PERIOD_DAYS {
        return Err(errors::ModelError::validation(format!(
            "leave period must not exceed {MAX_PERIOD_DAYS} days"
        )));
    }
    let days = count_weekdays(start, end);
    if days == 0 {
        return Err(errors::ModelError::validation("leave period contains no working days"));
    }
    Ok(days)
}

/// Trims the description and checks its length.
pub fn validate_description(description: Option<String>) -> Result<Option<String>, errors::ModelError> {
    let description = validate::non_empty(description);
    validate::validate_optional("description", description.as_deref(), MAX_DESCRIPTION_LEN)?;
    Ok(description)
}

#[derive(Clone, Debug)]
pub struct NewLeave {
    pub leave_type: LeaveType,
    pub description: Option<String>,
    pub start_date: Date,
    pub end_date: Date,
    pub app_user_id: Uuid,
    pub company_id: Uuid,
}

/// Stores a leave request awaiting approval.
pub async fn create<C: ConnectionTrait>(db: &C, input: NewLeave) -> Result<Model, errors::ModelError> {
    let days = validate_period(input.start_date, input.end_date)?;
    let description = validate_description(input.description)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        leave_type: Set(input.leave_type),
        description: Set(description),
        start_date: Set(input.start_date),
        end_date: Set(input.end_date),
        number_of_days: Set(days),
        app_user_id: Set(input.app_user_id),
        company_id: Set(input.company_id),
        director_id: Set(None),
        reply_date: Set(None),
        status: Set(Status::Passive),
        created_at: Set(Utc::now().into()),
        updated_at: Set(None),
        deleted_at: Set(None),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Marks the leave deleted. Returns `false` when it does not exist or is already deleted.
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
