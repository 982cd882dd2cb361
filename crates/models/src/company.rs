use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::Status;
use crate::{app_user, errors, sector, validate};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "company")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub sector_id: Uuid,
    pub number_of_employees: i32,
    pub status: Status,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Sector,
    AppUser,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Sector => Entity::belongs_to(sector::Entity)
                .from(Column::SectorId)
                .to(sector::Column::Id)
                .into(),
            Relation::AppUser => Entity::has_many(app_user::Entity).into(),
        }
    }
}

impl Related<sector::Entity> for Entity {
    fn to() -> RelationDef { Relation::Sector.def() }
}

impl Related<app_user::Entity> for Entity {
    fn to() -> RelationDef { Relation::AppUser.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Company fields as entered on the registration and update forms.
#[derive(Clone, Debug)]
pub struct CompanyFields {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub sector_id: Uuid,
    pub number_of_employees: i32,
}

pub fn validate_fields(f: &CompanyFields) -> Result<(), errors::ModelError> {
    validate::validate_name("company name", &f.name)?;
    validate::validate_email(&f.email)?;
    validate::validate_phone(&f.phone_number)?;
    if f.number_of_employees < 0 {
        return Err(errors::ModelError::validation("number of employees must be >= 0"));
    }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(db: &C, fields: CompanyFields, status: Status) -> Result<Model, errors::ModelError> {
    validate_fields(&fields)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(fields.name.trim().to_string()),
        email: Set(fields.email.trim().to_string()),
        phone_number: Set(fields.phone_number.trim().to_string()),
        sector_id: Set(fields.sector_id),
        number_of_employees: Set(fields.number_of_employees),
        status: Set(status),
        created_at: Set(Utc::now().into()),
        updated_at: Set(None),
        deleted_at: Set(None),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Marks the company deleted. Returns `false` when it does not exist or is already deleted.
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
