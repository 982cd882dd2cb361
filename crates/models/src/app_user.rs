use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::Status;
use crate::{company, errors, user_role, validate};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "app_user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_name: String,
    pub email: String,
    pub name: String,
    pub second_name: Option<String>,
    pub surname: String,
    pub title: Option<String>,
    pub blood_group: Option<String>,
    pub profession: Option<String>,
    pub birth_date: Option<Date>,
    pub identity_id: Option<String>,
    pub image_path: Option<String>,
    pub company_id: Option<Uuid>,
    pub status: Status,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

impl Model {
    /// "Name SecondName Surname", skipping an absent second name.
    pub fn full_name(&self) -> String {
        match self.second_name.as_deref() {
            Some(second) if !second.is_empty() => format!("{} {} {}", self.name, second, self.surname),
            _ => format!("{} {}", self.name, self.surname),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Company,
    UserRole,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Company => Entity::belongs_to(company::Entity)
                .from(Column::CompanyId)
                .to(company::Column::Id)
                .into(),
            Relation::UserRole => Entity::has_many(user_role::Entity).into(),
        }
    }
}

impl Related<company::Entity> for Entity {
    fn to() -> RelationDef { Relation::Company.def() }
}

impl Related<user_role::Entity> for Entity {
    fn to() -> RelationDef { Relation::UserRole.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Personal details shared by create and update.
#[derive(Clone, Debug, Default)]
pub struct Profile {
    pub name: String,
    pub second_name: Option<String>,
    pub surname: String,
    pub title: Option<String>,
    pub blood_group: Option<String>,
    pub profession: Option<String>,
    pub birth_date: Option<Date>,
    pub identity_id: Option<String>,
    pub image_path: Option<String>,
}

impl Profile {
    /// Trims fields and drops blank optionals.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            second_name: validate::non_empty(self.second_name),
            surname: self.surname.trim().to_string(),
            title: validate::non_empty(self.title),
            blood_group: validate::non_empty(self.blood_group),
            profession: validate::non_empty(self.profession),
            birth_date: self.birth_date,
            identity_id: validate::non_empty(self.identity_id),
            image_path: validate::non_empty(self.image_path),
        }
    }
}

pub fn validate_profile(p: &Profile) -> Result<(), errors::ModelError> {
    validate::validate_name("name", &p.name)?;
    validate::validate_name("surname", &p.surname)?;
    validate::validate_optional("second name", p.second_name.as_deref(), validate::MAX_NAME_LEN)?;
    validate::validate_optional("title", p.title.as_deref(), validate::MAX_NAME_LEN)?;
    validate::validate_optional("blood group", p.blood_group.as_deref(), 16)?;
    validate::validate_optional("profession", p.profession.as_deref(), validate::MAX_NAME_LEN)?;
    validate::validate_optional("identity id", p.identity_id.as_deref(), 32)?;
    validate::validate_optional("image path", p.image_path.as_deref(), 512)?;
    if let Some(birth) = p.birth_date {
        if birth > Utc::now().date_naive() {
            return Err(errors::ModelError::validation("birth date cannot be in the future"));
        }
    }
    Ok(())
}

/// The e-mail doubles as the login name.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    email: &str,
    profile: Profile,
    company_id: Option<Uuid>,
    status: Status,
) -> Result<Model, errors::ModelError> {
    validate::validate_email(email)?;
    let profile = profile.normalized();
    validate_profile(&profile)?;
    let email = email.trim().to_lowercase();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_name: Set(email.clone()),
        email: Set(email),
        name: Set(profile.name),
        second_name: Set(profile.second_name),
        surname: Set(profile.surname),
        title: Set(profile.title),
        blood_group: Set(profile.blood_group),
        profession: Set(profile.profession),
        birth_date: Set(profile.birth_date),
        identity_id: Set(profile.identity_id),
        image_path: Set(profile.image_path),
        company_id: Set(company_id),
        status: Set(status),
        created_at: Set(Utc::now().into()),
        updated_at: Set(None),
        deleted_at: Set(None),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_user_name<C: ConnectionTrait>(db: &C, user_name: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::UserName.eq(user_name.trim().to_lowercase()))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Marks the user deleted. Returns `false` when it does not exist or is already deleted.
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
