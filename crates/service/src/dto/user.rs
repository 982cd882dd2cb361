use chrono::NaiveDate;
use models::app_user::{self, Profile};
use models::enums::{Role, Status};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::domain::LoginInput;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginDto {
    pub user_name: String,
    pub password: String,
}

impl From<LoginDto> for LoginInput {
    fn from(d: LoginDto) -> Self { LoginInput { user_name: d.user_name, password: d.password } }
}

/// A company administrator adding an employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppUserCreateDto {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub second_name: Option<String>,
    pub surname: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub blood_group: Option<String>,
    #[serde(default)]
    pub profession: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub identity_id: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
    pub password: String,
}

impl AppUserCreateDto {
    pub fn profile(&self) -> Profile {
        Profile {
            name: self.name.clone(),
            second_name: self.second_name.clone(),
            surname: self.surname.clone(),
            title: self.title.clone(),
            blood_group: self.blood_group.clone(),
            profession: self.profession.clone(),
            birth_date: self.birth_date,
            identity_id: self.identity_id.clone(),
            image_path: self.image_path.clone(),
        }
    }
}

/// Editable profile. `password` is only applied when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppUserUpdateDto {
    pub id: Uuid,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub second_name: Option<String>,
    pub surname: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub blood_group: Option<String>,
    #[serde(default)]
    pub profession: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub identity_id: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
}

impl AppUserUpdateDto {
    pub fn profile(&self) -> Profile {
        Profile {
            name: self.name.clone(),
            second_name: self.second_name.clone(),
            surname: self.surname.clone(),
            title: self.title.clone(),
            blood_group: self.blood_group.clone(),
            profession: self.profession.clone(),
            birth_date: self.birth_date,
            identity_id: self.identity_id.clone(),
            image_path: self.image_path.clone(),
        }
    }
}

impl From<app_user::Model> for AppUserUpdateDto {
    fn from(u: app_user::Model) -> Self {
        Self {
            id: u.id,
            user_name: u.user_name,
            email: u.email,
            name: u.name,
            second_name: u.second_name,
            surname: u.surname,
            title: u.title,
            blood_group: u.blood_group,
            profession: u.profession,
            birth_date: u.birth_date,
            identity_id: u.identity_id,
            image_path: u.image_path,
            password: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AppUserVm {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    pub full_name: String,
    pub title: Option<String>,
    pub profession: Option<String>,
    pub blood_group: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub image_path: Option<String>,
    pub company_id: Option<Uuid>,
    pub company_name: Option<String>,
    pub roles: Vec<Role>,
    pub role_names: Vec<&'static str>,
    pub status: Status,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
}

impl AppUserVm {
    pub fn new(u: app_user::Model, company_name: Option<String>, roles: Vec<Role>) -> Self {
        Self {
            id: u.id,
            full_name: u.full_name(),
            user_name: u.user_name,
            email: u.email,
            title: u.title,
            profession: u.profession,
            blood_group: u.blood_group,
            birth_date: u.birth_date,
            image_path: u.image_path,
            company_id: u.company_id,
            company_name,
            role_names: roles.iter().map(|r| r.display_name()).collect(),
            roles,
            status: u.status,
            created_at: u.created_at,
        }
    }
}

/// Company sign-up together with its first administrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterDto {
    pub company_name: String,
    pub company_email: String,
    pub company_phone_number: String,
    pub sector_id: Uuid,
    #[serde(default)]
    pub number_of_employees: i32,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub second_name: Option<String>,
    pub surname: String,
    #[serde(default)]
    pub title: Option<String>,
    pub password: String,
    pub confirm_password: String,
}

/// Pending registration as listed for the site administrator.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterVm {
    pub user_id: Uuid,
    pub user_name: String,
    pub full_name: String,
    pub title: Option<String>,
    pub company_id: Uuid,
    pub company_name: String,
    pub company_email: String,
    pub company_phone_number: String,
    pub sector_name: Option<String>,
    pub number_of_employees: i32,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
}
