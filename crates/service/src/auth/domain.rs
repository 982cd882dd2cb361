use chrono::{DateTime, Utc};
use models::app_user::Profile;
use models::enums::{Role, Status};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// New account input
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub email: String,
    pub profile: Profile,
    pub company_id: Option<Uuid>,
    pub role: Role,
    pub status: Status,
    pub password: String,
}

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub user_name: String,
    pub password: String,
}

/// Domain user (business view)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub user_name: String,
    pub full_name: String,
    pub company_id: Option<Uuid>,
    pub status: Status,
    pub roles: Vec<Role>,
}

/// Domain credentials (hashed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub user_id: Uuid,
    pub password_hash: String,
    pub password_algorithm: String,
}

/// Login result (session)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: AuthUser,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Identity carried by a verified session token.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionClaims {
    pub user_id: Uuid,
    pub user_name: String,
    pub company_id: Option<Uuid>,
    pub roles: Vec<Role>,
}

impl SessionClaims {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}
