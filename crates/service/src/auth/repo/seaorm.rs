use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use models::{app_user, user_credentials, user_role};

use crate::auth::domain::{AuthUser, Credentials, RegisterInput};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAuthRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn model_err(e: models::errors::ModelError) -> AuthError {
    match e {
        models::errors::ModelError::Validation(msg) => AuthError::Validation(msg),
        other => AuthError::Repository(other.to_string()),
    }
}

fn to_auth_user(u: app_user::Model, roles: Vec<models::enums::Role>) -> AuthUser {
    AuthUser { id: u.id, full_name: u.full_name(), user_name: u.user_name, company_id: u.company_id, status: u.status, roles }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_user_name(&self, user_name: &str) -> Result<Option<AuthUser>, AuthError> {
        let Some(u) = app_user::find_by_user_name(&self.db, user_name)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?
        else {
            return Ok(None);
        };
        let roles = user_role::roles_of(&self.db, u.id)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(Some(to_auth_user(u, roles)))
    }

    async fn create_user(&self, input: &RegisterInput, password_hash: String, password_algorithm: &str) -> Result<AuthUser, AuthError> {
        let txn = self.db.begin().await.map_err(|e| AuthError::Repository(e.to_string()))?;
        let created = app_user::create(&txn, &input.email, input.profile.clone(), input.company_id, input.status)
            .await
            .map_err(model_err)?;
        user_role::assign(&txn, created.id, input.role)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        user_credentials::upsert_password(&txn, created.id, password_hash, password_algorithm)
            .await
            .map_err(model_err)?;
        txn.commit().await.map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(to_auth_user(created, vec![input.role]))
    }

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
        let res = user_credentials::find_by_user(&self.db, user_id)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(|c| Credentials { user_id: c.user_id, password_hash: c.password_hash, password_algorithm: c.password_algorithm }))
    }
}
