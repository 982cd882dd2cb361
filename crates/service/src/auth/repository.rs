use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{AuthUser, Credentials, RegisterInput};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user_by_user_name(&self, user_name: &str) -> Result<Option<AuthUser>, AuthError>;
    /// Create the account, grant `input.role` and store its password hash as one unit;
    /// nothing is kept when any step fails.
    async fn create_user(&self, input: &RegisterInput, password_hash: String, password_algorithm: &str) -> Result<AuthUser, AuthError>;

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<String, AuthUser>>, // key: user_name
        creds: Mutex<HashMap<Uuid, Credentials>>, // key: user_id
    }

    impl MockAuthRepository {
        /// Overwrite the lifecycle status of a stored user.
        pub fn set_status(&self, user_name: &str, status: models::enums::Status) {
            if let Some(u) = self.users.lock().unwrap().get_mut(user_name) {
                u.status = status;
            }
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_user_by_user_name(&self, user_name: &str) -> Result<Option<AuthUser>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.get(&user_name.trim().to_lowercase()).cloned())
        }

        async fn create_user(&self, input: &RegisterInput, password_hash: String, password_algorithm: &str) -> Result<AuthUser, AuthError> {
            let key = input.email.trim().to_lowercase();
            let mut users = self.users.lock().unwrap();
            if users.contains_key(&key) {
                return Err(AuthError::Conflict);
            }
            if password_hash.trim().is_empty() {
                return Err(AuthError::Validation("password hash required".into()));
            }
            let user = AuthUser {
                id: Uuid::new_v4(),
                user_name: key.clone(),
                full_name: format!("{} {}", input.profile.name, input.profile.surname),
                company_id: input.company_id,
                status: input.status,
                roles: vec![input.role],
            };
            users.insert(key, user.clone());
            let c = Credentials { user_id: user.id, password_hash, password_algorithm: password_algorithm.to_string() };
            self.creds.lock().unwrap().insert(user.id, c);
            Ok(user)
        }

        async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
            let creds = self.creds.lock().unwrap();
            Ok(creds.get(&user_id).cloned())
        }
    }
}
