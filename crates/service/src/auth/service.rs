use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::domain::{AuthSession, AuthUser, LoginInput, RegisterInput};
use super::errors::AuthError;
use super::password;
use super::repository::AuthRepository;
use super::token;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub password_algorithm: String,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>, token_ttl_hours: i64) -> Self {
        Self { jwt_secret: jwt_secret.into(), token_ttl_hours, password_algorithm: password::ALGORITHM.into() }
    }
}

impl From<&configs::AuthConfig> for AuthConfig {
    fn from(c: &configs::AuthConfig) -> Self {
        Self::new(c.jwt_secret.clone(), c.token_ttl_hours)
    }
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    /// Register a new account with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use models::{app_user::Profile, enums::{Role, Status}};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig::new("0123456789abcdef", 12));
    /// let input = RegisterInput {
    ///     email: "user@example.com".into(),
    ///     profile: Profile { name: "Test".into(), surname: "User".into(), ..Default::default() },
    ///     company_id: None,
    ///     role: Role::Employee,
    ///     status: Status::Active,
    ///     password: "Secret123".into(),
    /// };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.user_name, "user@example.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email, role = ?input.role))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthUser, AuthError> {
        password::validate_password(&input.password)?;
        if let Some(existing) = self.repo.find_user_by_user_name(&input.email).await? {
            debug!("user exists: {}", existing.user_name);
            return Err(AuthError::Conflict);
        }

        let hash = password::hash_password(&input.password)?;
        let user = self.repo.create_user(&input, hash, &self.cfg.password_algorithm).await?;
        info!(user_id = %user.id, company_id = ?user.company_id, user_name = %user.user_name, "user_registered");
        Ok(user)
    }

    /// Authenticate a user and issue a session token.
    ///
    /// Only visible (active or modified) accounts may sign in.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use models::{app_user::Profile, enums::{Role, Status}};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo.clone(), AuthConfig::new("0123456789abcdef", 12));
    /// let _ = tokio_test::block_on(svc.register(RegisterInput {
    ///     email: "u@e.com".into(),
    ///     profile: Profile { name: "N".into(), surname: "S".into(), ..Default::default() },
    ///     company_id: None,
    ///     role: Role::Employee,
    ///     status: Status::Active,
    ///     password: "Passw0rd".into(),
    /// }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { user_name: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.user_name, "u@e.com");
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(user_name = %input.user_name))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let user = self.repo
            .find_user_by_user_name(&input.user_name)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let cred = self.repo
            .get_credentials(user.id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        if !password::verify_password(&input.password, &cred.password_hash)? {
            return Err(AuthError::Unauthorized);
        }
        if !user.status.is_visible() {
            warn!(user_id = %user.id, status = ?user.status, "login_refused_inactive");
            return Err(AuthError::Inactive);
        }

        let (token, expires_at) = token::issue(&self.cfg.jwt_secret, &user, self.cfg.token_ttl_hours)?;
        info!(user_id = %user.id, "user_logged_in");
        Ok(AuthSession { user, token, expires_at })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockAuthRepository;
    use uuid::Uuid;
    use models::{app_user::Profile, enums::{Role, Status}};

    fn svc(repo: Arc<MockAuthRepository>) -> AuthService<MockAuthRepository> {
        AuthService::new(repo, AuthConfig::new("0123456789abcdef", 12))
    }

    fn input(email: &str, password: &str, status: Status) -> RegisterInput {
        RegisterInput {
            email: email.into(),
            profile: Profile { name: "Ayse".into(), surname: "Kaya".into(), ..Default::default() },
            company_id: Some(Uuid::new_v4()),
            role: Role::Employee,
            status,
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn register_then_login() -> anyhow::Result<()> {
        let repo = Arc::new(MockAuthRepository::default());
        let s = svc(repo.clone());
        let u = s.register(input("ayse@acme.com", "Passw0rd!", Status::Active)).await?;
        let session = s.login(LoginInput { user_name: "ayse@acme.com".into(), password: "Passw0rd!".into() }).await?;
        assert_eq!(session.user.id, u.id);
        let claims = token::verify("0123456789abcdef", &session.token)?;
        assert_eq!(claims.roles, vec![Role::Employee]);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_and_short_password() {
        let repo = Arc::new(MockAuthRepository::default());
        let s = svc(repo);
        assert!(matches!(s.register(input("a@b.com", "short", Status::Active)).await, Err(AuthError::Validation(_))));
        s.register(input("a@b.com", "LongEnough1", Status::Active)).await.unwrap();
        assert!(matches!(s.register(input("a@b.com", "LongEnough1", Status::Active)).await, Err(AuthError::Conflict)));
    }

    #[tokio::test]
    async fn wrong_password_and_inactive() {
        let repo = Arc::new(MockAuthRepository::default());
        let s = svc(repo.clone());
        s.register(input("p@b.com", "LongEnough1", Status::Passive)).await.unwrap();
        let wrong = s.login(LoginInput { user_name: "p@b.com".into(), password: "nope-nope".into() }).await;
        assert!(matches!(wrong, Err(AuthError::Unauthorized)));
        let pending = s.login(LoginInput { user_name: "p@b.com".into(), password: "LongEnough1".into() }).await;
        assert!(matches!(pending, Err(AuthError::Inactive)));

        repo.set_status("p@b.com", Status::Active);
        assert!(s.login(LoginInput { user_name: "p@b.com".into(), password: "LongEnough1".into() }).await.is_ok());
    }
}
