//! Startup provisioning
//!
//! Makes a fresh database usable: a site administrator to approve registrations
//! and a sector list for the registration form.

use std::sync::Arc;

use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use models::{app_user::Profile, enums::{Role, Status}, sector};

use crate::auth::{
    domain::RegisterInput,
    errors::AuthError,
    repo::seaorm::SeaOrmAuthRepository,
    service::{AuthConfig, AuthService},
};
use crate::errors::ServiceError;

pub const DEFAULT_SECTORS: [&str; 8] = [
    "Construction",
    "Education",
    "Finance",
    "Healthcare",
    "Information Technology",
    "Logistics",
    "Manufacturing",
    "Retail",
];

/// Create the configured site administrator unless the account already exists.
///
/// Returns the id of a newly created account; `None` when disabled or already present.
#[instrument(skip_all, fields(admin_email = %cfg.admin_email))]
pub async fn ensure_site_admin(
    db: &DatabaseConnection,
    cfg: &configs::BootstrapConfig,
    auth: &AuthConfig,
) -> Result<Option<Uuid>, ServiceError> {
    if !cfg.is_enabled() {
        warn!("bootstrap admin not configured; registrations cannot be approved until one exists");
        return Ok(None);
    }
    let svc = AuthService::new(Arc::new(SeaOrmAuthRepository::new(db.clone())), auth.clone());
    let input = RegisterInput {
        email: cfg.admin_email.clone(),
        profile: Profile { name: cfg.admin_name.clone(), surname: cfg.admin_surname.clone(), ..Default::default() },
        company_id: None,
        role: Role::SiteAdministrator,
        status: Status::Active,
        password: cfg.admin_password.clone(),
    };
    match svc.register(input).await {
        Ok(user) => {
            info!(user_id = %user.id, "site_admin_created");
            Ok(Some(user.id))
        }
        Err(AuthError::Conflict) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Insert [`DEFAULT_SECTORS`] when the sector table is empty. Returns how many were added.
pub async fn seed_default_sectors(db: &DatabaseConnection) -> Result<usize, ServiceError> {
    let existing = sector::Entity::find().count(db).await.map_err(ServiceError::db)?;
    if existing > 0 {
        return Ok(0);
    }
    for name in DEFAULT_SECTORS {
        sector::create(db, name).await?;
    }
    info!(count = DEFAULT_SECTORS.len(), "default_sectors_seeded");
    Ok(DEFAULT_SECTORS.len())
}
