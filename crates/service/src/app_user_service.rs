use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use common::{metrics, pagination::Pagination};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use models::{app_user, company, enums::{Role, Status}, sector, user_credentials, user_role};

use crate::auth::{
    domain::AuthSession,
    password,
    repo::seaorm::SeaOrmAuthRepository,
    service::{AuthConfig, AuthService},
};
use crate::company_service::{self, ensure_sector};
use crate::dto::user::{AppUserCreateDto, AppUserUpdateDto, AppUserVm, LoginDto, RegisterDto, RegisterVm};
use crate::errors::ServiceError;

async fn find_live(db: &DatabaseConnection, id: Uuid) -> Result<Option<app_user::Model>, ServiceError> {
    let found = app_user::Entity::find_by_id(id).one(db).await.map_err(ServiceError::db)?;
    Ok(found.filter(|u| u.status != Status::Deleted))
}

/// Attach company names and roles to a batch of users.
async fn to_vms(db: &DatabaseConnection, users: Vec<app_user::Model>) -> Result<Vec<AppUserVm>, ServiceError> {
    let company_ids: Vec<Uuid> = users.iter().filter_map(|u| u.company_id).collect();
    let companies: HashMap<Uuid, String> = if company_ids.is_empty() {
        HashMap::new()
    } else {
        company::Entity::find()
            .filter(company::Column::Id.is_in(company_ids))
            .all(db)
            .await
            .map_err(ServiceError::db)?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect()
    };
    let mut roles = user_role::roles_by_user(db, users.iter().map(|u| u.id).collect()).await?;
    Ok(users
        .into_iter()
        .map(|u| {
            let company_name = u.company_id.and_then(|cid| companies.get(&cid).cloned());
            let user_roles = roles.remove(&u.id).unwrap_or_default();
            AppUserVm::new(u, company_name, user_roles)
        })
        .collect())
}

/// Profile of a non-deleted user, looked up by login name.
pub async fn get_by_user_name(db: &DatabaseConnection, user_name: &str) -> Result<Option<AppUserUpdateDto>, ServiceError> {
    let found = app_user::find_by_user_name(db, user_name).await?;
    Ok(found.filter(|u| u.status != Status::Deleted).map(AppUserUpdateDto::from))
}

/// Get a user's editable profile by id.
pub async fn get_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<AppUserUpdateDto>, ServiceError> {
    Ok(find_live(db, id).await?.map(AppUserUpdateDto::from))
}

/// All visible users with company name and roles.
pub async fn get_all_users(db: &DatabaseConnection) -> Result<Vec<AppUserVm>, ServiceError> {
    let users = app_user::Entity::find()
        .filter(app_user::Column::Status.is_in(Status::VISIBLE))
        .order_by_asc(app_user::Column::UserName)
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    to_vms(db, users).await
}

/// Visible users, one page at a time.
pub async fn get_all_users_paginated(db: &DatabaseConnection, opts: Pagination) -> Result<Vec<AppUserVm>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    // SeaORM's paginate uses 0-based page index internally via fetch_page
    let users = app_user::Entity::find()
        .filter(app_user::Column::Status.is_in(Status::VISIBLE))
        .order_by_asc(app_user::Column::UserName)
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(ServiceError::db)?;
    to_vms(db, users).await
}

/// Visible users of one company.
pub async fn get_company_users(db: &DatabaseConnection, company_id: Uuid) -> Result<Vec<AppUserVm>, ServiceError> {
    let users = app_user::Entity::find()
        .filter(app_user::Column::CompanyId.eq(company_id))
        .filter(app_user::Column::Status.is_in(Status::VISIBLE))
        .order_by_asc(app_user::Column::Surname)
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    to_vms(db, users).await
}

/// Verify credentials and open a session.
pub async fn login(db: &DatabaseConnection, cfg: &AuthConfig, dto: LoginDto) -> Result<AuthSession, ServiceError> {
    let svc = AuthService::new(Arc::new(SeaOrmAuthRepository::new(db.clone())), cfg.clone());
    match svc.login(dto.into()).await {
        Ok(session) => {
            metrics::record_login(true);
            Ok(session)
        }
        Err(e) => {
            metrics::record_login(false);
            Err(e.into())
        }
    }
}

/// Sessions are stateless tokens, so there is nothing to revoke server-side.
pub fn logout(user_name: &str) {
    info!(%user_name, "user_logged_out");
}

async fn ensure_user_name_free(db: &impl sea_orm::ConnectionTrait, email: &str) -> Result<(), ServiceError> {
    if app_user::find_by_user_name(db, email).await?.is_some() {
        return Err(ServiceError::Conflict(format!("user '{}' already exists", email.trim().to_lowercase())));
    }
    Ok(())
}

/// Create an active account with `role` inside `company_id`.
#[instrument(skip(db, dto), fields(email = %dto.email))]
pub async fn create_user(
    db: &DatabaseConnection,
    dto: AppUserCreateDto,
    role: Role,
    company_id: Option<Uuid>,
) -> Result<AppUserVm, ServiceError> {
    password::validate_password(&dto.password)?;
    if let Some(cid) = company_id {
        company_service::ensure_active(db, cid).await?;
    }
    ensure_user_name_free(db, &dto.email).await?;
    let hash = password::hash_password(&dto.password)?;

    let txn = db.begin().await.map_err(ServiceError::db)?;
    let created = app_user::create(&txn, &dto.email, dto.profile(), company_id, Status::Active).await?;
    user_role::assign(&txn, created.id, role).await?;
    user_credentials::upsert_password(&txn, created.id, hash, password::ALGORITHM).await?;
    txn.commit().await.map_err(ServiceError::db)?;

    info!(user_id = %created.id, company_id = ?company_id, "user_created");
    metrics::record_event("user_created");
    let mut vms = to_vms(db, vec![created]).await?;
    vms.pop().ok_or_else(|| ServiceError::not_found("user"))
}

/// Soft-delete a user. Returns `false` when it does not exist.
pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    let deleted = app_user::soft_delete(db, id).await?;
    if deleted {
        info!(user_id = %id, "user_deleted");
    }
    Ok(deleted)
}

/// Fails `Forbidden` once the account behind a session, or its company, is no longer visible.
pub async fn ensure_session_active(db: &DatabaseConnection, user_id: Uuid) -> Result<(), ServiceError> {
    let user = app_user::Entity::find_by_id(user_id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .filter(|u| u.status.is_visible())
        .ok_or_else(|| ServiceError::Forbidden("account is not active".into()))?;
    if let Some(cid) = user.company_id {
        company_service::ensure_active(db, cid).await?;
    }
    Ok(())
}

/// True when `user_id` is a non-deleted member of `company_id`.
pub async fn is_company_member(db: &DatabaseConnection, user_id: Uuid, company_id: Uuid) -> Result<bool, ServiceError> {
    Ok(find_live(db, user_id).await?.is_some_and(|u| u.company_id == Some(company_id)))
}

/// Overwrite the profile of an existing user; the password is re-hashed only when supplied.
#[instrument(skip(db, dto), fields(user_id = %dto.id))]
pub async fn update_user(db: &DatabaseConnection, dto: AppUserUpdateDto) -> Result<AppUserVm, ServiceError> {
    let current = find_live(db, dto.id).await?.ok_or_else(|| ServiceError::not_found("user"))?;
    let profile = dto.profile().normalized();
    app_user::validate_profile(&profile)?;
    let new_hash = match dto.password.as_deref().filter(|p| !p.is_empty()) {
        Some(p) => {
            password::validate_password(p)?;
            Some(password::hash_password(p)?)
        }
        None => None,
    };

    let txn = db.begin().await.map_err(ServiceError::db)?;
    let mut am: app_user::ActiveModel = current.into();
    am.name = Set(profile.name);
    am.second_name = Set(profile.second_name);
    am.surname = Set(profile.surname);
    am.title = Set(profile.title);
    am.blood_group = Set(profile.blood_group);
    am.profession = Set(profile.profession);
    am.birth_date = Set(profile.birth_date);
    am.identity_id = Set(profile.identity_id);
    am.image_path = Set(profile.image_path);
    am.status = Set(Status::Modified);
    am.updated_at = Set(Some(Utc::now().into()));
    let updated = am.update(&txn).await.map_err(ServiceError::db)?;
    if let Some(hash) = new_hash {
        user_credentials::upsert_password(&txn, updated.id, hash, password::ALGORITHM).await?;
        info!(user_id = %updated.id, "password_changed");
    }
    txn.commit().await.map_err(ServiceError::db)?;

    let mut vms = to_vms(db, vec![updated]).await?;
    vms.pop().ok_or_else(|| ServiceError::not_found("user"))
}

/// Sectors offered on the registration form.
pub async fn get_sectors(db: &DatabaseConnection) -> Result<Vec<sector::Model>, ServiceError> {
    Ok(sector::list_visible(db).await?)
}

/// Sign up a company and its first user. Both wait for site administrator approval.
#[instrument(skip(db, dto), fields(email = %dto.email, company = %dto.company_name))]
pub async fn register_user_with_company(db: &DatabaseConnection, dto: RegisterDto, role: Role) -> Result<RegisterVm, ServiceError> {
    if dto.password != dto.confirm_password {
        return Err(ServiceError::Validation("passwords do not match".into()));
    }
    password::validate_password(&dto.password)?;
    let fields = company::CompanyFields {
        name: dto.company_name.clone(),
        email: dto.company_email.clone(),
        phone_number: dto.company_phone_number.clone(),
        sector_id: dto.sector_id,
        number_of_employees: dto.number_of_employees,
    };
    company::validate_fields(&fields)?;
    let s = ensure_sector(db, dto.sector_id).await?;
    ensure_user_name_free(db, &dto.email).await?;
    let hash = password::hash_password(&dto.password)?;

    let profile = app_user::Profile {
        name: dto.name.clone(),
        second_name: dto.second_name.clone(),
        surname: dto.surname.clone(),
        title: dto.title.clone(),
        ..Default::default()
    };

    let txn = db.begin().await.map_err(ServiceError::db)?;
    let c = company::create(&txn, fields, Status::Passive).await?;
    let u = app_user::create(&txn, &dto.email, profile, Some(c.id), Status::Passive).await?;
    user_credentials::upsert_password(&txn, u.id, hash, password::ALGORITHM).await?;
    user_role::assign(&txn, u.id, role).await?;
    txn.commit().await.map_err(ServiceError::db)?;

    info!(user_id = %u.id, company_id = %c.id, "registration_submitted");
    metrics::record_event("registration");
    Ok(register_vm(u, c, Some(s.name)))
}

fn register_vm(u: app_user::Model, c: company::Model, sector_name: Option<String>) -> RegisterVm {
    RegisterVm {
        user_id: u.id,
        full_name: u.full_name(),
        user_name: u.user_name,
        title: u.title,
        company_id: c.id,
        company_name: c.name,
        company_email: c.email,
        company_phone_number: c.phone_number,
        sector_name,
        number_of_employees: c.number_of_employees,
        created_at: u.created_at,
    }
}

/// Signed-in user's details with roles.
pub async fn get_current_user_info(db: &DatabaseConnection, user_name: &str) -> Result<AppUserVm, ServiceError> {
    let u = app_user::find_by_user_name(db, user_name)
        .await?
        .filter(|u| u.status != Status::Deleted)
        .ok_or_else(|| ServiceError::not_found("user"))?;
    let mut vms = to_vms(db, vec![u]).await?;
    vms.pop().ok_or_else(|| ServiceError::not_found("user"))
}

/// Registrations waiting for approval, oldest first.
pub async fn get_all_registrations(db: &DatabaseConnection) -> Result<Vec<RegisterVm>, ServiceError> {
    let users = app_user::Entity::find()
        .filter(app_user::Column::Status.eq(Status::Passive))
        .filter(app_user::Column::CompanyId.is_not_null())
        .order_by_asc(app_user::Column::CreatedAt)
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    let company_ids: Vec<Uuid> = users.iter().filter_map(|u| u.company_id).collect();
    if company_ids.is_empty() {
        return Ok(Vec::new());
    }
    let companies: HashMap<Uuid, (company::Model, Option<sector::Model>)> = company::Entity::find()
        .find_also_related(sector::Entity)
        .filter(company::Column::Id.is_in(company_ids))
        .filter(company::Column::Status.ne(Status::Deleted))
        .all(db)
        .await
        .map_err(ServiceError::db)?
        .into_iter()
        .map(|(c, s)| (c.id, (c, s)))
        .collect();
    Ok(users
        .into_iter()
        .filter_map(|u| {
            let (c, s) = companies.get(&u.company_id?)?.clone();
            Some(register_vm(u, c, s.map(|s| s.name)))
        })
        .collect())
}

async fn find_pending_registration(db: &DatabaseConnection, user_id: Uuid) -> Result<app_user::Model, ServiceError> {
    let u = find_live(db, user_id).await?.ok_or_else(|| ServiceError::not_found("registration"))?;
    if u.status != Status::Passive {
        return Err(ServiceError::Validation("registration was already processed".into()));
    }
    Ok(u)
}

/// Activate a pending user and its pending company.
#[instrument(skip(db))]
pub async fn approve_registration(db: &DatabaseConnection, user_id: Uuid) -> Result<AppUserVm, ServiceError> {
    let u = find_pending_registration(db, user_id).await?;
    let now = Utc::now();
    let txn = db.begin().await.map_err(ServiceError::db)?;
    if let Some(cid) = u.company_id {
        if let Some(c) = company::Entity::find_by_id(cid).one(&txn).await.map_err(ServiceError::db)? {
            if c.status == Status::Passive {
                let mut cam: company::ActiveModel = c.into();
                cam.status = Set(Status::Active);
                cam.updated_at = Set(Some(now.into()));
                cam.update(&txn).await.map_err(ServiceError::db)?;
            }
        }
    }
    let mut am: app_user::ActiveModel = u.into();
    am.status = Set(Status::Active);
    am.updated_at = Set(Some(now.into()));
    let approved = am.update(&txn).await.map_err(ServiceError::db)?;
    txn.commit().await.map_err(ServiceError::db)?;

    info!(user_id = %approved.id, company_id = ?approved.company_id, "registration_approved");
    metrics::record_event("registration_approved");
    let mut vms = to_vms(db, vec![approved]).await?;
    vms.pop().ok_or_else(|| ServiceError::not_found("user"))
}

/// Discard a pending registration: the user and its still-pending company are soft-deleted.
#[instrument(skip(db))]
pub async fn reject_registration(db: &DatabaseConnection, user_id: Uuid) -> Result<(), ServiceError> {
    let u = find_pending_registration(db, user_id).await?;
    let txn = db.begin().await.map_err(ServiceError::db)?;
    if let Some(cid) = u.company_id {
        let pending_company = company::Entity::find_by_id(cid)
            .one(&txn)
            .await
            .map_err(ServiceError::db)?
            .filter(|c| c.status == Status::Passive);
        if pending_company.is_some() {
            company::soft_delete(&txn, cid).await?;
        }
    }
    app_user::soft_delete(&txn, u.id).await?;
    txn.commit().await.map_err(ServiceError::db)?;
    warn!(user_id = %user_id, "registration_rejected");
    metrics::record_event("registration_rejected");
    Ok(())
}
