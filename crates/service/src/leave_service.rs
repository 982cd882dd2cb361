use std::collections::HashMap;

use chrono::Utc;
use common::metrics;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::{info, instrument};
use uuid::Uuid;

use models::{app_user, enums::Status, leave};
use crate::dto::leave::{CreateLeaveDto, LeaveVm, UpdateLeaveDto};
use crate::errors::ServiceError;

/// Full names for a set of user ids.
pub(crate) async fn names_of(db: &DatabaseConnection, ids: Vec<Uuid>) -> Result<HashMap<Uuid, String>, ServiceError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let users = app_user::Entity::find()
        .filter(app_user::Column::Id.is_in(ids))
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    Ok(users.into_iter().map(|u| (u.id, u.full_name())).collect())
}

/// Active account with a company, looked up by login name.
pub(crate) async fn requester(db: &DatabaseConnection, user_name: &str) -> Result<(app_user::Model, Uuid), ServiceError> {
    let u = app_user::find_by_user_name(db, user_name)
        .await?
        .filter(|u| u.status.is_visible())
        .ok_or_else(|| ServiceError::not_found("user"))?;
    let company_id = u.company_id.ok_or_else(|| ServiceError::Validation("user does not belong to a company".into()))?;
    Ok((u, company_id))
}

async fn to_vms(db: &DatabaseConnection, rows: Vec<leave::Model>) -> Result<Vec<LeaveVm>, ServiceError> {
    let ids: Vec<Uuid> = rows.iter().flat_map(|l| std::iter::once(l.app_user_id).chain(l.director_id)).collect();
    let names = names_of(db, ids).await?;
    Ok(rows
        .into_iter()
        .map(|l| LeaveVm {
            id: l.id,
            leave_type: l.leave_type,
            description: l.description,
            start_date: l.start_date,
            end_date: l.end_date,
            number_of_days: l.number_of_days,
            app_user_id: l.app_user_id,
            personal_name: names.get(&l.app_user_id).cloned().unwrap_or_default(),
            company_id: l.company_id,
            director_id: l.director_id,
            director_name: l.director_id.and_then(|d| names.get(&d).cloned()),
            reply_date: l.reply_date,
            status: l.status,
            created_at: l.created_at,
        })
        .collect())
}

/// Leave that the owner has not withdrawn.
async fn find_live(db: &DatabaseConnection, id: Uuid) -> Result<Option<leave::Model>, ServiceError> {
    let found = leave::Entity::find_by_id(id).one(db).await.map_err(ServiceError::db)?;
    Ok(found.filter(|l| l.deleted_at.is_none()))
}

async fn find_pending(db: &DatabaseConnection, id: Uuid) -> Result<leave::Model, ServiceError> {
    let l = find_live(db, id).await?.ok_or_else(|| ServiceError::not_found("leave"))?;
    if l.status != Status::Passive {
        return Err(ServiceError::Validation("leave request was already answered".into()));
    }
    Ok(l)
}

/// File a leave request for the signed-in user; it waits for approval.
#[instrument(skip(db, dto), fields(leave_type = ?dto.leave_type))]
pub async fn create(db: &DatabaseConnection, dto: CreateLeaveDto, user_name: &str) -> Result<LeaveVm, ServiceError> {
    let (u, company_id) = requester(db, user_name).await?;
    let created = leave::create(
        db,
        leave::NewLeave {
            leave_type: dto.leave_type,
            description: dto.description,
            start_date: dto.start_date,
            end_date: dto.end_date,
            app_user_id: u.id,
            company_id,
        },
    )
    .await?;
    info!(leave_id = %created.id, user_id = %u.id, days = created.number_of_days, "leave_requested");
    metrics::record_event("leave_request");
    first(to_vms(db, vec![created]).await?)
}

fn first<T>(mut v: Vec<T>) -> Result<T, ServiceError> {
    v.pop().ok_or_else(|| ServiceError::not_found("leave"))
}

/// Edit a request that is still waiting for an answer. Days are recomputed.
pub async fn update(db: &DatabaseConnection, dto: UpdateLeaveDto) -> Result<LeaveVm, ServiceError> {
    let current = find_pending(db, dto.id).await?;
    let days = leave::validate_period(dto.start_date, dto.end_date)?;
    let description = leave::validate_description(dto.description)?;
    let mut am: leave::ActiveModel = current.into();
    am.leave_type = Set(dto.leave_type);
    am.description = Set(description);
    am.start_date = Set(dto.start_date);
    am.end_date = Set(dto.end_date);
    am.number_of_days = Set(days);
    am.updated_at = Set(Some(Utc::now().into()));
    let updated = am.update(db).await.map_err(ServiceError::db)?;
    first(to_vms(db, vec![updated]).await?)
}

/// Soft-delete a leave. Returns `false` when it does not exist.
pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    Ok(leave::soft_delete(db, id).await?)
}

/// Withdraw a request on behalf of its owner. Approved leaves stay on record.
pub async fn withdraw(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    let Some(l) = find_live(db, id).await? else { return Ok(false) };
    if l.status.is_visible() {
        return Err(ServiceError::Validation("approved leave cannot be withdrawn".into()));
    }
    let withdrawn = leave::soft_delete(db, l.id).await?;
    info!(leave_id = %id, "leave_withdrawn");
    Ok(withdrawn)
}

/// Full name of the employee who requested the leave.
pub async fn get_personal_name(db: &DatabaseConnection, id: Uuid) -> Result<String, ServiceError> {
    let l = find_live(db, id).await?.ok_or_else(|| ServiceError::not_found("leave"))?;
    let names = names_of(db, vec![l.app_user_id]).await?;
    names.get(&l.app_user_id).cloned().ok_or_else(|| ServiceError::not_found("user"))
}

/// Get a leave for editing.
pub async fn get_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<UpdateLeaveDto>, ServiceError> {
    Ok(find_live(db, id).await?.map(UpdateLeaveDto::from))
}

pub async fn get_vm_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<LeaveVm>, ServiceError> {
    match find_live(db, id).await? {
        Some(l) => Ok(Some(first(to_vms(db, vec![l]).await?)?)),
        None => Ok(None),
    }
}

/// All approved leaves across companies.
pub async fn get_leaves(db: &DatabaseConnection) -> Result<Vec<LeaveVm>, ServiceError> {
    let rows = leave::Entity::find()
        .filter(leave::Column::Status.is_in(Status::VISIBLE))
        .order_by_desc(leave::Column::StartDate)
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    to_vms(db, rows).await
}

/// The user's own requests in any state, except those withdrawn.
pub async fn get_personel_leaves(db: &DatabaseConnection, user_name: &str) -> Result<Vec<LeaveVm>, ServiceError> {
    let Some(u) = app_user::find_by_user_name(db, user_name).await? else {
        return Ok(Vec::new());
    };
    let rows = leave::Entity::find()
        .filter(leave::Column::AppUserId.eq(u.id))
        .filter(leave::Column::DeletedAt.is_null())
        .order_by_desc(leave::Column::CreatedAt)
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    to_vms(db, rows).await
}

/// Requests of the company still waiting for an answer.
pub async fn get_leave_requests(db: &DatabaseConnection, company_id: Uuid) -> Result<Vec<LeaveVm>, ServiceError> {
    let rows = leave::Entity::find()
        .filter(
            Condition::all()
                .add(leave::Column::CompanyId.eq(company_id))
                .add(leave::Column::Status.eq(Status::Passive))
                .add(leave::Column::DeletedAt.is_null()),
        )
        .order_by_asc(leave::Column::CreatedAt)
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    to_vms(db, rows).await
}

/// Approved leaves of the company.
pub async fn get_all_leaves(db: &DatabaseConnection, company_id: Uuid) -> Result<Vec<LeaveVm>, ServiceError> {
    let rows = leave::Entity::find()
        .filter(leave::Column::CompanyId.eq(company_id))
        .filter(leave::Column::Status.is_in(Status::VISIBLE))
        .order_by_desc(leave::Column::StartDate)
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    to_vms(db, rows).await
}

async fn answer(db: &DatabaseConnection, id: Uuid, director_id: Uuid, status: Status) -> Result<LeaveVm, ServiceError> {
    let current = find_pending(db, id).await?;
    let now = Utc::now();
    let mut am: leave::ActiveModel = current.into();
    am.status = Set(status);
    am.director_id = Set(Some(director_id));
    am.reply_date = Set(Some(now.into()));
    am.updated_at = Set(Some(now.into()));
    let answered = am.update(db).await.map_err(ServiceError::db)?;
    first(to_vms(db, vec![answered]).await?)
}

#[instrument(skip(db))]
pub async fn approve(db: &DatabaseConnection, id: Uuid, director_id: Uuid) -> Result<LeaveVm, ServiceError> {
    let vm = answer(db, id, director_id, Status::Active).await?;
    info!(leave_id = %id, %director_id, "leave_approved");
    metrics::record_event("leave_approved");
    Ok(vm)
}

/// Rejected requests stay visible to their owner with status `Deleted`.
#[instrument(skip(db))]
pub async fn reject(db: &DatabaseConnection, id: Uuid, director_id: Uuid) -> Result<LeaveVm, ServiceError> {
    let vm = answer(db, id, director_id, Status::Deleted).await?;
    info!(leave_id = %id, %director_id, "leave_rejected");
    metrics::record_event("leave_rejected");
    Ok(vm)
}
