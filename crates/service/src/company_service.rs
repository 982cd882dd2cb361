use chrono::Utc;
use common::pagination::Pagination;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use models::{app_user, company, enums::Status, sector};
use crate::dto::company::{CompanyUpdateDto, CompanyVm};
use crate::errors::ServiceError;

/// Visible, existing sector or a validation error.
pub(crate) async fn ensure_sector(db: &impl sea_orm::ConnectionTrait, sector_id: Uuid) -> Result<sector::Model, ServiceError> {
    sector::Entity::find_by_id(sector_id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .filter(|s| s.status.is_visible())
        .ok_or_else(|| ServiceError::Validation("unknown sector".into()))
}

async fn find_live(db: &DatabaseConnection, id: Uuid) -> Result<Option<company::Model>, ServiceError> {
    let found = company::Entity::find_by_id(id).one(db).await.map_err(ServiceError::db)?;
    Ok(found.filter(|c| c.status != Status::Deleted))
}

/// The company when it exists and is visible; `Forbidden` otherwise.
pub async fn ensure_active(db: &impl sea_orm::ConnectionTrait, id: Uuid) -> Result<company::Model, ServiceError> {
    company::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .filter(|c| c.status.is_visible())
        .ok_or_else(|| ServiceError::Forbidden("company is not active".into()))
}

/// Get a company for editing.
pub async fn get_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<CompanyUpdateDto>, ServiceError> {
    Ok(find_live(db, id).await?.map(CompanyUpdateDto::from))
}

/// Get a company with its sector name.
pub async fn get_vm_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<CompanyVm>, ServiceError> {
    let Some(c) = find_live(db, id).await? else { return Ok(None) };
    let sector_name = sector::Entity::find_by_id(c.sector_id).one(db).await.map_err(ServiceError::db)?.map(|s| s.name);
    Ok(Some(CompanyVm::new(c, sector_name)))
}

/// Overwrite the company details; the company must exist.
pub async fn update(db: &DatabaseConnection, dto: CompanyUpdateDto) -> Result<CompanyVm, ServiceError> {
    let fields = dto.fields();
    company::validate_fields(&fields)?;
    let current = find_live(db, dto.id).await?.ok_or_else(|| ServiceError::not_found("company"))?;
    let s = ensure_sector(db, fields.sector_id).await?;

    let mut am: company::ActiveModel = current.into();
    am.name = Set(fields.name.trim().to_string());
    am.email = Set(fields.email.trim().to_string());
    am.phone_number = Set(fields.phone_number.trim().to_string());
    am.sector_id = Set(fields.sector_id);
    am.number_of_employees = Set(fields.number_of_employees);
    am.status = Set(Status::Modified);
    am.updated_at = Set(Some(Utc::now().into()));
    let updated = am.update(db).await.map_err(ServiceError::db)?;
    info!(company_id = %updated.id, "company_updated");
    Ok(CompanyVm::new(updated, Some(s.name)))
}

/// Visible companies with their sector name.
pub async fn get_all(db: &DatabaseConnection) -> Result<Vec<CompanyVm>, ServiceError> {
    let rows = company::Entity::find()
        .find_also_related(sector::Entity)
        .filter(company::Column::Status.is_in(Status::VISIBLE))
        .order_by_asc(company::Column::Name)
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    Ok(rows.into_iter().map(|(c, s)| CompanyVm::new(c, s.map(|s| s.name))).collect())
}

/// Visible companies, one page at a time.
pub async fn get_all_paginated(db: &DatabaseConnection, opts: Pagination) -> Result<Vec<CompanyVm>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    let rows = company::Entity::find()
        .find_also_related(sector::Entity)
        .filter(company::Column::Status.is_in(Status::VISIBLE))
        .order_by_asc(company::Column::Name)
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(ServiceError::db)?;
    Ok(rows.into_iter().map(|(c, s)| CompanyVm::new(c, s.map(|s| s.name))).collect())
}

/// Soft-delete a company together with its users. Returns `false` when it does not exist.
pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    let txn = db.begin().await.map_err(ServiceError::db)?;
    if !company::soft_delete(&txn, id).await? {
        txn.rollback().await.map_err(ServiceError::db)?;
        return Ok(false);
    }
    let users = app_user::Entity::find()
        .filter(app_user::Column::CompanyId.eq(id))
        .filter(app_user::Column::Status.ne(Status::Deleted))
        .all(&txn)
        .await
        .map_err(ServiceError::db)?;
    for u in &users {
        app_user::soft_delete(&txn, u.id).await?;
    }
    txn.commit().await.map_err(ServiceError::db)?;
    info!(company_id = %id, users = users.len(), "company_deleted");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, seed_company, seed_sector, seed_user};
    use models::enums::Role;

    #[tokio::test]
    async fn company_update_and_list() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let c = seed_company(&db).await?;
        let other_sector = seed_sector(&db).await?;

        let mut dto = get_by_id(&db, c.id).await?.unwrap();
        dto.name = "Acme Holding".into();
        dto.sector_id = other_sector.id;
        dto.number_of_employees = 40;
        let vm = update(&db, dto.clone()).await?;
        assert_eq!(vm.status, Status::Modified);
        assert!(vm.updated_at.is_some());
        assert_eq!(vm.sector_name.as_deref(), Some(other_sector.name.as_str()));

        assert_eq!(ensure_active(&db, c.id).await?.name, "Acme Holding");
        assert!(matches!(ensure_active(&db, Uuid::new_v4()).await, Err(ServiceError::Forbidden(_))));

        let all = get_all(&db).await?;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Acme Holding");
        assert_eq!(get_all_paginated(&db, Pagination { page: 2, per_page: 1 }).await?.len(), 0);

        let missing = CompanyUpdateDto { id: Uuid::new_v4(), ..dto.clone() };
        assert!(matches!(update(&db, missing).await, Err(ServiceError::NotFound(_))));

        let bad_phone = CompanyUpdateDto { phone_number: "x".into(), ..dto };
        let err = update(&db, bad_phone).await.unwrap_err();
        assert!(err.is_validation());
        Ok(())
    }

    #[tokio::test]
    async fn delete_company_cascades_to_users() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let c = seed_company(&db).await?;
        let u = seed_user(&db, "staff@acme.com", Some(c.id), Role::Employee).await?;

        assert!(delete(&db, c.id).await?);
        assert!(get_by_id(&db, c.id).await?.is_none());
        assert!(get_all(&db).await?.is_empty());
        let user = app_user::Entity::find_by_id(u.id).one(&db).await?.unwrap();
        assert_eq!(user.status, Status::Deleted);
        assert!(matches!(ensure_active(&db, c.id).await, Err(ServiceError::Forbidden(_))));

        assert!(!delete(&db, Uuid::new_v4()).await?);
        Ok(())
    }
}
