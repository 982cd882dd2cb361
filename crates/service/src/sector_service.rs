use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::info;
use uuid::Uuid;

use models::{enums::Status, sector};
use crate::errors::ServiceError;

async fn find_by_name(db: &DatabaseConnection, name: &str) -> Result<Option<sector::Model>, ServiceError> {
    sector::Entity::find()
        .filter(sector::Column::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(ServiceError::db)
}

/// Create a sector. A previously deleted sector with the same name is restored.
pub async fn create(db: &DatabaseConnection, name: &str) -> Result<sector::Model, ServiceError> {
    sector::validate_name(name)?;
    match find_by_name(db, name).await? {
        Some(existing) if existing.status == Status::Deleted => {
            let mut am: sector::ActiveModel = existing.into();
            am.status = Set(Status::Active);
            am.deleted_at = Set(None);
            am.updated_at = Set(Some(Utc::now().into()));
            let restored = am.update(db).await.map_err(ServiceError::db)?;
            info!(sector_id = %restored.id, "sector_restored");
            Ok(restored)
        }
        Some(_) => Err(ServiceError::Conflict(format!("sector '{}' already exists", name.trim()))),
        None => {
            let created = sector::create(db, name).await?;
            info!(sector_id = %created.id, name = %created.name, "sector_created");
            Ok(created)
        }
    }
}

/// Visible sectors ordered by name.
pub async fn get_all(db: &DatabaseConnection) -> Result<Vec<sector::Model>, ServiceError> {
    Ok(sector::list_visible(db).await?)
}

/// Get a visible sector by id.
pub async fn get_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<sector::Model>, ServiceError> {
    let found = sector::Entity::find_by_id(id).one(db).await.map_err(ServiceError::db)?;
    Ok(found.filter(|s| s.status.is_visible()))
}

/// Rename a sector.
pub async fn update(db: &DatabaseConnection, id: Uuid, name: &str) -> Result<sector::Model, ServiceError> {
    sector::validate_name(name)?;
    let current = get_by_id(db, id).await?.ok_or_else(|| ServiceError::not_found("sector"))?;
    if let Some(other) = find_by_name(db, name).await? {
        if other.id != id {
            return Err(ServiceError::Conflict(format!("sector '{}' already exists", name.trim())));
        }
    }
    let mut am: sector::ActiveModel = current.into();
    am.name = Set(name.trim().to_string());
    am.status = Set(Status::Modified);
    am.updated_at = Set(Some(Utc::now().into()));
    let updated = am.update(db).await.map_err(ServiceError::db)?;
    Ok(updated)
}

/// Soft-delete a sector. Returns `false` when it does not exist.
pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    let deleted = sector::soft_delete(db, id).await?;
    if deleted {
        info!(sector_id = %id, "sector_deleted");
    }
    Ok(deleted)
}
