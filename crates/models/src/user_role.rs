use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::Role;
use crate::{app_user, errors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_role")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: Role,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { AppUser }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::AppUser => Entity::belongs_to(app_user::Entity)
                .from(Column::UserId)
                .to(app_user::Column::Id)
                .into(),
        }
    }
}

impl Related<app_user::Entity> for Entity {
    fn to() -> RelationDef { Relation::AppUser.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Grant `role` to the user; granting an already held role is a no-op.
pub async fn assign<C: ConnectionTrait>(db: &C, user_id: Uuid, role: Role) -> Result<(), errors::ModelError> {
    let held = Entity::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::Role.eq(role))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    if held.is_some() {
        return Ok(());
    }
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        role: Set(role),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(())
}

pub async fn roles_of<C: ConnectionTrait>(db: &C, user_id: Uuid) -> Result<Vec<Role>, errors::ModelError> {
    let rows = Entity::find()
        .filter(Column::UserId.eq(user_id))
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(rows.into_iter().map(|r| r.role).collect())
}

/// Roles for many users at once, keyed by user id.
pub async fn roles_by_user<C: ConnectionTrait>(
    db: &C,
    user_ids: Vec<Uuid>,
) -> Result<std::collections::HashMap<Uuid, Vec<Role>>, errors::ModelError> {
    let mut out: std::collections::HashMap<Uuid, Vec<Role>> = std::collections::HashMap::new();
    if user_ids.is_empty() {
        return Ok(out);
    }
    let rows = Entity::find()
        .filter(Column::UserId.is_in(user_ids))
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    for r in rows {
        out.entry(r.user_id).or_default().push(r.role);
    }
    Ok(out)
}
