use axum::{extract::{Path, Query, State}, http::StatusCode, Extension, Json};
use common::{pagination::Pagination, types::ActionResult};
use serde::Deserialize;
use service::{
    app_user_service,
    auth::domain::SessionClaims,
    company_service,
    dto::{company::CompanyVm, user::{AppUserVm, RegisterVm}},
};
use tracing::info;
use uuid::Uuid;

use crate::errors::JsonApiError;
use super::session::ServerState;

/// Optional paging; without `page` or `per_page` the whole list is returned.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListQuery {
    fn pagination(&self) -> Option<Pagination> {
        if self.page.is_none() && self.per_page.is_none() {
            return None;
        }
        let defaults = Pagination::default();
        Some(Pagination {
            page: self.page.unwrap_or(defaults.page),
            per_page: self.per_page.unwrap_or(defaults.per_page),
        })
    }
}

#[utoipa::path(get, path = "/admin/registrations", tag = "admin", responses((status = 200, description = "Pending registrations")))]
pub async fn list_registrations(State(state): State<ServerState>) -> Result<Json<Vec<RegisterVm>>, JsonApiError> {
    Ok(Json(app_user_service::get_all_registrations(&state.db).await?))
}

#[utoipa::path(post, path = "/admin/registrations/{id}/approve", tag = "admin", params(("id" = Uuid, Path, description = "Registered user ID")), responses((status = 200, description = "Approved"), (status = 400, description = "Already processed"), (status = 404, description = "Not Found")))]
pub async fn approve_registration(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ActionResult<AppUserVm>>, JsonApiError> {
    let vm = app_user_service::approve_registration(&state.db, id).await?;
    Ok(Json(ActionResult::new("Registration approved", vm)))
}

#[utoipa::path(post, path = "/admin/registrations/{id}/reject", tag = "admin", params(("id" = Uuid, Path, description = "Registered user ID")), responses((status = 200, description = "Rejected"), (status = 400, description = "Already processed"), (status = 404, description = "Not Found")))]
pub async fn reject_registration(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ActionResult<Uuid>>, JsonApiError> {
    app_user_service::reject_registration(&state.db, id).await?;
    Ok(Json(ActionResult::new("Registration rejected", id)))
}

#[utoipa::path(get, path = "/admin/companies", tag = "admin", params(ListQuery), responses((status = 200, description = "Companies")))]
pub async fn list_companies(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<CompanyVm>>, JsonApiError> {
    let list = match q.pagination() {
        Some(p) => company_service::get_all_paginated(&state.db, p).await?,
        None => company_service::get_all(&state.db).await?,
    };
    info!(count = list.len(), "list companies");
    Ok(Json(list))
}

#[utoipa::path(delete, path = "/admin/companies/{id}", tag = "admin", params(("id" = Uuid, Path, description = "Company ID")), responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found")))]
pub async fn delete_company(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<ActionResult<Uuid>>, JsonApiError> {
    if !company_service::delete(&state.db, id).await? {
        return Err(JsonApiError::not_found("company"));
    }
    Ok(Json(ActionResult::new("Company deleted", id)))
}

#[utoipa::path(get, path = "/admin/users", tag = "admin", params(ListQuery), responses((status = 200, description = "Users")))]
pub async fn list_users(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<AppUserVm>>, JsonApiError> {
    let list = match q.pagination() {
        Some(p) => app_user_service::get_all_users_paginated(&state.db, p).await?,
        None => app_user_service::get_all_users(&state.db).await?,
    };
    info!(count = list.len(), "list users");
    Ok(Json(list))
}

#[utoipa::path(delete, path = "/admin/users/{id}", tag = "admin", params(("id" = Uuid, Path, description = "User ID")), responses((status = 200, description = "Deleted"), (status = 400, description = "Own account"), (status = 404, description = "Not Found")))]
pub async fn delete_user(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<ActionResult<Uuid>>, JsonApiError> {
    if id == claims.user_id {
        return Err(JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some("cannot delete your own account".into())));
    }
    if !app_user_service::delete(&state.db, id).await? {
        return Err(JsonApiError::not_found("user"));
    }
    Ok(Json(ActionResult::new("User deleted", id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paging_only_when_requested() {
        assert!(ListQuery::default().pagination().is_none());
        let p = ListQuery { page: Some(2), per_page: None }.pagination().unwrap();
        assert_eq!((p.page, p.per_page), (2, 20));
    }
}
