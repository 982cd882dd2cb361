use axum::{extract::{Path, State}, http::StatusCode, Json};
use common::types::ActionResult;
use models::sector;
use service::{app_user_service, dto::sector::SectorDto, sector_service};
use uuid::Uuid;

use crate::errors::JsonApiError;
use super::session::ServerState;

/// Sectors offered on the registration form.
#[utoipa::path(get, path = "/sectors", tag = "sectors", responses((status = 200, description = "OK")))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<sector::Model>>, JsonApiError> {
    Ok(Json(app_user_service::get_sectors(&state.db).await?))
}

#[utoipa::path(post, path = "/admin/sectors", tag = "sectors", request_body = crate::openapi::SectorRequest, responses((status = 201, description = "Created"), (status = 400, description = "Validation Error"), (status = 409, description = "Conflict")))]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<SectorDto>,
) -> Result<(StatusCode, Json<ActionResult<sector::Model>>), JsonApiError> {
    let created = sector_service::create(&state.db, &input.name).await?;
    Ok((StatusCode::CREATED, Json(ActionResult::new("Sector created", created))))
}

#[utoipa::path(put, path = "/admin/sectors/{id}", tag = "sectors", params(("id" = Uuid, Path, description = "Sector ID")), request_body = crate::openapi::SectorRequest, responses((status = 200, description = "Updated"), (status = 404, description = "Not Found"), (status = 409, description = "Conflict")))]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(input): Json<SectorDto>,
) -> Result<Json<ActionResult<sector::Model>>, JsonApiError> {
    let updated = sector_service::update(&state.db, id, &input.name).await?;
    Ok(Json(ActionResult::new("Sector updated", updated)))
}

#[utoipa::path(delete, path = "/admin/sectors/{id}", tag = "sectors", params(("id" = Uuid, Path, description = "Sector ID")), responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found")))]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<ActionResult<Uuid>>, JsonApiError> {
    if !sector_service::delete(&state.db, id).await? {
        return Err(JsonApiError::not_found("sector"));
    }
    Ok(Json(ActionResult::new("Sector deleted", id)))
}
