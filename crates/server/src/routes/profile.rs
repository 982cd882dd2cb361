use axum::{extract::State, Extension, Json};
use common::types::ActionResult;
use service::{
    app_user_service,
    auth::domain::SessionClaims,
    dto::user::{AppUserUpdateDto, AppUserVm},
};

use crate::errors::JsonApiError;
use super::session::ServerState;

#[utoipa::path(get, path = "/profile", tag = "profile", responses((status = 200, description = "Own profile"), (status = 404, description = "Not Found")))]
pub async fn get(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
) -> Result<Json<AppUserUpdateDto>, JsonApiError> {
    app_user_service::get_by_user_name(&state.db, &claims.user_name)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found("user"))
}

/// Edits always target the caller; `id` in the body is ignored.
#[utoipa::path(put, path = "/profile", tag = "profile", request_body = crate::openapi::ProfileUpdateRequest, responses((status = 200, description = "Updated"), (status = 400, description = "Validation Error")))]
pub async fn update(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
    Json(mut input): Json<AppUserUpdateDto>,
) -> Result<Json<ActionResult<AppUserVm>>, JsonApiError> {
    input.id = claims.user_id;
    let vm = app_user_service::update_user(&state.db, input).await?;
    Ok(Json(ActionResult::new("Profile updated", vm)))
}
