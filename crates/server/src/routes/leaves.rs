use axum::{extract::{Path, State}, http::StatusCode, Extension, Json};
use common::types::ActionResult;
use service::{
    auth::domain::SessionClaims,
    dto::leave::{CreateLeaveDto, LeaveVm, UpdateLeaveDto},
    leave_service,
};
use uuid::Uuid;

use crate::errors::JsonApiError;
use super::session::ServerState;

/// A leave of the caller; someone else's answers 404.
async fn own(state: &ServerState, claims: &SessionClaims, id: Uuid) -> Result<LeaveVm, JsonApiError> {
    leave_service::get_vm_by_id(&state.db, id)
        .await?
        .filter(|l| l.app_user_id == claims.user_id)
        .ok_or_else(|| JsonApiError::not_found("leave"))
}

#[utoipa::path(get, path = "/leaves", tag = "leaves", responses((status = 200, description = "Own leaves")))]
pub async fn list(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
) -> Result<Json<Vec<LeaveVm>>, JsonApiError> {
    Ok(Json(leave_service::get_personel_leaves(&state.db, &claims.user_name).await?))
}

#[utoipa::path(post, path = "/leaves", tag = "leaves", request_body = crate::openapi::LeaveRequest, responses((status = 201, description = "Requested"), (status = 400, description = "Validation Error")))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
    Json(input): Json<CreateLeaveDto>,
) -> Result<(StatusCode, Json<ActionResult<LeaveVm>>), JsonApiError> {
    let vm = leave_service::create(&state.db, input, &claims.user_name).await?;
    Ok((StatusCode::CREATED, Json(ActionResult::new("Leave request sent for approval", vm))))
}

#[utoipa::path(get, path = "/leaves/{id}", tag = "leaves", params(("id" = Uuid, Path, description = "Leave ID")), responses((status = 200, description = "OK"), (status = 404, description = "Not Found")))]
pub async fn get(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<LeaveVm>, JsonApiError> {
    Ok(Json(own(&state, &claims, id).await?))
}

#[utoipa::path(put, path = "/leaves/{id}", tag = "leaves", params(("id" = Uuid, Path, description = "Leave ID")), request_body = crate::openapi::LeaveRequest, responses((status = 200, description = "Updated"), (status = 400, description = "Validation Error"), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
    Path(id): Path<Uuid>,
    Json(input): Json<CreateLeaveDto>,
) -> Result<Json<ActionResult<LeaveVm>>, JsonApiError> {
    own(&state, &claims, id).await?;
    let dto = UpdateLeaveDto {
        id,
        leave_type: input.leave_type,
        description: input.description,
        start_date: input.start_date,
        end_date: input.end_date,
    };
    let vm = leave_service::update(&state.db, dto).await?;
    Ok(Json(ActionResult::new("Leave request updated", vm)))
}

#[utoipa::path(delete, path = "/leaves/{id}", tag = "leaves", params(("id" = Uuid, Path, description = "Leave ID")), responses((status = 200, description = "Withdrawn"), (status = 400, description = "Already approved"), (status = 404, description = "Not Found")))]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<ActionResult<Uuid>>, JsonApiError> {
    own(&state, &claims, id).await?;
    leave_service::withdraw(&state.db, id).await?;
    Ok(Json(ActionResult::new("Leave request deleted", id)))
}
