use axum::{extract::{Path, State}, http::StatusCode, Extension, Json};
use common::types::ActionResult;
use service::{
    auth::domain::SessionClaims,
    cash_advance_service,
    dto::cash_advance::{CashAdvanceCreateDto, CashAdvanceUpdateDto, CashAdvanceVm},
};
use uuid::Uuid;

use crate::errors::JsonApiError;
use super::session::ServerState;

async fn own(state: &ServerState, claims: &SessionClaims, id: Uuid) -> Result<CashAdvanceVm, JsonApiError> {
    cash_advance_service::get_vm_by_id(&state.db, id)
        .await?
        .filter(|c| c.advance_to_id == claims.user_id)
        .ok_or_else(|| JsonApiError::not_found("cash advance"))
}

#[utoipa::path(get, path = "/cash-advances", tag = "cash-advances", responses((status = 200, description = "Own cash advances")))]
pub async fn list(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
) -> Result<Json<Vec<CashAdvanceVm>>, JsonApiError> {
    Ok(Json(cash_advance_service::get_personel_cash_advances(&state.db, &claims.user_name).await?))
}

#[utoipa::path(post, path = "/cash-advances", tag = "cash-advances", request_body = crate::openapi::CashAdvanceRequest, responses((status = 201, description = "Requested"), (status = 400, description = "Validation Error")))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
    Json(input): Json<CashAdvanceCreateDto>,
) -> Result<(StatusCode, Json<ActionResult<CashAdvanceVm>>), JsonApiError> {
    let vm = cash_advance_service::create(&state.db, input, &claims.user_name).await?;
    Ok((StatusCode::CREATED, Json(ActionResult::new("Cash advance request sent for approval", vm))))
}

#[utoipa::path(get, path = "/cash-advances/{id}", tag = "cash-advances", params(("id" = Uuid, Path, description = "Cash advance ID")), responses((status = 200, description = "OK"), (status = 404, description = "Not Found")))]
pub async fn get(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<CashAdvanceVm>, JsonApiError> {
    Ok(Json(own(&state, &claims, id).await?))
}

#[utoipa::path(put, path = "/cash-advances/{id}", tag = "cash-advances", params(("id" = Uuid, Path, description = "Cash advance ID")), request_body = crate::openapi::CashAdvanceRequest, responses((status = 200, description = "Updated"), (status = 400, description = "Validation Error"), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
    Path(id): Path<Uuid>,
    Json(input): Json<CashAdvanceCreateDto>,
) -> Result<Json<ActionResult<CashAdvanceVm>>, JsonApiError> {
    own(&state, &claims, id).await?;
    let dto = CashAdvanceUpdateDto {
        id,
        description: input.description,
        requested_amount: input.requested_amount,
        final_date_request: input.final_date_request,
    };
    let vm = cash_advance_service::update(&state.db, dto).await?;
    Ok(Json(ActionResult::new("Cash advance request updated", vm)))
}

#[utoipa::path(delete, path = "/cash-advances/{id}", tag = "cash-advances", params(("id" = Uuid, Path, description = "Cash advance ID")), responses((status = 200, description = "Withdrawn"), (status = 400, description = "Already approved"), (status = 404, description = "Not Found")))]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<ActionResult<Uuid>>, JsonApiError> {
    own(&state, &claims, id).await?;
    cash_advance_service::withdraw(&state.db, id).await?;
    Ok(Json(ActionResult::new("Cash advance request deleted", id)))
}
