//! Company administrator screens: the own company, its employees and the
//! approval queues for leave and cash-advance requests.
//!
//! Every record is checked against the caller's company; a foreign record
//! answers 404 exactly like a missing one.

use axum::{extract::{Path, State}, http::StatusCode, Extension, Json};
use common::types::ActionResult;
use models::enums::Role;
use service::{
    app_user_service, cash_advance_service, company_service,
    auth::domain::SessionClaims,
    dto::{
        cash_advance::{ApproveCashAdvanceDto, CashAdvanceVm},
        company::{CompanyUpdateDto, CompanyVm},
        leave::LeaveVm,
        user::{AppUserCreateDto, AppUserVm},
    },
    leave_service,
};
use uuid::Uuid;

use crate::errors::JsonApiError;
use super::session::{company_of, ServerState};

#[utoipa::path(get, path = "/company", tag = "company", responses((status = 200, description = "Own company"), (status = 404, description = "Not Found")))]
pub async fn get(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
) -> Result<Json<CompanyVm>, JsonApiError> {
    let cid = company_of(&claims)?;
    company_service::get_vm_by_id(&state.db, cid)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found("company"))
}

#[utoipa::path(put, path = "/company", tag = "company", request_body = crate::openapi::CompanyUpdateRequest, responses((status = 200, description = "Updated"), (status = 400, description = "Validation Error"), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
    Json(mut input): Json<CompanyUpdateDto>,
) -> Result<Json<ActionResult<CompanyVm>>, JsonApiError> {
    input.id = company_of(&claims)?;
    let vm = company_service::update(&state.db, input).await?;
    Ok(Json(ActionResult::new("Company information updated", vm)))
}

#[utoipa::path(get, path = "/company/employees", tag = "company", responses((status = 200, description = "Employees")))]
pub async fn list_employees(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
) -> Result<Json<Vec<AppUserVm>>, JsonApiError> {
    let cid = company_of(&claims)?;
    Ok(Json(app_user_service::get_company_users(&state.db, cid).await?))
}

#[utoipa::path(post, path = "/company/employees", tag = "company", request_body = crate::openapi::EmployeeCreateRequest, responses((status = 201, description = "Created"), (status = 400, description = "Validation Error"), (status = 409, description = "Conflict")))]
pub async fn create_employee(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
    Json(input): Json<AppUserCreateDto>,
) -> Result<(StatusCode, Json<ActionResult<AppUserVm>>), JsonApiError> {
    let cid = company_of(&claims)?;
    let vm = app_user_service::create_user(&state.db, input, Role::Employee, Some(cid)).await?;
    Ok((StatusCode::CREATED, Json(ActionResult::new("Employee added", vm))))
}

#[utoipa::path(delete, path = "/company/employees/{id}", tag = "company", params(("id" = Uuid, Path, description = "User ID")), responses((status = 200, description = "Deleted"), (status = 400, description = "Own account"), (status = 404, description = "Not Found")))]
pub async fn delete_employee(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<ActionResult<Uuid>>, JsonApiError> {
    let cid = company_of(&claims)?;
    if id == claims.user_id {
        return Err(JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some("cannot delete your own account".into())));
    }
    if !app_user_service::is_company_member(&state.db, id, cid).await? {
        return Err(JsonApiError::not_found("user"));
    }
    app_user_service::delete(&state.db, id).await?;
    Ok(Json(ActionResult::new("Employee deleted", id)))
}

async fn own_leave(state: &ServerState, cid: Uuid, id: Uuid) -> Result<LeaveVm, JsonApiError> {
    leave_service::get_vm_by_id(&state.db, id)
        .await?
        .filter(|l| l.company_id == cid)
        .ok_or_else(|| JsonApiError::not_found("leave"))
}

#[utoipa::path(get, path = "/company/leaves", tag = "company", responses((status = 200, description = "Approved leaves")))]
pub async fn list_leaves(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
) -> Result<Json<Vec<LeaveVm>>, JsonApiError> {
    let cid = company_of(&claims)?;
    Ok(Json(leave_service::get_all_leaves(&state.db, cid).await?))
}

#[utoipa::path(get, path = "/company/leave-requests", tag = "company", responses((status = 200, description = "Pending leave requests")))]
pub async fn list_leave_requests(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
) -> Result<Json<Vec<LeaveVm>>, JsonApiError> {
    let cid = company_of(&claims)?;
    Ok(Json(leave_service::get_leave_requests(&state.db, cid).await?))
}

#[utoipa::path(post, path = "/company/leaves/{id}/approve", tag = "company", params(("id" = Uuid, Path, description = "Leave ID")), responses((status = 200, description = "Approved"), (status = 400, description = "Not pending"), (status = 404, description = "Not Found")))]
pub async fn approve_leave(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<ActionResult<LeaveVm>>, JsonApiError> {
    own_leave(&state, company_of(&claims)?, id).await?;
    let vm = leave_service::approve(&state.db, id, claims.user_id).await?;
    Ok(Json(ActionResult::new("Leave request approved", vm)))
}

#[utoipa::path(post, path = "/company/leaves/{id}/reject", tag = "company", params(("id" = Uuid, Path, description = "Leave ID")), responses((status = 200, description = "Rejected"), (status = 400, description = "Not pending"), (status = 404, description = "Not Found")))]
pub async fn reject_leave(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<ActionResult<LeaveVm>>, JsonApiError> {
    own_leave(&state, company_of(&claims)?, id).await?;
    let vm = leave_service::reject(&state.db, id, claims.user_id).await?;
    Ok(Json(ActionResult::new("Leave request rejected", vm)))
}

async fn own_cash_advance(state: &ServerState, cid: Uuid, id: Uuid) -> Result<CashAdvanceVm, JsonApiError> {
    cash_advance_service::get_vm_by_id(&state.db, id)
        .await?
        .filter(|c| c.company_id == cid)
        .ok_or_else(|| JsonApiError::not_found("cash advance"))
}

#[utoipa::path(get, path = "/company/cash-advances", tag = "company", responses((status = 200, description = "Approved cash advances")))]
pub async fn list_cash_advances(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
) -> Result<Json<Vec<CashAdvanceVm>>, JsonApiError> {
    let cid = company_of(&claims)?;
    Ok(Json(cash_advance_service::get_all_cash_advances(&state.db, cid).await?))
}

#[utoipa::path(get, path = "/company/cash-advance-requests", tag = "company", responses((status = 200, description = "Pending cash advance requests")))]
pub async fn list_cash_advance_requests(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
) -> Result<Json<Vec<CashAdvanceVm>>, JsonApiError> {
    let cid = company_of(&claims)?;
    Ok(Json(cash_advance_service::get_cash_advance_requests(&state.db, cid).await?))
}

#[utoipa::path(post, path = "/company/cash-advances/{id}/approve", tag = "company", params(("id" = Uuid, Path, description = "Cash advance ID")), request_body = crate::openapi::ApproveCashAdvanceRequest, responses((status = 200, description = "Approved"), (status = 400, description = "Validation Error"), (status = 404, description = "Not Found")))]
pub async fn approve_cash_advance(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
    Path(id): Path<Uuid>,
    Json(input): Json<ApproveCashAdvanceDto>,
) -> Result<Json<ActionResult<CashAdvanceVm>>, JsonApiError> {
    own_cash_advance(&state, company_of(&claims)?, id).await?;
    let vm = cash_advance_service::approve(&state.db, id, claims.user_id, input.approved_amount).await?;
    Ok(Json(ActionResult::new("Cash advance approved", vm)))
}

#[utoipa::path(post, path = "/company/cash-advances/{id}/reject", tag = "company", params(("id" = Uuid, Path, description = "Cash advance ID")), responses((status = 200, description = "Rejected"), (status = 400, description = "Not pending"), (status = 404, description = "Not Found")))]
pub async fn reject_cash_advance(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<ActionResult<CashAdvanceVm>>, JsonApiError> {
    own_cash_advance(&state, company_of(&claims)?, id).await?;
    let vm = cash_advance_service::reject(&state.db, id, claims.user_id).await?;
    Ok(Json(ActionResult::new("Cash advance rejected", vm)))
}

#[utoipa::path(post, path = "/company/cash-advances/{id}/pay", tag = "company", params(("id" = Uuid, Path, description = "Cash advance ID")), responses((status = 200, description = "Marked paid"), (status = 400, description = "Not approved"), (status = 404, description = "Not Found")))]
pub async fn pay_cash_advance(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<ActionResult<CashAdvanceVm>>, JsonApiError> {
    own_cash_advance(&state, company_of(&claims)?, id).await?;
    let vm = cash_advance_service::mark_paid(&state.db, id).await?;
    Ok(Json(ActionResult::new("Cash advance marked as paid", vm)))
}
