use axum::{extract::State, http::StatusCode, Extension, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::{DateTime, Utc};
use common::types::ActionResult;
use models::enums::Role;
use serde::Serialize;
use service::{
    app_user_service,
    auth::{domain::SessionClaims, token},
    dto::user::{AppUserVm, LoginDto, RegisterDto, RegisterVm},
};
use uuid::Uuid;

use crate::errors::JsonApiError;
use super::session::{ServerState, AUTH_COOKIE};

#[derive(Serialize)]
pub struct LoginOutput {
    pub user_id: Uuid,
    pub user_name: String,
    pub full_name: String,
    pub company_id: Option<Uuid>,
    pub roles: Vec<Role>,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Company sign-up; the new company and its administrator wait for approval.
#[utoipa::path(post, path = "/auth/register", tag = "auth", request_body = crate::openapi::RegisterRequest, responses((status = 201, description = "Registered, pending approval"), (status = 400, description = "Validation Error"), (status = 409, description = "Conflict")))]
pub async fn register(
    State(state): State<ServerState>,
    Json(input): Json<RegisterDto>,
) -> Result<(StatusCode, Json<ActionResult<RegisterVm>>), JsonApiError> {
    let vm = app_user_service::register_user_with_company(&state.db, input, Role::CompanyAdministrator).await?;
    let msg = "Registration received. You can sign in once a site administrator approves it.";
    Ok((StatusCode::CREATED, Json(ActionResult::new(msg, vm))))
}

#[utoipa::path(post, path = "/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged In"), (status = 401, description = "Unauthorized"), (status = 403, description = "Account Inactive")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<LoginDto>,
) -> Result<(CookieJar, Json<LoginOutput>), JsonApiError> {
    let session = app_user_service::login(&state.db, &state.auth, input).await?;
    let jar = jar.add(state.session_cookie(session.token.clone()));
    let user = session.user;
    let out = LoginOutput {
        user_id: user.id,
        user_name: user.user_name,
        full_name: user.full_name,
        company_id: user.company_id,
        roles: user.roles,
        token: session.token,
        expires_at: session.expires_at,
    };
    Ok((jar, Json(out)))
}

#[utoipa::path(post, path = "/auth/logout", tag = "auth", responses((status = 200, description = "Logged Out")))]
pub async fn logout(State(state): State<ServerState>, jar: CookieJar) -> (CookieJar, Json<ActionResult<()>>) {
    if let Some(claims) = jar.get(AUTH_COOKIE).and_then(|c| token::verify(&state.auth.jwt_secret, c.value()).ok()) {
        app_user_service::logout(&claims.user_name);
    }
    let mut removal = Cookie::from(AUTH_COOKIE);
    removal.set_path("/");
    (jar.remove(removal), Json(ActionResult::new("Signed out", ())))
}

#[utoipa::path(get, path = "/auth/me", tag = "auth", responses((status = 200, description = "Current user"), (status = 401, description = "Unauthorized")))]
pub async fn me(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
) -> Result<Json<AppUserVm>, JsonApiError> {
    let vm = app_user_service::get_current_user_info(&state.db, &claims.user_name).await?;
    Ok(Json(vm))
}
