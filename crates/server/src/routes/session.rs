use axum::{
    extract::{Request, State},
    http::{header, Method},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use models::enums::Role;
use sea_orm::DatabaseConnection;
use service::{
    app_user_service,
    auth::{domain::SessionClaims, service::AuthConfig, token},
};
use uuid::Uuid;

use crate::errors::JsonApiError;

pub const AUTH_COOKIE: &str = "auth_token";

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: AuthConfig,
    /// Set the `Secure` flag on the session cookie.
    pub secure_cookie: bool,
}

impl ServerState {
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        let mut cookie = Cookie::new(AUTH_COOKIE, token);
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_secure(self.secure_cookie);
        cookie.set_same_site(SameSite::Lax);
        cookie
    }
}

fn is_public(path: &str, method: &Method) -> bool {
    method == Method::OPTIONS
        || path == "/health"
        || path == "/metrics"
        || path == "/sectors"
        || path == "/auth/login"
        || path == "/auth/register"
        || path == "/auth/logout"
        || path.starts_with("/api-docs")
}

/// Token from `Authorization: Bearer <token>`, else from the `auth_token` cookie.
fn extract_token(req: &Request) -> Result<Option<String>, JsonApiError> {
    if let Some(h) = req.headers().get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        return match h.strip_prefix("Bearer ") {
            Some(t) if !t.trim().is_empty() => Ok(Some(t.trim().to_string())),
            _ => Err(JsonApiError::unauthorized("expected Authorization: Bearer <token>")),
        };
    }
    let jar = CookieJar::from_headers(req.headers());
    Ok(jar.get(AUTH_COOKIE).map(|c| c.value().to_string()).filter(|t| !t.is_empty()))
}

/// Global middleware: every non-public route needs a valid session token whose
/// account (and company) is still active. The verified [`SessionClaims`] are put
/// into request extensions.
pub async fn require_bearer_token_state(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_string();
    if is_public(&path, req.method()) {
        return Ok(next.run(req).await);
    }

    let Some(token) = extract_token(&req)? else {
        tracing::warn!(path = %path, "missing Authorization header and auth_token cookie");
        return Err(JsonApiError::unauthorized("sign in required"));
    };
    let claims = match token::verify(&state.auth.jwt_secret, &token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!(path = %path, err = %e, "token validation failed");
            return Err(JsonApiError::unauthorized("invalid or expired session"));
        }
    };
    // Deleted accounts and accounts of deleted companies lose their sessions
    if let Err(e) = app_user_service::ensure_session_active(&state.db, claims.user_id).await {
        tracing::warn!(path = %path, user_id = %claims.user_id, err = %e, "session_account_inactive");
        return Err(e.into());
    }
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

fn claims_with_role(req: &Request, role: Role) -> Result<(), JsonApiError> {
    let claims = req
        .extensions()
        .get::<SessionClaims>()
        .ok_or_else(|| JsonApiError::unauthorized("sign in required"))?;
    if !claims.has_role(role) {
        tracing::warn!(user_id = %claims.user_id, required = ?role, "role_denied");
        return Err(JsonApiError::forbidden(format!("{} role required", role.display_name())));
    }
    Ok(())
}

pub async fn require_site_admin(req: Request, next: Next) -> Result<Response, JsonApiError> {
    claims_with_role(&req, Role::SiteAdministrator)?;
    Ok(next.run(req).await)
}

pub async fn require_company_admin(req: Request, next: Next) -> Result<Response, JsonApiError> {
    claims_with_role(&req, Role::CompanyAdministrator)?;
    Ok(next.run(req).await)
}

/// Company the caller belongs to.
pub fn company_of(claims: &SessionClaims) -> Result<Uuid, JsonApiError> {
    claims.company_id.ok_or_else(|| JsonApiError::forbidden("account is not attached to a company"))
}
