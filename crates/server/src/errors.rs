use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use service::auth::errors::AuthError;
use service::errors::ServiceError;

/// Error body in JSON:API shape: `{"errors": [{"status", "title", "detail"}]}`.
#[derive(Debug, Clone, Serialize)]
pub struct JsonApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub title: String,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: impl Into<String>, detail: Option<String>) -> Self {
        Self { status, title: title.into(), detail }
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", Some(detail.into()))
    }

    pub fn forbidden(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "Forbidden", Some(detail.into()))
    }

    pub fn not_found(entity: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", Some(format!("{} not found", entity)))
    }

    /// 500 with a fixed detail; the cause is only logged.
    pub fn internal(code: Option<u16>) -> Self {
        let detail = match code {
            Some(c) => format!("unexpected server error (code {c})"),
            None => "unexpected server error".to_string(),
        };
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Error", Some(detail))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "errors": [{
                "status": self.status.as_u16().to_string(),
                "title": self.title,
                "detail": self.detail,
            }]
        });
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        if e.is_validation() {
            return JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string()));
        }
        match e {
            ServiceError::NotFound(msg) => JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(msg)),
            ServiceError::Conflict(msg) => JsonApiError::new(StatusCode::CONFLICT, "Conflict", Some(msg)),
            ServiceError::Forbidden(msg) => JsonApiError::forbidden(msg),
            ServiceError::Auth(auth) => auth.into(),
            other => {
                error!(err = %other, "request failed");
                JsonApiError::internal(None)
            }
        }
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        let detail = Some(format!("{} (code {})", e, e.code()));
        match e {
            AuthError::Validation(_) => JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", detail),
            AuthError::Conflict => JsonApiError::new(StatusCode::CONFLICT, "Conflict", detail),
            AuthError::NotFound => JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", detail),
            AuthError::Unauthorized | AuthError::TokenError(_) => {
                JsonApiError::new(StatusCode::UNAUTHORIZED, "Unauthorized", detail)
            }
            AuthError::Inactive => JsonApiError::new(StatusCode::FORBIDDEN, "Account Inactive", detail),
            AuthError::HashError(_) | AuthError::Repository(_) => {
                error!(code = e.code(), err = %e, "auth failure");
                JsonApiError::internal(Some(e.code()))
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
