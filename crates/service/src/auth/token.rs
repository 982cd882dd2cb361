//! HS256 session tokens.
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use models::enums::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::domain::{AuthUser, SessionClaims};
use super::errors::AuthError;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cid: Option<String>,
    #[serde(default)]
    roles: Vec<Role>,
    iat: i64,
    exp: i64,
}

pub fn issue(secret: &str, user: &AuthUser, ttl_hours: i64) -> Result<(String, DateTime<Utc>), AuthError> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(ttl_hours);
    let claims = Claims {
        sub: user.user_name.clone(),
        uid: user.id.to_string(),
        cid: user.company_id.map(|c| c.to_string()),
        roles: user.roles.clone(),
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
    };
    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AuthError::TokenError(e.to_string()))?;
    Ok((token, expires_at))
}

/// Verify signature and expiry and return the typed identity.
pub fn verify(secret: &str, token: &str) -> Result<SessionClaims, AuthError> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    let data = decode::<Claims>(token, &key, &validation).map_err(|e| AuthError::TokenError(e.to_string()))?;
    let c = data.claims;
    let user_id = Uuid::parse_str(&c.uid).map_err(|e| AuthError::TokenError(e.to_string()))?;
    let company_id = match c.cid {
        Some(cid) => Some(Uuid::parse_str(&cid).map_err(|e| AuthError::TokenError(e.to_string()))?),
        None => None,
    };
    Ok(SessionClaims { user_id, user_name: c.sub, company_id, roles: c.roles })
}
