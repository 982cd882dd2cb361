#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use service::auth::service::AuthConfig;
use tower::Service;

use server::routes::{self, session::ServerState};

pub const JWT_SECRET: &str = "test-secret-0123456789";
pub const ADMIN_EMAIL: &str = "admin@hr.local";
pub const ADMIN_PASSWORD: &str = "AdminPass123";

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

pub fn admin_config() -> configs::BootstrapConfig {
    configs::BootstrapConfig {
        admin_email: ADMIN_EMAIL.into(),
        admin_password: ADMIN_PASSWORD.into(),
        admin_name: "Site".into(),
        admin_surname: "Administrator".into(),
    }
}

/// Router over a freshly migrated database that already has a site administrator.
pub async fn build_app() -> anyhow::Result<(Router, DatabaseConnection)> {
    let db = models::db::connect_migrated(&models::db::test_database_url()).await?;
    let auth = AuthConfig::new(JWT_SECRET, 12);
    service::bootstrap::ensure_site_admin(&db, &admin_config(), &auth).await?;
    let state = ServerState { db: db.clone(), auth, secure_cookie: false };
    Ok((routes::build_router(state, cors()), db))
}

pub async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header("authorization", format!("Bearer {t}"));
    }
    let req = match body {
        Some(v) => builder.header("content-type", "application/json").body(Body::from(serde_json::to_vec(&v)?))?,
        None => builder.body(Body::empty())?,
    };
    let resp = app.clone().call(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Ok((status, value))
}

pub async fn login(app: &Router, user_name: &str, password: &str) -> anyhow::Result<String> {
    let (status, body) = send(app, "POST", "/auth/login", None, Some(json!({"user_name": user_name, "password": password}))).await?;
    anyhow::ensure!(status == StatusCode::OK, "login {user_name} failed: {status} {body}");
    Ok(body["token"].as_str().unwrap_or_default().to_string())
}

pub async fn create_sector(app: &Router, admin_token: &str, name: &str) -> anyhow::Result<String> {
    let (status, body) = send(app, "POST", "/admin/sectors", Some(admin_token), Some(json!({"name": name}))).await?;
    anyhow::ensure!(status == StatusCode::CREATED, "create sector failed: {status} {body}");
    Ok(body["data"]["id"].as_str().unwrap_or_default().to_string())
}

pub fn registration(sector_id: &str, company: &str, email: &str) -> Value {
    json!({
        "company_name": company,
        "company_email": format!("info@{}.com", company.to_lowercase()),
        "company_phone_number": "+90 212 555 0101",
        "sector_id": sector_id,
        "number_of_employees": 12,
        "email": email,
        "name": "Ada",
        "surname": "Lovelace",
        "password": "Passw0rd!",
        "confirm_password": "Passw0rd!"
    })
}

/// Register a company, approve it as site admin and sign its administrator in.
pub async fn approved_company(app: &Router, admin_token: &str, sector_id: &str, company: &str, email: &str) -> anyhow::Result<String> {
    let (status, body) = send(app, "POST", "/auth/register", None, Some(registration(sector_id, company, email))).await?;
    anyhow::ensure!(status == StatusCode::CREATED, "register failed: {status} {body}");
    let user_id = body["data"]["user_id"].as_str().unwrap_or_default().to_string();
    let (status, body) = send(app, "POST", &format!("/admin/registrations/{user_id}/approve"), Some(admin_token), None).await?;
    anyhow::ensure!(status == StatusCode::OK, "approve failed: {status} {body}");
    login(app, email, "Passw0rd!").await
}

/// Company administrator adds an employee, who then signs in.
pub async fn employee(app: &Router, company_token: &str, email: &str) -> anyhow::Result<(String, String)> {
    let payload = json!({
        "email": email,
        "name": "Grace",
        "surname": "Hopper",
        "profession": "Engineer",
        "password": "Employee123"
    });
    let (status, body) = send(app, "POST", "/company/employees", Some(company_token), Some(payload)).await?;
    anyhow::ensure!(status == StatusCode::CREATED, "create employee failed: {status} {body}");
    let id = body["data"]["id"].as_str().unwrap_or_default().to_string();
    Ok((id, login(app, email, "Employee123").await?))
}
