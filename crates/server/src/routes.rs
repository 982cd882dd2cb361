pub mod session;
pub mod auth;
pub mod sectors;
pub mod admin;
pub mod company;
pub mod profile;
pub mod leaves;
pub mod cash_advances;

use axum::{
    http::header,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::openapi::ApiDoc;
use session::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn metrics() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], common::metrics::render())
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: public, session, company administrator
/// and site administrator routes behind the session middleware.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/sectors", get(sectors::list))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout));

    // Any signed-in user
    let personal = Router::new()
        .route("/auth/me", get(auth::me))
        .route("/profile", get(profile::get).put(profile::update))
        .route("/leaves", get(leaves::list).post(leaves::create))
        .route("/leaves/:id", get(leaves::get).put(leaves::update).delete(leaves::delete))
        .route("/cash-advances", get(cash_advances::list).post(cash_advances::create))
        .route(
            "/cash-advances/:id",
            get(cash_advances::get).put(cash_advances::update).delete(cash_advances::delete),
        );

    let company_admin = Router::new()
        .route("/company", get(company::get).put(company::update))
        .route("/company/employees", get(company::list_employees).post(company::create_employee))
        .route("/company/employees/:id", axum::routing::delete(company::delete_employee))
        .route("/company/leaves", get(company::list_leaves))
        .route("/company/leave-requests", get(company::list_leave_requests))
        .route("/company/leaves/:id/approve", post(company::approve_leave))
        .route("/company/leaves/:id/reject", post(company::reject_leave))
        .route("/company/cash-advances", get(company::list_cash_advances))
        .route("/company/cash-advance-requests", get(company::list_cash_advance_requests))
        .route("/company/cash-advances/:id/approve", post(company::approve_cash_advance))
        .route("/company/cash-advances/:id/reject", post(company::reject_cash_advance))
        .route("/company/cash-advances/:id/pay", post(company::pay_cash_advance))
        .route_layer(middleware::from_fn(session::require_company_admin));

    let site_admin = Router::new()
        .route("/admin/sectors", post(sectors::create))
        .route("/admin/sectors/:id", put(sectors::update).delete(sectors::delete))
        .route("/admin/registrations", get(admin::list_registrations))
        .route("/admin/registrations/:id/approve", post(admin::approve_registration))
        .route("/admin/registrations/:id/reject", post(admin::reject_registration))
        .route("/admin/companies", get(admin::list_companies))
        .route("/admin/companies/:id", axum::routing::delete(admin::delete_company))
        .route("/admin/users", get(admin::list_users))
        .route("/admin/users/:id", axum::routing::delete(admin::delete_user))
        .route_layer(middleware::from_fn(session::require_site_admin));

    public
        .merge(personal)
        .merge(company_admin)
        .merge(site_admin)
        .layer(middleware::from_fn_with_state(state.clone(), session::require_bearer_token_state))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
