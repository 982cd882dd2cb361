use std::net::SocketAddr;

use axum::Router;
use common::utils::logging::{init_logging_default, init_logging_json};
use configs::{AppConfig, ServerConfig};
use dotenvy::dotenv;
use service::{auth::service::AuthConfig, bootstrap};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, session::ServerState};

/// Read `config.toml` (or `CONFIG_PATH`); fall back to environment variables when
/// the file is missing or invalid.
pub fn load_config() -> Result<AppConfig, StartupError> {
    dotenv().ok();
    match AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(file_err) => AppConfig::from_env()
            .map_err(|env_err| StartupError::InvalidConfig(format!("{file_err}; environment fallback: {env_err}"))),
    }
}

/// Initialize logging via shared common utils
pub fn init_logging(server: &ServerConfig) {
    if server.json_logs {
        init_logging_json();
    } else {
        init_logging_default();
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address {}:{}: {e}", server.host, server.port)))
}

/// Connect, migrate and provision the database, then build the router.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    models::db::migrate(&db).await?;

    let auth = AuthConfig::from(&cfg.auth);
    let seeded = bootstrap::seed_default_sectors(&db).await.map_err(anyhow::Error::from)?;
    if seeded > 0 {
        info!(count = seeded, "seeded default sectors");
    }
    if let Some(admin_id) = bootstrap::ensure_site_admin(&db, &cfg.bootstrap, &auth)
        .await
        .map_err(anyhow::Error::from)?
    {
        info!(%admin_id, "site administrator provisioned");
    }

    let state = ServerState { db, auth, secure_cookie: cfg.auth.secure_cookie };
    Ok(routes::build_router(state, build_cors()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; graceful shutdown disabled");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;
    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting hr portal server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_rejects_bad_host() {
        let ok = ServerConfig { host: "127.0.0.1".into(), port: 8080, worker_threads: None, json_logs: false };
        assert_eq!(bind_addr(&ok).unwrap().port(), 8080);
        let bad = ServerConfig { host: "not a host".into(), ..ok };
        assert!(matches!(bind_addr(&bad), Err(StartupError::InvalidConfig(_))));
    }
}
