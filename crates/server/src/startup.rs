use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use migration::MigratorTrait;
use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

use configs::{AppConfig, BootstrapConfig, ServerConfig};
use service::auth::AuthConfig;
use service::employee::repo::seaorm::SeaOrmEmployeeRepository;
use service::employee::{EmployeeProfile, EmployeeRepository, NewEmployee};
use service::Role;

use crate::auth::ServerState;
use crate::routes;

/// Credentialed CORS for the configured origins only. The login cookie
/// authenticates requests, so origins are never mirrored.
pub fn build_cors(cfg: &ServerConfig) -> anyhow::Result<CorsLayer> {
    if cfg.cors_origins.iter().any(|o| o == "*") {
        anyhow::bail!("wildcard CORS origin cannot be combined with credentials");
    }
    let origins = cfg
        .cors_origins
        .iter()
        .map(|o| o.parse::<HeaderValue>().with_context(|| format!("invalid CORS origin {o:?}")))
        .collect::<anyhow::Result<Vec<_>>>()?;
    if origins.is_empty() {
        return Ok(CorsLayer::new());
    }
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true))
}

fn bootstrap_input(b: BootstrapConfig) -> NewEmployee {
    NewEmployee {
        profile: EmployeeProfile {
            first_name: b.first_name,
            last_name: b.last_name,
            email: b.email,
            document_number: b.document_number,
            birth_date: b.birth_date,
            role: Role::Director,
            manager_id: None,
            phones: b.phones,
        },
        password: b.password,
    }
}

/// Create the first Director when the roster is empty.
pub async fn bootstrap(state: &ServerState, cfg: Option<BootstrapConfig>) -> anyhow::Result<()> {
    let Some(b) = cfg else {
        return Ok(());
    };
    match state.employees.bootstrap_director(bootstrap_input(b)).await? {
        Some(director) => info!(employee_id = %director.id, email = %director.email, "bootstrap director created"),
        None => info!("roster not empty; bootstrap skipped"),
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Connect, migrate, bootstrap and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .context("connecting to database")?;
    migration::Migrator::up(&db, None).await.context("running migrations")?;
    info!("migrations applied");

    if cfg.auth.uses_dev_secret() {
        warn!("JWT_SECRET not configured; using the development secret");
    }

    let repo: Arc<dyn EmployeeRepository> = Arc::new(SeaOrmEmployeeRepository::new(db));
    let state = ServerState::new(
        repo,
        AuthConfig::new(cfg.auth.jwt_secret.clone(), cfg.auth.token_ttl_hours),
    );
    bootstrap(&state, cfg.bootstrap.clone()).await?;

    let app = routes::build_router(state, build_cors(&cfg.server)?);

    let addr: SocketAddr = cfg.server.bind_addr().parse().context("parsing bind address")?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}
