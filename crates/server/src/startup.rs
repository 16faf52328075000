use std::future::Future;

use axum::Router;
use configs::{AppConfig, DatabaseConfig};
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::errors::StartupError;
use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Check the database once and apply migrations when it answers.
/// An unreachable database is logged and left for request-time store errors.
async fn prepare_database(db: &DatabaseConnection, cfg: &DatabaseConfig) {
    if let Err(e) = models::db::ping(db).await {
        warn!(error = %e, "database unreachable at startup; requests will fail until it is available");
        return;
    }
    info!("database reachable");
    if !cfg.run_migrations {
        return;
    }
    match migration::Migrator::up(db, None).await {
        Ok(()) => info!("migrations applied"),
        Err(e) => error!(error = %e, "migrations failed"),
    }
}

/// Resolve configuration once for the whole process: file, then environment.
pub fn load_config() -> Result<AppConfig, StartupError> {
    AppConfig::load_or_env().map_err(|e| StartupError::InvalidConfig(format!("{e:#}")))
}

/// Public entry: build the app and serve until `shutdown` resolves.
/// In-flight requests finish before this returns.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    // Pool is lazy; URL problems fail here, connectivity problems do not
    let db = models::db::connect_lazy(&cfg.database).await?;
    prepare_database(&db, &cfg.database).await;

    let state = AppState::seaorm(db, &cfg.database);
    let app: Router = routes::build_router(state, build_cors());

    let addr = cfg.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;
    info!(%addr, query_timeout_secs = cfg.database.query_timeout_secs, "student records server listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("student records server drained");
    Ok(())
}
