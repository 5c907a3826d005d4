//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;

use axum::Router;
use registry_common::{AppConfig, AppError, AppResult, StorageBackend};
use registry_core::traits::UserRepository;
use registry_db::{
    create_pool, run_migrations, InMemoryUserRepository, PgUserRepository, PoolOptions,
};
use registry_service::{ServiceContextBuilder, SpreadsheetSink};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health routes get the base middleware only, so health checks are never rate limited.
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );

    api.merge(apply_middleware(health_routes()))
        .with_state(state)
}

/// Build the configured user repository
async fn create_user_repo(config: &AppConfig) -> AppResult<Arc<dyn UserRepository>> {
    match config.storage {
        StorageBackend::Memory => {
            info!("Using in-memory storage");
            Ok(Arc::new(InMemoryUserRepository::new()))
        }
        StorageBackend::Postgres => {
            info!("Connecting to PostgreSQL...");
            let options = PoolOptions::new(config.database.url.clone()).with_bounds(
                config.database.max_connections,
                config.database.min_connections,
            );
            let pool = create_pool(&options)
                .await
                .map_err(AppError::storage)?;
            info!("PostgreSQL connection established");

            if config.database.run_migrations {
                run_migrations(&pool, &config.database.migrations_dir)
                    .await
                    .map_err(AppError::storage)?;
            }

            Ok(Arc::new(PgUserRepository::new(pool)))
        }
    }
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> AppResult<AppState> {
    let user_repo = create_user_repo(&config).await?;

    let mut builder = ServiceContextBuilder::new().user_repo(user_repo);
    if config.spreadsheet.enabled {
        // The writer task runs detached until the sink is dropped
        let (sink, _task) = SpreadsheetSink::spawn(config.spreadsheet.path.clone());
        builder = builder.sink(Arc::new(sink));
    }

    let service_context = builder
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server on an already bound listener
pub async fn run_server(app: Router, listener: TcpListener) -> AppResult<()> {
    let addr = listener.local_addr()?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> AppResult<()> {
    let addr = config.api.address();

    // Create app state
    let state = create_app_state(config).await?;

    // Build application
    let app = create_app(state);

    info!("Starting HTTP server on {}", addr);
    let listener = TcpListener::bind(&addr).await.inspect_err(|e| {
        tracing::error!(%addr, error = %e, "Failed to bind");
    })?;

    run_server(app, listener).await
}
