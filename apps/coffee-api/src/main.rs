//! Coffee API - REST server

use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();
    // A missing .env file is fine; the process environment still applies.
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        name = config.app.name,
        version = config.app.version,
        environment = ?config.environment,
        "Starting Coffee API"
    );

    let db = database::postgres::connect_from_config_with_retry(
        config.database.clone(),
        Some(config.db_retry.clone()),
    )
    .await?;
    info!("Connected to PostgreSQL");

    if config.auto_migrate {
        database::postgres::run_migrations::<Migrator>(&db, config.app.name).await?;
    }

    let state = AppState {
        config: config.clone(),
        db,
    };

    let api_routes = api::routes(&state);
    let router =
        axum_helpers::create_router::<openapi::ApiDoc>(api_routes, &state.config.environment)
            .await?;
    let app = router
        .merge(health_router(state.config.app.clone()))
        .merge(api::ready_router(state.clone()));

    info!("Starting Coffee API on port {}", state.config.server.port);

    let db = state.db.clone();
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing PostgreSQL connections");
            if let Err(e) = db.close().await {
                tracing::warn!("Failed to close PostgreSQL pool: {}", e);
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Coffee API shutdown complete");
    Ok(())
}
