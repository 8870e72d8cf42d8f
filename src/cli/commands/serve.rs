use anyhow::Result;
use compute::store::DatabaseStore;
use sea_orm::Database;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace};

use super::initdb::run_migrations;
use crate::config::{Settings, StorageKind, app_state_with_store, initialize_app_state};
use crate::router::create_router;
use crate::schemas::AppState;

pub async fn serve(settings: &Settings, migrate: bool) -> Result<()> {
    trace!("Entering serve function");
    info!("Rideledger application starting up");
    debug!("Storage: {}", settings.storage.as_str());
    debug!("Bind address: {}", settings.bind_address);

    // Initialize application state
    trace!("Initializing application state");
    let state = match build_state(settings, migrate).await {
        Ok(state) => {
            debug!("Application state initialized successfully");
            state
        }
        Err(e) => {
            error!("Failed to initialize application state: {}", e);
            return Err(e);
        }
    };

    // Create router
    trace!("Creating application router");
    let app = create_router(state);
    debug!("Router created successfully");

    // Start server
    info!("Starting server on {}", settings.bind_address);
    let listener = match TcpListener::bind(&settings.bind_address).await {
        Ok(listener) => {
            debug!("Successfully bound to address: {}", settings.bind_address);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", settings.bind_address, e);
            return Err(e.into());
        }
    };

    info!("Rideledger API server running on http://{}", settings.bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", settings.bind_address);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}

async fn build_state(settings: &Settings, migrate: bool) -> Result<AppState> {
    if !migrate {
        return initialize_app_state(settings).await;
    }
    if settings.storage != StorageKind::Database {
        info!("Ignoring --migrate, storage is {}", settings.storage.as_str());
        return initialize_app_state(settings).await;
    }

    // Migrate and serve over the same connection, so in-memory databases keep their schema
    info!("Connecting to database: {}", settings.database_url);
    let db = Database::connect(&settings.database_url).await?;
    run_migrations(&db).await?;

    app_state_with_store(settings, Arc::new(DatabaseStore::new(db)))
}
