//! # catalogd — product catalog daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Seed the product store once, before accepting requests
//! - Construct the application service, injecting the repository via its port trait
//! - Build the axum router, injecting the application service
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use catalog_adapter_http_axum::state::AppState;
use catalog_adapter_storage_sqlite_sqlx::SqliteProductRepository;
use catalog_app::services::product_service::ProductService;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = catalog_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
        recreate_on_schema_change: config.database.recreate_on_schema_change,
    }
    .build()
    .await?;
    if config.database.recreate_on_schema_change {
        tracing::warn!("schema recreation enabled, stored products may be dropped on restart");
    }

    // Services
    let product_repo = SqliteProductRepository::new(db.pool().clone());
    let product_service =
        Arc::new(ProductService::new(product_repo).with_list_order(config.catalog.list_order));
    product_service.initialize().await?;
    let list_order = product_service.list_order();

    // HTTP
    let state = AppState::from_arc(product_service);
    let app = catalog_adapter_http_axum::router::build(state, config.request_timeout());

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(
        address = %bind_addr,
        list_order = %list_order,
        "catalogd listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.pool().close().await;
    tracing::info!("catalogd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
