//! Registrar - Application Entry Point
//!
//! This is the main entry point for the Registrar server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use registrar::{
    config::{Config, StoreBackend},
    create_router,
    db::{self, repositories::{MemoryAccountStore, PgAccountStore}, AccountStore},
    services::RegistrationService,
    state::AppState,
    utils::{CredentialHasher, RuleTable, SystemClock},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.server.rust_log.clone().into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.server.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Registrar server...");

    // Compile validation rules and hashing parameters up front so bad configuration fails here
    let rules = Arc::new(RuleTable::build()?);
    let hasher = CredentialHasher::new(&config.hashing)?;

    let store = connect_store(&config).await?;

    let registration = RegistrationService::new(
        store,
        rules,
        hasher,
        config.store.email_index.clone(),
        Arc::new(SystemClock),
    );
    let state = AppState::new(registration);

    let app = create_router(
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    // Start the server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Build the configured account store
async fn connect_store(config: &Config) -> anyhow::Result<Arc<dyn AccountStore>> {
    match config.store.backend {
        StoreBackend::Postgres => {
            let database = config
                .database
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("Postgres backend selected without database configuration"))?;

            tracing::info!("Connecting to database...");
            let pool = db::create_pool(database).await?;

            let store = PgAccountStore::new(pool, &config.store.table_name)?;
            tracing::info!(table = %config.store.table_name, "Ensuring account table exists...");
            store.ensure_schema().await?;

            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory account store; accounts are lost on restart");
            Ok(Arc::new(MemoryAccountStore::new(
                config.store.email_index.clone(),
            )))
        }
    }
}

/// Resolve on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
