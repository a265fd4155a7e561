use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use nfv_firewall::{api, config::Config, db, manager::FirewallManager};

#[tokio::main]
async fn main() {
    // Load env vars (before tracing so RUST_LOG from .env applies)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();

    let db = match db::connect(&config).await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    let manager = Arc::new(FirewallManager::simulated(db, &config));
    let app = api::router(manager);

    let listener = match tokio::net::TcpListener::bind(&config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", config.bind_addr, e);
            std::process::exit(1);
        }
    };
    tracing::info!("SME Firewall Manager API listening on {}", config.bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
