pub mod firewalls;
pub mod logs;
pub mod stats;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::manager::FirewallManager;

pub type SharedManager = Arc<FirewallManager>;

/// `{success:false, error}` with the given status.
pub(crate) fn error_body(status: StatusCode, error: impl ToString) -> Response {
    (status, Json(json!({ "success": false, "error": error.to_string() }))).into_response()
}

pub fn router(manager: SharedManager) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/api/firewalls", get(firewalls::list_firewalls))
        .route("/api/firewalls/deploy", post(firewalls::deploy_firewall))
        .route("/api/firewalls/:id", delete(firewalls::delete_firewall))
        .route("/api/firewalls/:id/start", post(firewalls::start_firewall))
        .route("/api/firewalls/:id/stop", post(firewalls::stop_firewall))
        .route("/api/firewalls/:id/configure", post(firewalls::configure_firewall))
        .route("/api/logs", get(logs::get_logs))
        .route("/api/statistics", get(stats::get_stats))
        .with_state(manager)
        .layer(CorsLayer::permissive())
}

async fn root() -> Json<Value> {
    Json(json!({
        "status": "SME Firewall Manager API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "technologies": ["OSM", "OpenFlow", "NETCONF", "REST API"]
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
