use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::api::{error_body, SharedManager};

pub async fn get_stats(State(manager): State<SharedManager>) -> impl IntoResponse {
    match manager.statistics().await {
        Ok(statistics) => Json(json!({ "success": true, "statistics": statistics })).into_response(),
        Err(e) => {
            tracing::error!("Error getting statistics: {}", e);
            error_body(StatusCode::INTERNAL_SERVER_ERROR, e)
        }
    }
}
