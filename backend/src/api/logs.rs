use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::api::SharedManager;

pub async fn get_logs(State(manager): State<SharedManager>) -> Json<Value> {
    Json(json!({ "success": true, "logs": manager.recent_logs() }))
}
