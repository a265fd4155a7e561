use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

use crate::api::{error_body, SharedManager};
use crate::error::Error;
use crate::manager::ConfigureRequest;
use crate::services::FirewallConfig;

const REQUIRED_FIELDS: [&str; 6] = ["name", "management_ip", "subnet", "vcpu", "ram", "security_policy"];

pub async fn list_firewalls(State(manager): State<SharedManager>) -> impl IntoResponse {
    match manager.list_all().await {
        Ok(firewalls) => Json(json!({ "success": true, "firewalls": firewalls })).into_response(),
        Err(e) => {
            tracing::error!("Error getting firewalls: {}", e);
            error_body(StatusCode::INTERNAL_SERVER_ERROR, e)
        }
    }
}

/// Presence check on the raw body; types are checked when it is decoded.
fn validate_deploy(payload: Value) -> Result<FirewallConfig, Error> {
    if let Some(field) = REQUIRED_FIELDS.iter().find(|f| payload.get(**f).is_none()) {
        return Err(Error::Validation(format!("Missing required field: {}", field)));
    }
    serde_json::from_value(payload).map_err(|e| Error::Validation(format!("Invalid firewall config: {}", e)))
}

pub async fn deploy_firewall(
    State(manager): State<SharedManager>,
    payload: Result<Json<Value>, JsonRejection>,
) -> impl IntoResponse {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::warn!("Rejected deploy body: {}", rejection.body_text());
            return error_body(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };
    tracing::info!("Deploying firewall with config: {}", payload);

    let config = match validate_deploy(payload) {
        Ok(config) => config,
        Err(e) => return error_body(StatusCode::BAD_REQUEST, e),
    };

    Json(manager.deploy(config).await).into_response()
}

pub async fn start_firewall(
    State(manager): State<SharedManager>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    Json(manager.start(&id).await)
}

pub async fn stop_firewall(
    State(manager): State<SharedManager>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    Json(manager.stop(&id).await)
}

pub async fn configure_firewall(
    State(manager): State<SharedManager>,
    Path(id): Path<String>,
    request: Result<Json<ConfigureRequest>, JsonRejection>,
) -> impl IntoResponse {
    match request {
        Ok(Json(request)) => Json(manager.configure(&id, request).await).into_response(),
        Err(rejection) => {
            tracing::error!("Error configuring firewall: {}", rejection.body_text());
            error_body(StatusCode::INTERNAL_SERVER_ERROR, rejection.body_text())
        }
    }
}

pub async fn delete_firewall(
    State(manager): State<SharedManager>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    Json(manager.delete(&id).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_body() -> Value {
        json!({
            "name": "web-fw",
            "management_ip": "10.0.0.1",
            "subnet": "10.0.1.0/24",
            "vcpu": 2,
            "ram": 4,
            "security_policy": "web"
        })
    }

    #[test]
    fn first_missing_field_is_reported() {
        let mut body = full_body();
        body.as_object_mut().unwrap().remove("subnet");
        body.as_object_mut().unwrap().remove("ram");

        let err = validate_deploy(body).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: subnet");
    }

    #[test]
    fn non_object_body_misses_name() {
        let err = validate_deploy(json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: name");
    }

    #[test]
    fn wrong_types_are_rejected() {
        let mut body = full_body();
        body["vcpu"] = json!("two");
        assert!(matches!(validate_deploy(body), Err(Error::Validation(_))));
    }

    #[test]
    fn complete_body_decodes() {
        let config = validate_deploy(full_body()).unwrap();
        assert_eq!(config.name, "web-fw");
        assert_eq!(config.vcpu, 2);
        assert_eq!(config.config_method, "netconf");
    }
}
