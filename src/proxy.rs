// ABOUTME: JSON proxy endpoint that relays app payloads to the workflow engine.
// ABOUTME: Maps the trigger error taxonomy onto HTTP statuses for API callers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::workflow::TriggerError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TriggerRequest {
    #[serde(default)]
    pub workflow: String,
    #[serde(default)]
    pub payload: Value,
}

/// POST /api/n8n/trigger — forward `{workflow, payload}` upstream and relay
/// the response verbatim. Auth is enforced by the router middleware.
pub async fn trigger(
    State(state): State<AppState>,
    Json(request): Json<TriggerRequest>,
) -> Response {
    if request.workflow.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing workflow parameter" })),
        )
            .into_response();
    }

    tracing::info!(workflow = %request.workflow, "Forwarding workflow trigger");

    match state.workflow.trigger(&request.workflow, request.payload).await {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(error) => error_response(&request.workflow, error),
    }
}

/// Status mapping for trigger failures: configuration errors are a 500 with a
/// descriptive body, upstream failures relay the upstream status, and
/// transport errors become a generic 500.
pub fn error_response(workflow: &str, error: TriggerError) -> Response {
    match error {
        TriggerError::NotConfigured => {
            tracing::error!(workflow, "N8N_WEBHOOK_URL not configured");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "N8N_WEBHOOK_URL not configured" })),
            )
                .into_response()
        }
        TriggerError::Upstream { status, body } => {
            tracing::warn!(workflow, status, "Upstream workflow request failed");
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            (
                status,
                Json(json!({ "error": "N8N request failed", "details": body })),
            )
                .into_response()
        }
        TriggerError::Transport(e) => {
            tracing::error!(workflow, error = %e, "Workflow trigger error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error", "message": e.to_string() })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_configured_maps_to_500() {
        let response = error_response("asin-keywords", TriggerError::NotConfigured);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_upstream_failure_relays_status() {
        let response = error_response(
            "asin-keywords",
            TriggerError::Upstream {
                status: 404,
                body: "workflow not found".to_string(),
            },
        );
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unmappable_upstream_status_becomes_502() {
        let response = error_response(
            "asin-keywords",
            TriggerError::Upstream {
                status: 99,
                body: String::new(),
            },
        );
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
