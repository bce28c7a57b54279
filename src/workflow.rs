// ABOUTME: HTTP client for forwarding app submissions to the n8n webhook.
// ABOUTME: Distinguishes configuration, upstream, and transport failures.

use serde_json::{json, Value};
use thiserror::Error;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum TriggerError {
    #[error("N8N_WEBHOOK_URL not configured")]
    NotConfigured,
    #[error("upstream returned status {status}")]
    Upstream { status: u16, body: String },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

#[derive(Clone)]
pub struct WorkflowClient {
    http: reqwest::Client,
    webhook_url: Option<String>,
    secret: Option<String>,
}

impl WorkflowClient {
    pub fn new(webhook_url: Option<String>, secret: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            webhook_url,
            secret,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.webhook_url.clone(), config.webhook_secret.clone())
    }

    /// Forward `{workflow, payload}` to the configured webhook and return the
    /// upstream JSON body. No retries; timeouts are whatever reqwest defaults
    /// to. A missing URL fails before any outbound call.
    pub async fn trigger(&self, workflow: &str, payload: Value) -> Result<Value, TriggerError> {
        let url = self.webhook_url.as_deref().ok_or(TriggerError::NotConfigured)?;

        let mut request = self
            .http
            .post(url)
            .json(&json!({ "workflow": workflow, "payload": payload }));
        if let Some(secret) = &self.secret {
            request = request.header("x-n8n-secret", secret);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TriggerError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

/// Inline message shown to the user when a form submission fails.
pub fn user_message(error: &TriggerError) -> String {
    match error {
        TriggerError::NotConfigured => "N8N_WEBHOOK_URL not configured".to_string(),
        TriggerError::Upstream { status, body } => {
            let preview: String = body.chars().take(200).collect();
            if preview.is_empty() {
                format!("Workflow request failed ({status})")
            } else {
                format!("Workflow request failed ({status}): {preview}")
            }
        }
        TriggerError::Transport(e) => format!("Workflow request failed: {e}"),
    }
}
