// ABOUTME: App Hub portal library - OAuth-gated registry of workflow mini apps.
// ABOUTME: Forwards app submissions to an n8n webhook and renders the reports.

pub mod apps;
pub mod auth;
pub mod config;
pub mod proxy;
pub mod registry;
pub mod render;
pub mod report;
pub mod routes;
pub mod templates;
pub mod workflow;

use std::sync::Arc;

use auth::OauthConfig;
use config::Config;
use workflow::WorkflowClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub oauth: OauthConfig,
    pub workflow: WorkflowClient,
}
