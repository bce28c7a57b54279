// ABOUTME: App Hub entry point - starts the Axum server.
// ABOUTME: Loads .env config, wires OAuth and the workflow client, and serves.

use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use apphub::{auth::OauthConfig, config::Config, routes, workflow::WorkflowClient, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "apphub=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting App Hub portal");

    let config = Config::load()?;
    tracing::info!(
        port = config.port,
        webhook_configured = config.webhook_url.is_some(),
        allowed_logins = config.allowed_logins.len(),
        allowed_domains = config.allowed_domains.len(),
        "Configuration loaded"
    );

    let oauth = OauthConfig::new(
        &config.github_client_id,
        &config.github_client_secret,
        &config.oauth_redirect_uri,
    )?;
    let workflow = WorkflowClient::from_config(&config);

    let addr = format!("{}:{}", config.bind_address, config.port);
    let state = AppState {
        config: Arc::new(config),
        oauth,
        workflow,
    };

    let app = routes::create_router(state);

    tracing::info!(addr = %addr, "Listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
