//! Relay server binary: loads settings, builds the gateway client, serves
//! `POST /api/send-sms`.

use std::sync::Arc;
use std::time::Duration;

use smsrelay::config::Settings;
use smsrelay::gateway::GatewayClient;
use smsrelay::relay::{self, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

const GATEWAY_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = Settings::from_env();
    // Missing credentials kill the process here, before any request is
    // accepted.
    let credentials = settings.credentials()?;
    let environment = settings.environment();
    let addr = settings.listen_addr()?;

    let client = GatewayClient::builder(credentials)
        .timeout(GATEWAY_TIMEOUT)
        .build()?;
    let app = relay::router(AppState::new(Arc::new(client), environment));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, production = environment.is_production(), "sms relay listening");
    axum::serve(listener, app).await?;

    Ok(())
}
