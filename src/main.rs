//! # Yard Client
//!
//! Networked Scotland Yard client.
//!
//! This is the application entry point that initializes:
//! - Configuration loading
//! - Tracing/logging subsystem
//! - Judge and automated player connections
//! - The inbound message loop

use anyhow::Result;
use tracing::info;

use yard_client::config::Settings;
use yard_client::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment and config files
    let settings = Settings::load()?;

    // Initialize tracing subscriber for structured logging
    yard_client::telemetry::init_tracing(&settings.log);

    info!(
        judge = %settings.judge.url(),
        ai_enabled = settings.ai.enabled,
        environment = %settings.environment,
        "Configuration loaded"
    );

    let application = Application::build(settings).await?;

    info!("Connected, waiting for the judge");
    application.run_until_stopped().await?;

    Ok(())
}
