//! carbon-agent - HTTP Server Entry Point
//!
//! Assembles the agent registry and starts the HTTP status surface.

use carbon_agent::credentials::CredentialSource;
use carbon_agent::{api, AgentRegistry, Config};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carbon_agent=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Assemble the agent registry; optional sub-agents with missing
    // credentials are excluded, not fatal
    let registry = AgentRegistry::build(&CredentialSource::Env);
    info!(
        "Assembled agent registry: root={} sub_agents={} unavailable={}",
        registry.root.name,
        registry.sub_agents.len(),
        registry.unavailable.len()
    );

    // Start HTTP server
    api::serve(config, registry).await
}
