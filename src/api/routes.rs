//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, Json},
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::agents::AgentRegistry;
use crate::config::Config;

/// Shared application state. Immutable after startup.
pub struct AppState {
    pub config: Config,
    pub registry: AgentRegistry,
}

/// Start the HTTP server.
pub async fn serve(config: Config, registry: AgentRegistry) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState { config, registry });

    let app = router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/docs", get(docs))
        .route("/openapi.json", get(openapi_spec))
        .route("/api/agents", get(list_agents))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    agent: String,
    version: String,
}

/// Health check endpoint.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        agent: state.registry.root.name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Debug, Serialize)]
struct AgentSummary {
    name: String,
    model: String,
    description: String,
    /// Transport kinds, in binding order
    transports: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
struct UnavailableSummary {
    name: String,
    reason: String,
}

#[derive(Debug, Serialize)]
struct AgentsResponse {
    root: AgentSummary,
    sub_agents: Vec<AgentSummary>,
    unavailable: Vec<UnavailableSummary>,
}

fn summarize(registry: &AgentRegistry) -> AgentsResponse {
    let summary = |agent: &crate::agents::AgentDescriptor| AgentSummary {
        name: agent.name.clone(),
        model: agent.model.clone(),
        description: agent.description.clone(),
        transports: agent.tools.iter().map(|t| t.kind()).collect(),
    };

    AgentsResponse {
        root: summary(&registry.root),
        sub_agents: registry.sub_agents.iter().map(summary).collect(),
        unavailable: registry
            .unavailable
            .iter()
            .map(|u| UnavailableSummary {
                name: u.name.clone(),
                reason: u.reason.clone(),
            })
            .collect(),
    }
}

/// Agent registry summary.
async fn list_agents(State(state): State<Arc<AppState>>) -> Json<AgentsResponse> {
    Json(summarize(&state.registry))
}

async fn index() -> Html<&'static str> {
    Html(
        r#"<html>
    <head>
        <title>Carbon Agent API</title>
    </head>
    <body>
        <h1>Carbon Agent API Server</h1>
        <p>The server is running successfully!</p>
        <ul>
            <li><a href="/docs">API Documentation (Swagger UI)</a></li>
            <li><a href="/health">Health Check</a></li>
            <li><a href="/api/agents">Agent Registry</a></li>
        </ul>
    </body>
</html>"#,
    )
}

async fn docs() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Carbon Agent API Documentation</title>
    <link type="text/css" rel="stylesheet" href="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
    SwaggerUIBundle({
        url: '/openapi.json',
        dom_id: '#swagger-ui',
        presets: [
            SwaggerUIBundle.presets.apis,
            SwaggerUIBundle.SwaggerUIStandalonePreset
        ],
    })
    </script>
</body>
</html>"#,
    )
}

/// Minimal static OpenAPI document.
async fn openapi_spec() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Carbon Agent API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "API for the agent registry status surface"
        },
        "paths": {
            "/": {
                "get": {
                    "summary": "Root endpoint",
                    "responses": { "200": { "description": "Welcome page" } }
                }
            },
            "/health": {
                "get": {
                    "summary": "Health check",
                    "responses": { "200": { "description": "Server is healthy" } }
                }
            },
            "/api/agents": {
                "get": {
                    "summary": "Agent registry summary",
                    "responses": { "200": { "description": "Registry contents" } }
                }
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{CredentialSource, GITHUB_TOKEN};

    #[test]
    fn summary_reports_transports_and_unavailable() {
        let source = CredentialSource::from_pairs(&[(GITHUB_TOKEN, "ghp_test")]);
        let registry = AgentRegistry::build(&source);
        let response = summarize(&registry);

        assert_eq!(response.root.name, "root_agent");
        let github = response
            .sub_agents
            .iter()
            .find(|a| a.name == "github_agent")
            .unwrap();
        assert_eq!(github.transports, ["http"]);
        assert!(response
            .unavailable
            .iter()
            .any(|u| u.name == "carbon_voice_agent"));
    }
}
