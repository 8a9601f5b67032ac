//! HTTP status surface around the agent registry.
//!
//! ## Endpoints
//!
//! - `GET /` - Landing page
//! - `GET /health` - Health check (agent liveness and name)
//! - `GET /docs` - Swagger UI shell
//! - `GET /openapi.json` - Minimal OpenAPI document
//! - `GET /api/agents` - Agent registry summary

mod routes;

pub use routes::{serve, AppState};
