//! # Carbon Agent
//!
//! Configuration hub for a small set of LLM agents, each binding an
//! instruction string to remote tool integrations reached over MCP.
//!
//! This library provides:
//! - An agent registry: a root orchestrator delegating to specialized
//!   sub-agents (GitHub, market analysis, Carbon Voice messaging)
//! - A one-shot OAuth2 authorization-code flow that obtains the Carbon
//!   Voice access token and persists it to the dotenv credential store
//! - A minimal HTTP status surface (health, docs) around the registry
//!
//! ## Flow
//! 1. Secrets are resolved from the environment; missing ones for optional
//!    agents downgrade those agents to "unavailable"
//! 2. The registry wires each tool transport with the resolved credentials
//! 3. Out of band, the `oauth-setup` binary runs the authorization flow
//!    once to populate `CARBON_VOICE_API_KEY`
//!
//! ## Modules
//! - `agents`: agent descriptors and the root registry
//! - `oauth`: authorization flow (listener, exchange, persistence)
//! - `credentials`: secret resolution with fail-closed semantics
//! - `envfile`: dotenv-style key-value persistence

pub mod agents;
pub mod api;
pub mod config;
pub mod credentials;
pub mod envfile;
pub mod mcp;
pub mod oauth;

pub use agents::AgentRegistry;
pub use config::Config;
