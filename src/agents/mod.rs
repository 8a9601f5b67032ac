//! Agent descriptors and the root registry.
//!
//! An agent is a named configuration binding an instruction string to a set
//! of MCP tool transports. The root agent delegates to sub-agents by name.
//!
//! Sub-agents whose credentials are absent are reported as unavailable
//! rather than raised as errors; see [`Availability`].

mod carbon_voice;
mod github;
mod market;
mod registry;
mod types;

pub use carbon_voice::{carbon_voice_agent, carbon_voice_oauth_agent};
pub use github::github_agent;
pub use market::market_analyzer;
pub use registry::AgentRegistry;
pub use types::{AgentDescriptor, Availability, UnavailableAgent};
