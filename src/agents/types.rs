//! Core types for the agent registry.

use serde::Serialize;
use uuid::Uuid;

use crate::mcp::McpTransport;

/// A named agent configuration.
///
/// Descriptors are immutable once constructed; the registry builds them at
/// process start and never mutates them afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct AgentDescriptor {
    pub id: Uuid,
    /// Stable name used for delegation
    pub name: String,
    /// Model identifier (e.g., "gemini-2.5-flash")
    pub model: String,
    /// One-line summary shown in status output
    pub description: String,
    /// Natural-language instruction string
    pub instruction: String,
    /// Ordered tool-transport bindings
    pub tools: Vec<McpTransport>,
}

impl AgentDescriptor {
    pub fn new(
        name: impl Into<String>,
        model: impl Into<String>,
        description: impl Into<String>,
        instruction: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            model: model.into(),
            description: description.into(),
            instruction: instruction.into(),
            tools: Vec::new(),
        }
    }

    pub fn with_tool(mut self, transport: McpTransport) -> Self {
        self.tools.push(transport);
        self
    }
}

/// Outcome of constructing an optional agent.
///
/// An explicit tagged result instead of failure-as-control-flow: a missing
/// credential yields `Unavailable` with the reason, and the caller decides
/// whether to omit the agent or abort.
#[derive(Debug)]
pub enum Availability {
    Available(Box<AgentDescriptor>),
    Unavailable { name: String, reason: String },
}

impl Availability {
    pub fn available(descriptor: AgentDescriptor) -> Self {
        Self::Available(Box::new(descriptor))
    }

    pub fn unavailable(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Record of a sub-agent that could not be constructed.
#[derive(Debug, Clone, Serialize)]
pub struct UnavailableAgent {
    pub name: String,
    pub reason: String,
}
