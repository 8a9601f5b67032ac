//! Transport types for MCP tool servers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Transport over which an agent reaches an MCP tool server.
///
/// Both variants are immutable configuration records constructed once at
/// startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum McpTransport {
    /// Remote HTTP endpoint with a static header set (bearer token,
    /// capability-scoping headers).
    Http {
        url: String,
        #[serde(default)]
        headers: Vec<(String, String)>,
    },
    /// Local subprocess speaking the tool protocol over stdin/stdout.
    Stdio {
        command: String,
        #[serde(default)]
        args: Vec<String>,
        #[serde(default)]
        env: HashMap<String, String>,
    },
}

impl McpTransport {
    /// Build an HTTP transport from an endpoint URL and header pairs.
    pub fn http(url: impl Into<String>, headers: Vec<(String, String)>) -> Self {
        Self::Http {
            url: url.into(),
            headers,
        }
    }

    /// Build a stdio transport from a command line and environment overlay.
    pub fn stdio(
        command: impl Into<String>,
        args: Vec<String>,
        env: HashMap<String, String>,
    ) -> Self {
        Self::Stdio {
            command: command.into(),
            args,
            env,
        }
    }

    /// Short transport kind label for status output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Http { .. } => "http",
            Self::Stdio { .. } => "stdio",
        }
    }

    /// Look up a configured header value (HTTP transport only).
    pub fn header(&self, name: &str) -> Option<&str> {
        match self {
            Self::Http { headers, .. } => headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str()),
            Self::Stdio { .. } => None,
        }
    }
}
