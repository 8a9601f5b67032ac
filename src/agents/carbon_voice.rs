//! Carbon Voice messaging agents.
//!
//! Two variants of the same communication specialist: one reaches the
//! platform through the published stdio MCP server, the other talks to the
//! HTTP API directly with the OAuth2 access token. Both are optional and
//! contingent on their credentials being present.

use std::collections::HashMap;

use super::types::{AgentDescriptor, Availability};
use crate::credentials::{
    CredentialSource, CARBON_VOICE_API_KEY, CARBON_VOICE_CLIENT_ID, CARBON_VOICE_CLIENT_SECRET,
};
use crate::mcp::McpTransport;

/// Carbon Voice HTTP API endpoint.
const CARBON_VOICE_API_URL: &str = "https://api.carbonvoice.app";

const INSTRUCTION: &str = "\
You are a Carbon Voice communication specialist with expertise in messaging, \
user management, and workspace organization.

Your capabilities include:
- Message management: listing, retrieving, and creating messages \
(conversation, direct, voice memos)
- User operations: finding and retrieving user information by ID, email, or phone
- Conversation handling: listing and managing conversation threads
- Folder organization: creating, managing, and organizing workspace folders
- Workspace management: accessing workspace information and statistics
- AI actions: running AI prompts and actions on messages and content

When communicating via Carbon Voice, use appropriate message types based on \
context, respect conversation threads, verify recipient information before \
sending direct messages, and keep content concise but complete. Provide \
efficient, organized communication solutions using Carbon Voice platform \
features.";

/// Construct the stdio-transport Carbon Voice agent.
///
/// Spawns the published MCP server with the access token in its environment
/// overlay. Requires `CARBON_VOICE_API_KEY`.
pub fn carbon_voice_agent(source: &CredentialSource) -> Availability {
    let resolved = match source.require(&[CARBON_VOICE_API_KEY]) {
        Ok(resolved) => resolved,
        Err(e) => return Availability::unavailable("carbon_voice_agent", e.to_string()),
    };

    let mut env = HashMap::new();
    env.insert(
        CARBON_VOICE_API_KEY.to_string(),
        resolved[CARBON_VOICE_API_KEY].clone(),
    );
    env.insert("LOG_LEVEL".to_string(), "info".to_string());

    let transport = McpTransport::stdio(
        "npx",
        vec!["-y".to_string(), "@carbonvoice/cv-mcp-server".to_string()],
        env,
    );

    Availability::available(
        AgentDescriptor::new(
            "carbon_voice_agent",
            "gemini-2.5-flash",
            "A communication specialist for Carbon Voice messaging platform operations.",
            INSTRUCTION,
        )
        .with_tool(transport),
    )
}

/// Construct the HTTP-transport Carbon Voice agent.
///
/// Talks to the platform API directly, authenticating with the OAuth2
/// access token and identifying the client. Requires the full OAuth2
/// credential set.
pub fn carbon_voice_oauth_agent(source: &CredentialSource) -> Availability {
    let resolved = match source.require(&[
        CARBON_VOICE_CLIENT_ID,
        CARBON_VOICE_CLIENT_SECRET,
        CARBON_VOICE_API_KEY,
    ]) {
        Ok(resolved) => resolved,
        Err(e) => return Availability::unavailable("carbon_voice_oauth_agent", e.to_string()),
    };

    let transport = McpTransport::http(
        CARBON_VOICE_API_URL,
        vec![
            (
                "Authorization".to_string(),
                format!("Bearer {}", resolved[CARBON_VOICE_API_KEY]),
            ),
            ("Content-Type".to_string(), "application/json".to_string()),
            (
                "X-Client-ID".to_string(),
                resolved[CARBON_VOICE_CLIENT_ID].clone(),
            ),
        ],
    );

    Availability::available(
        AgentDescriptor::new(
            "carbon_voice_oauth_agent",
            "gemini-1.5-flash",
            "A communication specialist for Carbon Voice messaging platform using OAuth2 authentication.",
            INSTRUCTION,
        )
        .with_tool(transport),
    )
}
