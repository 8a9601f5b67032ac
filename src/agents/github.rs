//! GitHub assistant agent.

use super::types::{AgentDescriptor, Availability};
use crate::credentials::{CredentialSource, GITHUB_TOKEN};
use crate::mcp::McpTransport;

/// GitHub's hosted MCP endpoint.
const GITHUB_MCP_URL: &str = "https://api.githubcopilot.com/mcp/";

/// Toolsets requested from the GitHub MCP server.
const GITHUB_TOOLSETS: &str = "repos,issues,pull_requests,code_security,dependabot,\
discussions,projects,labels,notifications,users,orgs,stargazers";

const INSTRUCTION: &str = "\
You are a helpful GitHub assistant that can help users with:

Repository management:
- Browse and query code files across repositories you have access to
- Search files and analyze code patterns
- Understand project structure and dependencies

Issue & PR management:
- Create, update, and manage issues and pull requests
- Help triage bugs and review code changes
- Maintain project boards and track progress

Code analysis:
- Examine security findings and Dependabot alerts
- Review code changes and suggest improvements

Always be helpful, accurate, and provide clear explanations of your actions. \
When using tools, explain what you're doing and why.";

/// Construct the GitHub agent, if its token is configured.
///
/// The agent is optional: a missing `GITHUB_TOKEN` yields `Unavailable`
/// rather than an error, and the registry proceeds without it.
pub fn github_agent(source: &CredentialSource) -> Availability {
    let resolved = match source.require(&[GITHUB_TOKEN]) {
        Ok(resolved) => resolved,
        Err(e) => return Availability::unavailable("github_agent", e.to_string()),
    };
    let token = &resolved[GITHUB_TOKEN];

    let transport = McpTransport::http(
        GITHUB_MCP_URL,
        vec![
            ("Authorization".to_string(), format!("Bearer {}", token)),
            ("X-MCP-Toolsets".to_string(), GITHUB_TOOLSETS.to_string()),
            ("X-MCP-Readonly".to_string(), "false".to_string()),
        ],
    );

    Availability::available(
        AgentDescriptor::new(
            "github_agent",
            "gemini-2.5-flash",
            "A GitHub assistant powered by MCP tools for repository management, issues, and pull requests.",
            INSTRUCTION,
        )
        .with_tool(transport),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_bearer_and_scoping_headers() {
        let source = CredentialSource::from_pairs(&[(GITHUB_TOKEN, "ghp_test")]);
        let agent = match github_agent(&source) {
            Availability::Available(agent) => agent,
            Availability::Unavailable { reason, .. } => panic!("unavailable: {}", reason),
        };

        assert_eq!(agent.tools.len(), 1);
        let transport = &agent.tools[0];
        assert_eq!(transport.header("Authorization"), Some("Bearer ghp_test"));
        assert_eq!(transport.header("X-MCP-Readonly"), Some("false"));
        assert!(transport
            .header("X-MCP-Toolsets")
            .is_some_and(|v| v.contains("pull_requests")));
    }

    #[test]
    fn missing_token_is_unavailable_not_an_error() {
        let source = CredentialSource::from_pairs(&[]);
        match github_agent(&source) {
            Availability::Unavailable { name, reason } => {
                assert_eq!(name, "github_agent");
                assert!(reason.contains(GITHUB_TOKEN));
            }
            Availability::Available(_) => panic!("expected unavailable"),
        }
    }
}
