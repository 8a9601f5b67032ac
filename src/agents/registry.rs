//! Root agent registry.
//!
//! Builds the fixed set of sub-agents once at process start. Optional
//! sub-agents whose credentials are absent are excluded and recorded, never
//! raised. The resulting structure is immutable.

use super::carbon_voice::{carbon_voice_agent, carbon_voice_oauth_agent};
use super::github::github_agent;
use super::market::market_analyzer;
use super::types::{AgentDescriptor, Availability, UnavailableAgent};
use crate::credentials::CredentialSource;

/// The assembled agent hierarchy: one root delegating to sub-agents by name.
#[derive(Debug)]
pub struct AgentRegistry {
    pub root: AgentDescriptor,
    /// Successfully constructed sub-agents, in delegation order
    pub sub_agents: Vec<AgentDescriptor>,
    /// Sub-agents excluded because their credentials were absent
    pub unavailable: Vec<UnavailableAgent>,
}

impl AgentRegistry {
    /// Assemble the registry from the given credential source.
    ///
    /// Construction never fails: the market analyzer needs no credentials
    /// and is always present, and every other sub-agent is optional.
    pub fn build(source: &CredentialSource) -> Self {
        let mut sub_agents = vec![market_analyzer()];
        let mut unavailable = Vec::new();

        let optional = [
            github_agent(source),
            carbon_voice_agent(source),
            carbon_voice_oauth_agent(source),
        ];
        for availability in optional {
            match availability {
                Availability::Available(agent) => sub_agents.push(*agent),
                Availability::Unavailable { name, reason } => {
                    tracing::warn!("Sub-agent {} unavailable: {}", name, reason);
                    unavailable.push(UnavailableAgent { name, reason });
                }
            }
        }

        let root = root_agent(&sub_agents, &unavailable);
        Self {
            root,
            sub_agents,
            unavailable,
        }
    }

    /// Look up a delegate by name.
    pub fn agent(&self, name: &str) -> Option<&AgentDescriptor> {
        self.sub_agents.iter().find(|a| a.name == name)
    }
}

/// Compose the root orchestrator over the constructed sub-agents.
fn root_agent(sub_agents: &[AgentDescriptor], unavailable: &[UnavailableAgent]) -> AgentDescriptor {
    let mut roster = String::new();
    for agent in sub_agents {
        roster.push_str(&format!("- {}: {}\n", agent.name, agent.description));
    }
    for missing in unavailable {
        roster.push_str(&format!(
            "- {}: Not available ({})\n",
            missing.name, missing.reason
        ));
    }

    let instruction = format!(
        "You are an intelligent orchestrator agent that coordinates multiple \
specialized sub-agents to help users accomplish complex tasks.

You have access to specialized sub-agents that can help with different types \
of tasks:
{roster}
When you need to delegate a task to a sub-agent, use the transfer_to_agent \
function with the appropriate agent name.

Your role is to:
1. Understand the user's request and break it down into components
2. Determine which specialized sub-agent is best suited for each part
3. Transfer control to the appropriate sub-agent using transfer_to_agent(agent_name)
4. Ask for clarification when requests are ambiguous

Always explain what you're doing and why you're transferring to a specific agent."
    );

    AgentDescriptor::new(
        "root_agent",
        "gemini-2.5-flash",
        "An intelligent orchestrator that coordinates specialized sub-agents for comprehensive task completion.",
        instruction,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{
        CARBON_VOICE_API_KEY, CARBON_VOICE_CLIENT_ID, CARBON_VOICE_CLIENT_SECRET, GITHUB_TOKEN,
    };

    fn full_source() -> CredentialSource {
        CredentialSource::from_pairs(&[
            (GITHUB_TOKEN, "ghp_test"),
            (CARBON_VOICE_CLIENT_ID, "client"),
            (CARBON_VOICE_CLIENT_SECRET, "secret"),
            (CARBON_VOICE_API_KEY, "tok"),
        ])
    }

    #[test]
    fn full_credentials_yield_all_sub_agents_in_stable_order() {
        let registry = AgentRegistry::build(&full_source());

        let names: Vec<&str> = registry.sub_agents.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "market_analyzer",
                "github_agent",
                "carbon_voice_agent",
                "carbon_voice_oauth_agent"
            ]
        );
        assert!(registry.unavailable.is_empty());
        assert_eq!(registry.root.name, "root_agent");
    }

    #[test]
    fn missing_github_token_excludes_only_that_agent() {
        let source = CredentialSource::from_pairs(&[
            (CARBON_VOICE_CLIENT_ID, "client"),
            (CARBON_VOICE_CLIENT_SECRET, "secret"),
            (CARBON_VOICE_API_KEY, "tok"),
        ]);
        let registry = AgentRegistry::build(&source);

        assert!(registry.agent("github_agent").is_none());
        assert!(registry.agent("carbon_voice_agent").is_some());
        assert_eq!(registry.unavailable.len(), 1);
        assert_eq!(registry.unavailable[0].name, "github_agent");
        assert!(registry.unavailable[0].reason.contains(GITHUB_TOKEN));
    }

    #[test]
    fn no_credentials_still_builds_root_with_market_analyzer() {
        let registry = AgentRegistry::build(&CredentialSource::from_pairs(&[]));

        let names: Vec<&str> = registry.sub_agents.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["market_analyzer"]);
        assert_eq!(registry.unavailable.len(), 3);
    }

    #[test]
    fn root_instruction_lists_available_and_unavailable() {
        let source = CredentialSource::from_pairs(&[(CARBON_VOICE_API_KEY, "tok")]);
        let registry = AgentRegistry::build(&source);

        assert!(registry.root.instruction.contains("market_analyzer:"));
        assert!(registry.root.instruction.contains("carbon_voice_agent:"));
        assert!(registry
            .root
            .instruction
            .contains("github_agent: Not available"));
    }
}
