//! Credential resolution.
//!
//! Each integration names the secrets it needs; the resolver looks them up
//! and either returns the full set or an error listing every missing key.
//! Missing credentials are a distinct error variant so callers can downgrade
//! an optional agent to "unavailable" instead of aborting the whole registry.
//!
//! Resolution has no side effects beyond reading the source.

use std::collections::HashMap;
use thiserror::Error;

/// GitHub personal access / installation token for the GitHub MCP endpoint.
pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";

/// Carbon Voice OAuth2 client identifier.
pub const CARBON_VOICE_CLIENT_ID: &str = "CARBON_VOICE_CLIENT_ID";

/// Carbon Voice OAuth2 client secret.
pub const CARBON_VOICE_CLIENT_SECRET: &str = "CARBON_VOICE_CLIENT_SECRET";

/// Carbon Voice access token obtained via the OAuth flow.
pub const CARBON_VOICE_API_KEY: &str = "CARBON_VOICE_API_KEY";

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Missing required credentials: {}. Please add them to your .env file.", keys.join(", "))]
    Missing { keys: Vec<String> },
}

impl CredentialError {
    /// The names of the credentials that could not be resolved.
    pub fn missing_keys(&self) -> &[String] {
        match self {
            Self::Missing { keys } => keys,
        }
    }
}

/// Where credential values come from.
///
/// Production code reads the process environment; tests use an in-memory
/// map so they never mutate process-wide state.
#[derive(Debug, Clone)]
pub enum CredentialSource {
    Env,
    Map(HashMap<String, String>),
}

impl CredentialSource {
    /// Build an in-memory source from `(key, value)` pairs.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self::Map(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    /// Look up a single credential. Empty values count as absent.
    pub fn get(&self, key: &str) -> Option<String> {
        match self {
            Self::Env => std::env::var(key).ok().filter(|v| !v.is_empty()),
            Self::Map(map) => map.get(key).cloned().filter(|v| !v.is_empty()),
        }
    }

    /// Resolve every named key, or report the full set of missing ones.
    pub fn require(&self, keys: &[&str]) -> Result<HashMap<String, String>, CredentialError> {
        let mut resolved = HashMap::new();
        let mut missing = Vec::new();

        for key in keys {
            match self.get(key) {
                Some(value) => {
                    resolved.insert(key.to_string(), value);
                }
                None => missing.push(key.to_string()),
            }
        }

        if missing.is_empty() {
            Ok(resolved)
        } else {
            Err(CredentialError::Missing { keys: missing })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_resolves_present_keys() {
        let source = CredentialSource::from_pairs(&[("A", "1"), ("B", "2")]);
        let resolved = source.require(&["A", "B"]).unwrap();
        assert_eq!(resolved["A"], "1");
        assert_eq!(resolved["B"], "2");
    }

    #[test]
    fn require_names_every_missing_key() {
        let source = CredentialSource::from_pairs(&[("A", "1")]);
        let err = source.require(&["A", "B", "C"]).unwrap_err();
        assert_eq!(err.missing_keys(), ["B", "C"]);
        let message = err.to_string();
        assert!(message.contains("B, C"));
    }

    #[test]
    fn empty_values_count_as_absent() {
        let source = CredentialSource::from_pairs(&[("A", "")]);
        assert!(source.get("A").is_none());
        let err = source.require(&["A"]).unwrap_err();
        assert_eq!(err.missing_keys(), ["A"]);
    }
}
