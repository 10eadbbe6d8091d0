//! Identity descriptor: who the agent is.

use serde::{Deserialize, Serialize};

/// Agent identity loaded from configuration at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentIdentity {
    /// Agent name (e.g. "template-reviewer")
    pub name: String,
    /// Template/instance version string
    pub version: String,
    /// Domain the agent reviews in
    pub domain: String,
    /// One-line purpose statement
    pub purpose: String,
}

impl AgentIdentity {
    /// Identity used by `init` scaffolding before the user edits it.
    pub fn placeholder() -> Self {
        Self {
            name: "reviewer".to_string(),
            version: "0.1.0".to_string(),
            domain: "unspecified".to_string(),
            purpose: "Review artifacts against a completion checklist".to_string(),
        }
    }

    /// All required fields present and non-empty.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.version.trim().is_empty()
            && !self.domain.trim().is_empty()
            && !self.purpose.trim().is_empty()
    }
}
