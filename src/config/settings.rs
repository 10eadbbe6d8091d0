//! Configuration shape for the aget CLI.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the agent metadata directory searched for when resolving the
/// agent root.
pub const AGET_DIR: &str = ".aget";

/// Top-level configuration, deserialized from the merged source stack.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgetConfig {
    #[serde(default)]
    pub identity: IdentitySection,

    #[serde(default)]
    pub session: SessionSection,

    #[serde(default)]
    pub review: ReviewSection,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Identity file locations, relative to the `.aget/` directory unless
/// absolute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentitySection {
    /// Identity descriptor file (default: identity.toml)
    #[serde(default = "default_identity_file")]
    pub file: PathBuf,

    /// Capability vocabulary file (default: capabilities.yaml)
    #[serde(default = "default_capabilities_file")]
    pub capabilities_file: PathBuf,
}

fn default_identity_file() -> PathBuf {
    PathBuf::from("identity.toml")
}

fn default_capabilities_file() -> PathBuf {
    PathBuf::from("capabilities.yaml")
}

impl Default for IdentitySection {
    fn default() -> Self {
        Self {
            file: default_identity_file(),
            capabilities_file: default_capabilities_file(),
        }
    }
}

/// Session protocol settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSection {
    /// Directory for session notes, relative to the agent root (default: sessions)
    #[serde(default = "default_sessions_dir")]
    pub sessions_dir: PathBuf,

    /// Write a session note on wind-down even without pending reviews
    #[serde(default)]
    pub always_write_note: bool,
}

fn default_sessions_dir() -> PathBuf {
    PathBuf::from("sessions")
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            sessions_dir: default_sessions_dir(),
            always_write_note: false,
        }
    }
}

/// Review workflow settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSection {
    /// Checklist items seeded into every new review unless overridden
    #[serde(default = "default_checklist")]
    pub default_checklist: Vec<String>,
}

fn default_checklist() -> Vec<String> {
    vec![
        "Scope confirmed".to_string(),
        "Artifact read end to end".to_string(),
        "Findings recorded with severity".to_string(),
        "Remediations actionable".to_string(),
    ]
}

impl Default for ReviewSection {
    fn default() -> Self {
        Self {
            default_checklist: default_checklist(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_sections() {
        let config = AgetConfig::default();
        assert_eq!(config.identity.file, PathBuf::from("identity.toml"));
        assert_eq!(
            config.identity.capabilities_file,
            PathBuf::from("capabilities.yaml")
        );
        assert_eq!(config.session.sessions_dir, PathBuf::from("sessions"));
        assert!(!config.session.always_write_note);
        assert_eq!(config.review.default_checklist.len(), 4);
    }

    #[test]
    fn test_config_deserializes_from_empty_table() {
        let config: AgetConfig = toml::from_str("").unwrap();
        assert_eq!(config.review.default_checklist.len(), 4);
    }

    #[test]
    fn test_config_partial_override() {
        let config: AgetConfig = toml::from_str(
            r#"
            [review]
            default_checklist = ["Only item"]
            "#,
        )
        .unwrap();
        assert_eq!(config.review.default_checklist, vec!["Only item"]);
        assert_eq!(config.identity.file, PathBuf::from("identity.toml"));
    }
}
