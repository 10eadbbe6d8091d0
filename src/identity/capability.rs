//! Capability vocabulary: static labels and definitions, no inference.

use crate::error::AgetError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One capability entry in the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    /// Stable identifier (e.g. "checklist-discipline")
    pub id: String,
    /// Human-readable label
    pub label: String,
    /// Optional one-line definition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The full vocabulary file shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapabilityVocabulary {
    #[serde(default)]
    pub capabilities: Vec<Capability>,
}

impl CapabilityVocabulary {
    /// Load the vocabulary from a YAML file. A missing file yields an empty
    /// vocabulary; a malformed file is an error.
    pub fn load(path: &Path) -> Result<Self, AgetError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            AgetError::IdentityError(format!(
                "Failed to read capability file {}: {}",
                path.display(),
                e
            ))
        })?;
        serde_yaml::from_str(&content).map_err(|e| {
            AgetError::IdentityError(format!(
                "Failed to parse capability file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Save the vocabulary as YAML.
    pub fn save(&self, path: &Path) -> Result<(), AgetError> {
        let text = serde_yaml::to_string(self)
            .map_err(|e| AgetError::IdentityError(format!("Failed to serialize vocabulary: {}", e)))?;
        std::fs::write(path, text)
            .map_err(|e| AgetError::storage_io(&path.display().to_string(), e))
    }

    /// Vocabulary seeded by `init`.
    pub fn starter() -> Self {
        Self {
            capabilities: vec![
                Capability {
                    id: "checklist-discipline".to_string(),
                    label: "Checklist discipline".to_string(),
                    description: Some(
                        "Never approve an artifact with incomplete checklist items".to_string(),
                    ),
                },
                Capability {
                    id: "finding-tracking".to_string(),
                    label: "Finding tracking".to_string(),
                    description: Some(
                        "Record findings with severity and remediation".to_string(),
                    ),
                },
                Capability {
                    id: "session-protocol".to_string(),
                    label: "Session protocol".to_string(),
                    description: Some("Wake and wind-down with handoff notes".to_string()),
                },
            ],
        }
    }
}
