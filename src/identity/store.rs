//! Identity persistence: identity.toml under the `.aget/` directory.

use crate::config::IdentitySection;
use crate::error::AgetError;
use crate::identity::capability::CapabilityVocabulary;
use crate::identity::profile::AgentIdentity;
use std::path::{Path, PathBuf};

/// Loads and saves the identity descriptor and capability vocabulary for one
/// agent root.
pub struct IdentityStore {
    aget_dir: PathBuf,
    identity_file: PathBuf,
    capabilities_file: PathBuf,
}

impl IdentityStore {
    pub fn new(aget_dir: PathBuf, section: &IdentitySection) -> Self {
        let identity_file = resolve(&aget_dir, &section.file);
        let capabilities_file = resolve(&aget_dir, &section.capabilities_file);
        Self {
            aget_dir,
            identity_file,
            capabilities_file,
        }
    }

    /// Path of the identity descriptor file.
    pub fn identity_path(&self) -> &Path {
        &self.identity_file
    }

    /// Path of the capability vocabulary file.
    pub fn capabilities_path(&self) -> &Path {
        &self.capabilities_file
    }

    /// Load the identity descriptor.
    pub fn load(&self) -> Result<AgentIdentity, AgetError> {
        let content = std::fs::read_to_string(&self.identity_file).map_err(|e| {
            AgetError::IdentityError(format!(
                "Failed to read identity file {}: {}",
                self.identity_file.display(),
                e
            ))
        })?;
        toml::from_str(&content).map_err(|e| {
            AgetError::IdentityError(format!(
                "Failed to parse identity file {}: {}",
                self.identity_file.display(),
                e
            ))
        })
    }

    /// Save the identity descriptor, creating the `.aget/` directory if needed.
    pub fn save(&self, identity: &AgentIdentity) -> Result<(), AgetError> {
        std::fs::create_dir_all(&self.aget_dir)
            .map_err(|e| AgetError::storage_io(&self.aget_dir.display().to_string(), e))?;
        let text = toml::to_string_pretty(identity)
            .map_err(|e| AgetError::IdentityError(format!("Failed to serialize identity: {}", e)))?;
        std::fs::write(&self.identity_file, text)
            .map_err(|e| AgetError::storage_io(&self.identity_file.display().to_string(), e))
    }

    /// Load the capability vocabulary (empty when the file is absent).
    pub fn load_capabilities(&self) -> Result<CapabilityVocabulary, AgetError> {
        CapabilityVocabulary::load(&self.capabilities_file)
    }

    /// Save the capability vocabulary.
    pub fn save_capabilities(&self, vocab: &CapabilityVocabulary) -> Result<(), AgetError> {
        std::fs::create_dir_all(&self.aget_dir)
            .map_err(|e| AgetError::storage_io(&self.aget_dir.display().to_string(), e))?;
        vocab.save(&self.capabilities_file)
    }
}

fn resolve(aget_dir: &Path, file: &Path) -> PathBuf {
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        aget_dir.join(file)
    }
}
