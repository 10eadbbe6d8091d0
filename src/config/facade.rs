//! ConfigLoader facade delegating to the merge service.

use super::merge::MergeService;
use super::settings::AgetConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for an agent root from files and environment.
    pub fn load(agent_root: &Path) -> Result<AgetConfig, ConfigError> {
        MergeService::load(agent_root)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<AgetConfig, ConfigError> {
        MergeService::load_from_file(path)
    }

    /// Create default configuration.
    pub fn default() -> AgetConfig {
        AgetConfig::default()
    }
}
