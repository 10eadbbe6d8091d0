//! MergeService: composes config sources and deserializes to AgetConfig.

use crate::config::settings::AgetConfig;
use crate::config::xdg;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File};
use std::path::Path;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config for an agent root.
    /// Precedence: global file (lowest) -> agent `.aget/config.toml` -> environment (highest).
    pub fn load(agent_root: &Path) -> Result<AgetConfig, ConfigError> {
        let mut builder = config::Config::builder();
        builder = Self::add_global_file(builder);
        builder = builder.add_source(
            File::from(xdg::aget_dir(agent_root).join("config.toml")).required(false),
        );
        builder = Self::add_environment(builder);

        let merged = builder.build()?;
        merged.try_deserialize()
    }

    /// Load config from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<AgetConfig, ConfigError> {
        let builder = config::Config::builder()
            .add_source(File::from(path.to_path_buf()))
            .add_source(
                Environment::with_prefix("AGET")
                    .separator("__")
                    .try_parsing(true),
            );

        let merged = builder.build()?;
        merged.try_deserialize()
    }

    fn add_global_file(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
        match xdg::config_home() {
            Ok(home) => builder.add_source(File::from(home.join("config.toml")).required(false)),
            // No resolvable config home: fall through to the other sources.
            Err(_) => builder,
        }
    }

    fn add_environment(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
        builder.add_source(
            Environment::with_prefix("AGET")
                .separator("__")
                .try_parsing(true),
        )
    }
}
