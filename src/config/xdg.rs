//! Path resolution: global config home and agent root discovery.

use crate::config::settings::AGET_DIR;
use crate::error::AgetError;
use std::path::{Path, PathBuf};

/// Levels walked upward when searching for the agent root.
const AGENT_ROOT_SEARCH_DEPTH: usize = 4;

/// Resolve the global config directory.
///
/// Precedence: `AGET_CONFIG_HOME`, then `XDG_CONFIG_HOME/aget`, then the
/// platform config directory from `directories`.
pub fn config_home() -> Result<PathBuf, AgetError> {
    if let Ok(home) = std::env::var("AGET_CONFIG_HOME") {
        if !home.is_empty() {
            return Ok(PathBuf::from(home));
        }
    }
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return Ok(PathBuf::from(xdg).join("aget"));
        }
    }
    directories::ProjectDirs::from("", "aget", "aget")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            AgetError::ConfigError("Could not determine platform config directory".to_string())
        })
}

/// Find the agent root by walking upward looking for a `.aget/` directory.
///
/// Returns `None` when no `.aget/` directory exists within the search depth.
pub fn find_agent_root(start: &Path) -> Option<PathBuf> {
    let mut path = start.to_path_buf();
    for _ in 0..AGENT_ROOT_SEARCH_DEPTH {
        if path.join(AGET_DIR).is_dir() {
            return Some(path);
        }
        match path.parent() {
            Some(parent) if parent != path => path = parent.to_path_buf(),
            _ => break,
        }
    }
    None
}

/// The `.aget/` metadata directory under an agent root.
pub fn aget_dir(agent_root: &Path) -> PathBuf {
    agent_root.join(AGET_DIR)
}
