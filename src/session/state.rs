//! Session state: records when the current session started.

use crate::error::AgetError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const STATE_FILE: &str = "session_state.json";

/// The currently running session, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentSession {
    pub started: DateTime<Utc>,
}

/// Persisted session state under `.aget/session_state.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_session: Option<CurrentSession>,
}

impl SessionState {
    pub fn path(aget_dir: &Path) -> PathBuf {
        aget_dir.join(STATE_FILE)
    }

    /// Load state; missing or corrupt files fall back to the default so a
    /// session can always start.
    pub fn load(aget_dir: &Path) -> Self {
        let path = Self::path(aget_dir);
        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Persist state, creating the `.aget/` directory if needed.
    pub fn save(&self, aget_dir: &Path) -> Result<(), AgetError> {
        std::fs::create_dir_all(aget_dir)
            .map_err(|e| AgetError::storage_io(&aget_dir.display().to_string(), e))?;
        let path = Self::path(aget_dir);
        let text = serde_json::to_string_pretty(self)
            .map_err(|e| AgetError::SessionError(format!("Failed to serialize state: {}", e)))?;
        std::fs::write(&path, text)
            .map_err(|e| AgetError::storage_io(&path.display().to_string(), e))
    }

    /// Record a session start.
    pub fn begin(&mut self, started: DateTime<Utc>) {
        self.current_session = Some(CurrentSession { started });
    }

    /// Clear the running session; returns its start time when one existed.
    pub fn end(&mut self) -> Option<DateTime<Utc>> {
        self.current_session.take().map(|s| s.started)
    }
}
