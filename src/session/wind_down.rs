//! Wind-down protocol: session summary, sanity gate, handoff note.

use crate::error::AgetError;
use crate::identity::store::IdentityStore;
use crate::review::store::ReviewStore;
use crate::session::checks::{run_sanity_checks, CheckStatus, SanityReport};
use crate::session::state::SessionState;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Caller-provided wind-down options.
#[derive(Debug, Clone, Default)]
pub struct WindDownOptions {
    pub skip_checks: bool,
    pub handoff_notes: String,
    /// Write a session note even without pending work or notes
    pub always_write_note: bool,
}

/// Session timing for the summary.
#[derive(Debug, Clone, Serialize)]
pub struct SessionTiming {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started: Option<DateTime<Utc>>,
    pub ended: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<i64>,
}

/// Wind-down output: the full session summary.
#[derive(Debug, Clone, Serialize)]
pub struct WindDownReport {
    pub agent_name: String,
    pub session: SessionTiming,
    pub sanity_check: SanityReport,
    /// Ids of reviews still open at session end
    pub pending_reviews: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub handoff_notes: String,
    pub mandatory_handoff: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_file: Option<String>,
    pub clean_close: bool,
}

impl WindDownReport {
    /// Gather wind-down data, write the session note when required, and
    /// clear the session clock.
    pub fn gather(
        identity_store: &IdentityStore,
        review_store: &ReviewStore,
        aget_dir: &Path,
        sessions_dir: &Path,
        options: &WindDownOptions,
    ) -> Result<Self, AgetError> {
        let now = Utc::now();

        let mut state = SessionState::load(aget_dir);
        let started = state.end();
        let duration_seconds = started.map(|s| (now - s).num_seconds());

        let sanity_check = if options.skip_checks {
            SanityReport::skipped()
        } else {
            run_sanity_checks(identity_store, review_store, sessions_dir)
        };

        let pending_reviews: Vec<String> = review_store
            .open_reviews()?
            .iter()
            .map(|r| r.id.clone())
            .collect();

        let agent_name = identity_store
            .load()
            .map(|identity| identity.name)
            .unwrap_or_else(|_| "unknown".to_string());

        // Pending work makes the handoff note mandatory.
        let mandatory_handoff = !pending_reviews.is_empty();
        let wants_note = mandatory_handoff
            || options.always_write_note
            || !options.handoff_notes.is_empty();

        let mut report = Self {
            agent_name,
            session: SessionTiming {
                started,
                ended: now,
                duration_seconds,
            },
            sanity_check,
            pending_reviews,
            handoff_notes: options.handoff_notes.clone(),
            mandatory_handoff,
            session_file: None,
            clean_close: true,
        };

        if wants_note {
            let path = report.write_session_note(sessions_dir, now)?;
            report.session_file = Some(path.display().to_string());
        }

        if report.sanity_check.status == CheckStatus::Error {
            report.clean_close = false;
        }

        state.save(aget_dir)?;
        Ok(report)
    }

    /// Exit code contract: clean close 0, warnings 1, errors 2.
    pub fn exit_code(&self) -> i32 {
        match self.sanity_check.status {
            CheckStatus::Error => 2,
            CheckStatus::Warning => 1,
            CheckStatus::Healthy | CheckStatus::Skipped => 0,
        }
    }

    fn write_session_note(
        &self,
        sessions_dir: &Path,
        now: DateTime<Utc>,
    ) -> Result<PathBuf, AgetError> {
        std::fs::create_dir_all(sessions_dir)
            .map_err(|e| AgetError::storage_io(&sessions_dir.display().to_string(), e))?;

        let session_id = format!("session_{}", now.format("%Y-%m-%d_%H%M"));
        let path = sessions_dir.join(format!("{}.md", session_id));
        let trigger = if self.mandatory_handoff {
            "mandatory (pending reviews)"
        } else {
            "voluntary"
        };

        let notes = if self.handoff_notes.is_empty() {
            "No notes provided."
        } else {
            &self.handoff_notes
        };
        let pending = if self.pending_reviews.is_empty() {
            "None.".to_string()
        } else {
            self.pending_reviews
                .iter()
                .map(|id| format!("- {}", id))
                .collect::<Vec<_>>()
                .join("\n")
        };

        let content = format!(
            "---\nsession_id: {id}\ndate: {date}\nagent_name: \"{agent}\"\ntrigger: {trigger}\nstatus: completed\n---\n\n\
             # Session: {date}\n\n## Notes\n\n{notes}\n\n## Pending Reviews\n\n{pending}\n\n---\n\n\
             *Session ended: {ended}*\n",
            id = session_id,
            date = now.format("%Y-%m-%d"),
            agent = self.agent_name,
            trigger = trigger,
            notes = notes,
            pending = pending,
            ended = now.format("%Y-%m-%d %H:%M UTC"),
        );

        std::fs::write(&path, content)
            .map_err(|e| AgetError::storage_io(&path.display().to_string(), e))?;
        Ok(path)
    }
}

/// Format a duration in human-readable form.
pub fn format_duration(seconds: Option<i64>) -> String {
    let Some(seconds) = seconds else {
        return "unknown".to_string();
    };
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdentitySection;
    use crate::identity::capability::CapabilityVocabulary;
    use crate::identity::profile::AgentIdentity;
    use crate::review::record::Review;
    use crate::session::wake::WakeReport;

    fn fixture(temp: &tempfile::TempDir) -> (IdentityStore, ReviewStore, PathBuf, PathBuf) {
        let aget_dir = temp.path().join(".aget");
        let identity_store = IdentityStore::new(aget_dir.clone(), &IdentitySection::default());
        identity_store.save(&AgentIdentity::placeholder()).unwrap();
        identity_store
            .save_capabilities(&CapabilityVocabulary::starter())
            .unwrap();
        let review_store = ReviewStore::new(&aget_dir);
        let sessions_dir = temp.path().join("sessions");
        (identity_store, review_store, aget_dir, sessions_dir)
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(None), "unknown");
        assert_eq!(format_duration(Some(42)), "42s");
        assert_eq!(format_duration(Some(180)), "3m");
        assert_eq!(format_duration(Some(7500)), "2h 5m");
    }

    #[test]
    fn test_clean_close_without_pending_work() {
        let temp = tempfile::tempdir().unwrap();
        let (identity_store, review_store, aget_dir, sessions_dir) = fixture(&temp);

        let report = WindDownReport::gather(
            &identity_store,
            &review_store,
            &aget_dir,
            &sessions_dir,
            &WindDownOptions::default(),
        )
        .unwrap();

        assert!(report.clean_close);
        assert!(!report.mandatory_handoff);
        assert!(report.session_file.is_none());
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_pending_review_triggers_mandatory_handoff() {
        let temp = tempfile::tempdir().unwrap();
        let (identity_store, review_store, aget_dir, sessions_dir) = fixture(&temp);
        review_store.save(&Review::start("spec.md", ["read"])).unwrap();

        let report = WindDownReport::gather(
            &identity_store,
            &review_store,
            &aget_dir,
            &sessions_dir,
            &WindDownOptions::default(),
        )
        .unwrap();

        assert!(report.mandatory_handoff);
        assert_eq!(report.pending_reviews, vec!["spec-md".to_string()]);
        let note = report.session_file.expect("session note should be written");
        let content = std::fs::read_to_string(note).unwrap();
        assert!(content.contains("trigger: mandatory"));
        assert!(content.contains("- spec-md"));
    }

    #[test]
    fn test_notes_written_to_session_file() {
        let temp = tempfile::tempdir().unwrap();
        let (identity_store, review_store, aget_dir, sessions_dir) = fixture(&temp);

        let options = WindDownOptions {
            handoff_notes: "Resume at section 4".to_string(),
            ..Default::default()
        };
        let report = WindDownReport::gather(
            &identity_store,
            &review_store,
            &aget_dir,
            &sessions_dir,
            &options,
        )
        .unwrap();

        let note = report.session_file.expect("session note should be written");
        let content = std::fs::read_to_string(note).unwrap();
        assert!(content.contains("Resume at section 4"));
        assert!(content.contains("trigger: voluntary"));
    }

    #[test]
    fn test_wind_down_clears_session_clock() {
        let temp = tempfile::tempdir().unwrap();
        let (identity_store, review_store, aget_dir, sessions_dir) = fixture(&temp);
        WakeReport::gather(&identity_store, &review_store, &aget_dir).unwrap();

        let report = WindDownReport::gather(
            &identity_store,
            &review_store,
            &aget_dir,
            &sessions_dir,
            &WindDownOptions::default(),
        )
        .unwrap();

        assert!(report.session.started.is_some());
        assert!(report.session.duration_seconds.is_some());
        let state = SessionState::load(&aget_dir);
        assert!(state.current_session.is_none());
    }

    #[test]
    fn test_skip_checks_reports_skipped() {
        let temp = tempfile::tempdir().unwrap();
        let (identity_store, review_store, aget_dir, sessions_dir) = fixture(&temp);

        let options = WindDownOptions {
            skip_checks: true,
            ..Default::default()
        };
        let report = WindDownReport::gather(
            &identity_store,
            &review_store,
            &aget_dir,
            &sessions_dir,
            &options,
        )
        .unwrap();

        assert_eq!(report.sanity_check.status, CheckStatus::Skipped);
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_missing_identity_is_unclean_close() {
        let temp = tempfile::tempdir().unwrap();
        let aget_dir = temp.path().join(".aget");
        std::fs::create_dir_all(&aget_dir).unwrap();
        let identity_store = IdentityStore::new(aget_dir.clone(), &IdentitySection::default());
        let review_store = ReviewStore::new(&aget_dir);

        let report = WindDownReport::gather(
            &identity_store,
            &review_store,
            &aget_dir,
            &temp.path().join("sessions"),
            &WindDownOptions::default(),
        )
        .unwrap();

        assert!(!report.clean_close);
        assert_eq!(report.exit_code(), 2);
    }
}
