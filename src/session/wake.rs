//! Wake protocol: greet, report carried-over work, start the session clock.

use crate::error::AgetError;
use crate::identity::capability::Capability;
use crate::identity::profile::AgentIdentity;
use crate::identity::store::IdentityStore;
use crate::review::store::ReviewStore;
use crate::session::state::SessionState;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

/// One open review carried over from a previous session.
#[derive(Debug, Clone, Serialize)]
pub struct OpenReviewSummary {
    pub id: String,
    pub artifact: String,
    pub completed: usize,
    pub total: usize,
}

/// Wake output: who the agent is and what is pending.
#[derive(Debug, Clone, Serialize)]
pub struct WakeReport {
    pub timestamp: DateTime<Utc>,
    pub agent: AgentIdentity,
    pub capabilities: Vec<Capability>,
    pub open_reviews: Vec<OpenReviewSummary>,
}

impl WakeReport {
    /// Gather wake data and record the session start.
    pub fn gather(
        identity_store: &IdentityStore,
        review_store: &ReviewStore,
        aget_dir: &Path,
    ) -> Result<Self, AgetError> {
        let agent = identity_store.load()?;
        let capabilities = identity_store.load_capabilities()?.capabilities;
        let open_reviews = review_store
            .open_reviews()?
            .iter()
            .map(|r| OpenReviewSummary {
                id: r.id.clone(),
                artifact: r.artifact.clone(),
                completed: r.checklist.completed_count(),
                total: r.checklist.len(),
            })
            .collect();

        let now = Utc::now();
        let mut state = SessionState::load(aget_dir);
        state.begin(now);
        state.save(aget_dir)?;

        Ok(Self {
            timestamp: now,
            agent,
            capabilities,
            open_reviews,
        })
    }
}
