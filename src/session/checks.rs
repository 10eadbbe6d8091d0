//! Sanity gate: health checks run before the wind-down summary.

use crate::identity::store::IdentityStore;
use crate::identity::validation::validate_identity;
use crate::review::store::ReviewStore;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Overall status of the sanity gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Healthy,
    Warning,
    Error,
    Skipped,
}

/// Sanity check summary for wind-down output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanityReport {
    pub status: CheckStatus,
    pub checks_passed: usize,
    pub checks_total: usize,
    pub warnings: usize,
    pub errors: usize,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl SanityReport {
    pub fn skipped() -> Self {
        Self {
            status: CheckStatus::Skipped,
            checks_passed: 0,
            checks_total: 0,
            warnings: 0,
            errors: 0,
            message: "Sanity check skipped by user".to_string(),
        }
    }
}

/// Run the sanity gate: identity valid, review records parseable, sessions
/// directory writable.
pub fn run_sanity_checks(
    identity_store: &IdentityStore,
    review_store: &ReviewStore,
    sessions_dir: &Path,
) -> SanityReport {
    let mut passed = 0usize;
    let mut total = 0usize;
    let mut warnings = 0usize;
    let mut errors = 0usize;
    let mut messages: Vec<String> = Vec::new();

    total += 1;
    let identity_result = validate_identity(identity_store);
    if identity_result.is_valid() {
        passed += 1;
    } else {
        errors += 1;
        messages.push(match identity_result.errors.first() {
            Some(e) => format!("Identity invalid: {}", e),
            None => "Identity invalid".to_string(),
        });
    }

    total += 1;
    match review_store.list() {
        Ok(_) => passed += 1,
        Err(e) => {
            errors += 1;
            messages.push(format!("Review records unreadable: {}", e));
        }
    }

    total += 1;
    match std::fs::create_dir_all(sessions_dir) {
        Ok(()) => passed += 1,
        Err(e) => {
            warnings += 1;
            messages.push(format!(
                "Sessions directory not writable ({}): {}",
                sessions_dir.display(),
                e
            ));
        }
    }

    let status = if errors > 0 {
        CheckStatus::Error
    } else if warnings > 0 {
        CheckStatus::Warning
    } else {
        CheckStatus::Healthy
    };

    SanityReport {
        status,
        checks_passed: passed,
        checks_total: total,
        warnings,
        errors,
        message: messages.join("; "),
    }
}
