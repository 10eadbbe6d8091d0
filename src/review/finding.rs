//! Findings: documented issues with a fixed severity vocabulary.

use crate::error::AgetError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a finding. The set is closed; anything else is rejected at
/// creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Major,
    Minor,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Major => "major",
            Severity::Minor => "minor",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = AgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "major" => Ok(Severity::Major),
            "minor" => Ok(Severity::Minor),
            other => Err(AgetError::ReviewError(format!(
                "Invalid severity: {}. Must be critical, major, or minor",
                other
            ))),
        }
    }
}

/// A documented issue discovered during review. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// The work product the finding refers to
    pub artifact: String,
    pub severity: Severity,
    pub description: String,
    pub remediation: String,
    pub recorded_at: DateTime<Utc>,
}

impl Finding {
    pub fn new(
        artifact: impl Into<String>,
        severity: Severity,
        description: impl Into<String>,
        remediation: impl Into<String>,
    ) -> Self {
        Self {
            artifact: artifact.into(),
            severity,
            description: description.into(),
            remediation: remediation.into(),
            recorded_at: Utc::now(),
        }
    }
}
