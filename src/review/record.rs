//! Review record: lifecycle and the approval transition.

use crate::error::AgetError;
use crate::review::checklist::{ApprovalDecision, Checklist};
use crate::review::finding::Finding;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Review lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Open,
    Approved,
    Closed,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Open => "open",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Closed => "closed",
        }
    }
}

/// One review of one artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Identifier derived from the artifact name; doubles as the file stem
    pub id: String,
    /// The work product under review
    pub artifact: String,
    pub status: ReviewStatus,
    pub checklist: Checklist,
    pub findings: Vec<Finding>,
    pub opened_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
}

impl Review {
    /// Start a review with the given checklist labels.
    pub fn start<I, S>(artifact: impl Into<String>, checklist_labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let artifact = artifact.into();
        Self {
            id: slugify(&artifact),
            artifact,
            status: ReviewStatus::Open,
            checklist: Checklist::from_labels(checklist_labels),
            findings: Vec::new(),
            opened_at: Utc::now(),
            approved_at: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == ReviewStatus::Open
    }

    /// Mark a checklist item complete. Only open reviews may change.
    pub fn check_item(&mut self, label: &str) -> Result<(), AgetError> {
        self.ensure_open()?;
        self.checklist.mark_complete(label)
    }

    /// Record a finding. Findings are append-only and never mutated.
    pub fn add_finding(&mut self, finding: Finding) -> Result<(), AgetError> {
        self.ensure_open()?;
        self.findings.push(finding);
        Ok(())
    }

    /// Request approval. The transition happens only when the gate allows it;
    /// a denial leaves the review open and reports the incomplete labels.
    pub fn request_approval(&mut self) -> Result<ApprovalDecision, AgetError> {
        self.ensure_open()?;
        let decision = self.checklist.evaluate_approval();
        if decision.allowed {
            self.status = ReviewStatus::Approved;
            self.approved_at = Some(Utc::now());
        }
        Ok(decision)
    }

    /// Close the review, discarding nothing; the record stays on disk for
    /// the session history.
    pub fn close(&mut self) -> Result<(), AgetError> {
        if self.status == ReviewStatus::Closed {
            return Err(AgetError::ReviewError(format!(
                "Review '{}' is already closed",
                self.id
            )));
        }
        self.status = ReviewStatus::Closed;
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), AgetError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(AgetError::ReviewError(format!(
                "Review '{}' is {} and cannot change",
                self.id,
                self.status.as_str()
            )))
        }
    }
}

/// Derive a filesystem-safe id from an artifact name.
pub fn slugify(artifact: &str) -> String {
    let slug: String = artifact
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    let trimmed = slug.trim_matches('-');
    let mut out = String::with_capacity(trimmed.len());
    let mut last_dash = false;
    for c in trimmed.chars() {
        if c == '-' {
            if !last_dash {
                out.push(c);
            }
            last_dash = true;
        } else {
            out.push(c);
            last_dash = false;
        }
    }
    if out.is_empty() {
        "review".to_string()
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::finding::Severity;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("docs/spec v2.md"), "docs-spec-v2-md");
        assert_eq!(slugify("///"), "review");
        assert_eq!(slugify("Plain"), "plain");
    }

    #[test]
    fn test_approval_denied_while_incomplete() {
        let mut review = Review::start("spec.md", ["read", "verify"]);
        review.check_item("read").unwrap();

        let decision = review.request_approval().unwrap();
        assert!(!decision.allowed);
        assert_eq!(decision.incomplete, vec!["verify".to_string()]);
        assert_eq!(review.status, ReviewStatus::Open);
        assert!(review.approved_at.is_none());
    }

    #[test]
    fn test_approval_allowed_when_complete() {
        let mut review = Review::start("spec.md", ["read"]);
        review.check_item("read").unwrap();

        let decision = review.request_approval().unwrap();
        assert!(decision.allowed);
        assert_eq!(review.status, ReviewStatus::Approved);
        assert!(review.approved_at.is_some());
    }

    #[test]
    fn test_approved_review_rejects_changes() {
        let mut review = Review::start("spec.md", ["read"]);
        review.check_item("read").unwrap();
        review.request_approval().unwrap();

        assert!(review.check_item("read").is_err());
        assert!(review
            .add_finding(Finding::new("spec.md", Severity::Minor, "d", "r"))
            .is_err());
        assert!(review.request_approval().is_err());
    }

    #[test]
    fn test_close_and_reclose() {
        let mut review = Review::start("spec.md", ["read"]);
        review.close().unwrap();
        assert_eq!(review.status, ReviewStatus::Closed);
        assert!(review.close().is_err());
    }

    #[test]
    fn test_findings_accumulate_on_open_review() {
        let mut review = Review::start("spec.md", ["read"]);
        review
            .add_finding(Finding::new("spec.md", Severity::Critical, "gap", "add"))
            .unwrap();
        review
            .add_finding(Finding::new("spec.md", Severity::Minor, "typo", "fix"))
            .unwrap();
        assert_eq!(review.findings.len(), 2);
    }
}
