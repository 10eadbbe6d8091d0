//! Review command service: single entry point per review CLI command variant.
//!
//! Owns all review workflow logic; the CLI parses, calls one method per
//! variant, and formats output.

use crate::error::AgetError;
use crate::review::checklist::ApprovalDecision;
use crate::review::finding::{Finding, Severity};
use crate::review::record::{slugify, Review};
use crate::review::store::ReviewStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::str::FromStr;

pub struct ReviewCommandService;

/// Result of review start command.
#[derive(Debug, Clone)]
pub struct ReviewStartResult {
    pub id: String,
    pub artifact: String,
    pub record_path: PathBuf,
    pub items: Vec<String>,
}

/// Result of review check command.
#[derive(Debug, Clone)]
pub struct ReviewCheckResult {
    pub id: String,
    pub label: String,
    pub completed: usize,
    pub total: usize,
}

/// Result of review finding command.
#[derive(Debug, Clone)]
pub struct ReviewFindingResult {
    pub id: String,
    pub severity: Severity,
    pub log_path: PathBuf,
}

/// Result of review approve command.
#[derive(Debug, Clone)]
pub struct ReviewApproveResult {
    pub id: String,
    pub artifact: String,
    pub decision: ApprovalDecision,
}

/// One checklist row for status output.
#[derive(Debug, Clone, Serialize)]
pub struct ChecklistItemRow {
    pub label: String,
    pub completed: bool,
}

/// One finding row for status output.
#[derive(Debug, Clone, Serialize)]
pub struct FindingRow {
    pub severity: String,
    pub description: String,
    pub remediation: String,
}

/// Result of review status command (JSON contract shape).
#[derive(Debug, Clone, Serialize)]
pub struct ReviewStatusOutput {
    pub id: String,
    pub artifact: String,
    pub status: String,
    pub items: Vec<ChecklistItemRow>,
    pub completed: usize,
    pub total: usize,
    pub findings: Vec<FindingRow>,
    pub opened_at: DateTime<Utc>,
}

/// One row for review list output.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewListRow {
    pub id: String,
    pub artifact: String,
    pub status: String,
    pub completed: usize,
    pub total: usize,
    pub findings: usize,
}

/// Result of review list command.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewListOutput {
    pub reviews: Vec<ReviewListRow>,
    pub total: usize,
}

/// Result of review close command.
#[derive(Debug, Clone)]
pub struct ReviewCloseResult {
    pub id: String,
}

impl ReviewCommandService {
    /// Start a review of an artifact. Items default to the configured
    /// checklist when none are passed.
    pub fn start(
        store: &ReviewStore,
        artifact: &str,
        items: &[String],
        default_checklist: &[String],
    ) -> Result<ReviewStartResult, AgetError> {
        let id = slugify(artifact);
        if let Ok(existing) = store.load(&id) {
            if existing.is_open() {
                return Err(AgetError::ReviewError(format!(
                    "Review '{}' is already open for this artifact",
                    id
                )));
            }
        }
        let labels: &[String] = if items.is_empty() {
            default_checklist
        } else {
            items
        };
        if labels.is_empty() {
            return Err(AgetError::ReviewError(
                "Checklist is empty: pass --item or configure review.default_checklist"
                    .to_string(),
            ));
        }
        let review = Review::start(artifact, labels.iter().cloned());
        store.save(&review)?;
        Ok(ReviewStartResult {
            record_path: store.path_for(&review.id),
            id: review.id,
            artifact: review.artifact,
            items: labels.to_vec(),
        })
    }

    /// Mark a checklist item complete on the targeted review.
    pub fn check(
        store: &ReviewStore,
        review_id: Option<&str>,
        label: &str,
    ) -> Result<ReviewCheckResult, AgetError> {
        let mut review = store.resolve_open(review_id)?;
        review.check_item(label)?;
        store.save(&review)?;
        Ok(ReviewCheckResult {
            id: review.id,
            label: label.to_string(),
            completed: review.checklist.completed_count(),
            total: review.checklist.len(),
        })
    }

    /// Record a finding on the targeted review. Severity is validated here;
    /// an unknown value never reaches the record.
    pub fn finding(
        store: &ReviewStore,
        review_id: Option<&str>,
        severity: &str,
        description: &str,
        remediation: &str,
    ) -> Result<ReviewFindingResult, AgetError> {
        let severity = Severity::from_str(severity)?;
        let mut review = store.resolve_open(review_id)?;
        let finding = Finding::new(review.artifact.clone(), severity, description, remediation);
        review.add_finding(finding.clone())?;
        store.save(&review)?;
        let log_path = store.append_finding_log(&review.id, &finding)?;
        Ok(ReviewFindingResult {
            id: review.id,
            severity,
            log_path,
        })
    }

    /// Request approval. Denial is a normal outcome, not an error.
    pub fn approve(
        store: &ReviewStore,
        review_id: Option<&str>,
    ) -> Result<ReviewApproveResult, AgetError> {
        let mut review = store.resolve_open(review_id)?;
        let decision = review.request_approval()?;
        if decision.allowed {
            store.save(&review)?;
        }
        Ok(ReviewApproveResult {
            id: review.id,
            artifact: review.artifact,
            decision,
        })
    }

    /// Status of the targeted review (any status, not just open).
    pub fn status(
        store: &ReviewStore,
        review_id: Option<&str>,
    ) -> Result<ReviewStatusOutput, AgetError> {
        let review = match review_id {
            Some(id) => store.load(id)?,
            None => store.resolve_open(None)?,
        };
        Ok(Self::status_output(&review))
    }

    /// All reviews, one row each.
    pub fn list(store: &ReviewStore) -> Result<ReviewListOutput, AgetError> {
        let rows: Vec<ReviewListRow> = store
            .list()?
            .iter()
            .map(|r| ReviewListRow {
                id: r.id.clone(),
                artifact: r.artifact.clone(),
                status: r.status.as_str().to_string(),
                completed: r.checklist.completed_count(),
                total: r.checklist.len(),
                findings: r.findings.len(),
            })
            .collect();
        Ok(ReviewListOutput {
            total: rows.len(),
            reviews: rows,
        })
    }

    /// Close the targeted review.
    pub fn close(
        store: &ReviewStore,
        review_id: Option<&str>,
    ) -> Result<ReviewCloseResult, AgetError> {
        let mut review = store.resolve_open(review_id)?;
        review.close()?;
        store.save(&review)?;
        Ok(ReviewCloseResult { id: review.id })
    }

    fn status_output(review: &Review) -> ReviewStatusOutput {
        ReviewStatusOutput {
            id: review.id.clone(),
            artifact: review.artifact.clone(),
            status: review.status.as_str().to_string(),
            items: review
                .checklist
                .items
                .iter()
                .map(|item| ChecklistItemRow {
                    label: item.label.clone(),
                    completed: item.completed,
                })
                .collect(),
            completed: review.checklist.completed_count(),
            total: review.checklist.len(),
            findings: review
                .findings
                .iter()
                .map(|f| FindingRow {
                    severity: f.severity.to_string(),
                    description: f.description.clone(),
                    remediation: f.remediation.clone(),
                })
                .collect(),
            opened_at: review.opened_at,
        }
    }
}
