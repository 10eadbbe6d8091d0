//! Checklist items and the approval gate predicate.

use crate::error::AgetError;
use serde::{Deserialize, Serialize};

/// A single required step that must be marked complete before approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub label: String,
    pub completed: bool,
}

impl ChecklistItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            completed: false,
        }
    }
}

/// The checklist for one review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    pub items: Vec<ChecklistItem>,
}

/// Outcome of an approval request against a checklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalDecision {
    pub allowed: bool,
    /// Labels of incomplete items when denied; empty when allowed
    pub incomplete: Vec<String>,
}

impl Checklist {
    /// Build a checklist from item labels, all initially incomplete.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: labels.into_iter().map(ChecklistItem::new).collect(),
        }
    }

    /// Mark the item with the given label complete.
    pub fn mark_complete(&mut self, label: &str) -> Result<(), AgetError> {
        match self.items.iter_mut().find(|item| item.label == label) {
            Some(item) => {
                item.completed = true;
                Ok(())
            }
            None => Err(AgetError::ReviewError(format!(
                "No checklist item with label '{}'",
                label
            ))),
        }
    }

    /// Labels of items not yet complete, in checklist order.
    pub fn incomplete_labels(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|item| !item.completed)
            .map(|item| item.label.clone())
            .collect()
    }

    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|item| item.completed).count()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The approval gate: allowed only when every item is complete.
    pub fn evaluate_approval(&self) -> ApprovalDecision {
        let incomplete = self.incomplete_labels();
        ApprovalDecision {
            allowed: incomplete.is_empty(),
            incomplete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_incomplete_item_denies_approval() {
        let mut checklist = Checklist::from_labels(["read", "verify", "record"]);
        checklist.mark_complete("read").unwrap();
        checklist.mark_complete("record").unwrap();

        let decision = checklist.evaluate_approval();
        assert!(!decision.allowed);
        assert_eq!(decision.incomplete, vec!["verify".to_string()]);
    }

    #[test]
    fn test_all_complete_allows_approval() {
        let mut checklist = Checklist::from_labels(["read", "verify"]);
        checklist.mark_complete("read").unwrap();
        checklist.mark_complete("verify").unwrap();

        let decision = checklist.evaluate_approval();
        assert!(decision.allowed);
        assert!(decision.incomplete.is_empty());
    }

    #[test]
    fn test_empty_checklist_allows_approval() {
        let decision = Checklist::default().evaluate_approval();
        assert!(decision.allowed);
    }

    #[test]
    fn test_mark_unknown_label_is_error() {
        let mut checklist = Checklist::from_labels(["read"]);
        assert!(checklist.mark_complete("nonexistent").is_err());
    }

    #[test]
    fn test_mark_complete_is_idempotent() {
        let mut checklist = Checklist::from_labels(["read"]);
        checklist.mark_complete("read").unwrap();
        checklist.mark_complete("read").unwrap();
        assert_eq!(checklist.completed_count(), 1);
    }

    #[test]
    fn test_incomplete_labels_preserve_order() {
        let checklist = Checklist::from_labels(["c", "a", "b"]);
        assert_eq!(checklist.incomplete_labels(), vec!["c", "a", "b"]);
    }
}
