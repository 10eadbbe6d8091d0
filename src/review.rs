//! Review workflow: checklists, findings, and the approval gate.
//!
//! The one enforceable invariant lives here: a review transitions to
//! approved only when every checklist item is complete.

pub mod checklist;
pub mod commands;
pub mod finding;
pub mod format;
pub mod record;
pub mod store;

pub use checklist::{ApprovalDecision, Checklist, ChecklistItem};
pub use commands::ReviewCommandService;
pub use finding::{Finding, Severity};
pub use record::{Review, ReviewStatus};
pub use store::ReviewStore;
