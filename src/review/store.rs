//! Review persistence: JSON records plus a plain-text findings log.

use crate::error::AgetError;
use crate::review::finding::Finding;
use crate::review::record::{Review, ReviewStatus};
use std::path::{Path, PathBuf};

/// Stores review records under `<aget_dir>/reviews/`.
///
/// Each review is one JSON file named by its id; findings are additionally
/// appended to `<id>.findings.md` as an immutable text record.
pub struct ReviewStore {
    reviews_dir: PathBuf,
}

impl ReviewStore {
    pub fn new(aget_dir: &Path) -> Self {
        Self {
            reviews_dir: aget_dir.join("reviews"),
        }
    }

    pub fn reviews_dir(&self) -> &Path {
        &self.reviews_dir
    }

    /// Path of the JSON record for a review id.
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.reviews_dir.join(format!("{}.json", id))
    }

    /// Path of the findings text log for a review id.
    pub fn findings_log_path(&self, id: &str) -> PathBuf {
        self.reviews_dir.join(format!("{}.findings.md", id))
    }

    /// Persist a review record.
    pub fn save(&self, review: &Review) -> Result<(), AgetError> {
        std::fs::create_dir_all(&self.reviews_dir)
            .map_err(|e| AgetError::storage_io(&self.reviews_dir.display().to_string(), e))?;
        let text = serde_json::to_string_pretty(review)
            .map_err(|e| AgetError::StorageError(format!("Failed to serialize review: {}", e)))?;
        let path = self.path_for(&review.id);
        std::fs::write(&path, text)
            .map_err(|e| AgetError::storage_io(&path.display().to_string(), e))
    }

    /// Load a review record by id.
    pub fn load(&self, id: &str) -> Result<Review, AgetError> {
        let path = self.path_for(id);
        let content = std::fs::read_to_string(&path).map_err(|_| {
            AgetError::ReviewError(format!("No review found with id '{}'", id))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            AgetError::StorageError(format!(
                "Failed to parse review record {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// All persisted reviews, sorted by id.
    pub fn list(&self) -> Result<Vec<Review>, AgetError> {
        if !self.reviews_dir.is_dir() {
            return Ok(Vec::new());
        }
        let entries = std::fs::read_dir(&self.reviews_dir)
            .map_err(|e| AgetError::storage_io(&self.reviews_dir.display().to_string(), e))?;
        let mut reviews = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| AgetError::storage_io(&self.reviews_dir.display().to_string(), e))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let content = std::fs::read_to_string(&path)
                .map_err(|e| AgetError::storage_io(&path.display().to_string(), e))?;
            let review: Review = serde_json::from_str(&content).map_err(|e| {
                AgetError::StorageError(format!(
                    "Failed to parse review record {}: {}",
                    path.display(),
                    e
                ))
            })?;
            reviews.push(review);
        }
        reviews.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(reviews)
    }

    /// Reviews still open, sorted by id.
    pub fn open_reviews(&self) -> Result<Vec<Review>, AgetError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|r| r.status == ReviewStatus::Open)
            .collect())
    }

    /// Resolve the review a command targets: an explicit id, or the sole
    /// open review when unambiguous.
    pub fn resolve_open(&self, id: Option<&str>) -> Result<Review, AgetError> {
        if let Some(id) = id {
            return self.load(id);
        }
        let mut open = self.open_reviews()?;
        match open.len() {
            0 => Err(AgetError::ReviewError(
                "No open review. Start one with 'aget review start <artifact>'".to_string(),
            )),
            1 => Ok(open.remove(0)),
            n => Err(AgetError::ReviewError(format!(
                "{} reviews are open; pass --review <id> to pick one",
                n
            ))),
        }
    }

    /// Append a finding to the review's text log. The log is append-only;
    /// existing entries are never rewritten.
    pub fn append_finding_log(&self, id: &str, finding: &Finding) -> Result<PathBuf, AgetError> {
        use std::io::Write;

        std::fs::create_dir_all(&self.reviews_dir)
            .map_err(|e| AgetError::storage_io(&self.reviews_dir.display().to_string(), e))?;
        let path = self.findings_log_path(id);
        let mut entry = String::new();
        if !path.exists() {
            entry.push_str(&format!("# Findings: {}\n\n", finding.artifact));
        }
        entry.push_str(&format!(
            "## [{}] {}\n\nRecorded: {}\n\n{}\n\nRemediation: {}\n\n",
            finding.severity,
            finding.artifact,
            finding.recorded_at.format("%Y-%m-%d %H:%M UTC"),
            finding.description,
            finding.remediation,
        ));
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| AgetError::storage_io(&path.display().to_string(), e))?;
        file.write_all(entry.as_bytes())
            .map_err(|e| AgetError::storage_io(&path.display().to_string(), e))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::finding::Severity;

    fn store_in(temp: &tempfile::TempDir) -> ReviewStore {
        ReviewStore::new(&temp.path().join(".aget"))
    }

    #[test]
    fn test_save_load_round_trip() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(&temp);
        let review = Review::start("spec.md", ["read", "verify"]);
        store.save(&review).unwrap();

        let back = store.load(&review.id).unwrap();
        assert_eq!(back.id, review.id);
        assert_eq!(back.artifact, "spec.md");
        assert_eq!(back.checklist.len(), 2);
        assert_eq!(back.status, ReviewStatus::Open);
    }

    #[test]
    fn test_load_unknown_id_is_error() {
        let temp = tempfile::tempdir().unwrap();
        assert!(store_in(&temp).load("missing").is_err());
    }

    #[test]
    fn test_list_empty_without_dir() {
        let temp = tempfile::tempdir().unwrap();
        assert!(store_in(&temp).list().unwrap().is_empty());
    }

    #[test]
    fn test_resolve_open_single() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(&temp);
        let review = Review::start("a.md", ["read"]);
        store.save(&review).unwrap();

        let resolved = store.resolve_open(None).unwrap();
        assert_eq!(resolved.id, review.id);
    }

    #[test]
    fn test_resolve_open_ambiguous() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(&temp);
        store.save(&Review::start("a.md", ["read"])).unwrap();
        store.save(&Review::start("b.md", ["read"])).unwrap();

        assert!(store.resolve_open(None).is_err());
    }

    #[test]
    fn test_resolve_open_none() {
        let temp = tempfile::tempdir().unwrap();
        assert!(store_in(&temp).resolve_open(None).is_err());
    }

    #[test]
    fn test_findings_log_accumulates() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(&temp);
        let first = Finding::new("spec.md", Severity::Critical, "gap", "add section");
        let second = Finding::new("spec.md", Severity::Minor, "typo", "fix");

        store.append_finding_log("spec-md", &first).unwrap();
        let path = store.append_finding_log("spec-md", &second).unwrap();

        let log = std::fs::read_to_string(path).unwrap();
        assert!(log.starts_with("# Findings: spec.md"));
        assert!(log.contains("Remediation: add section"));
        // Entries stay in recording order; earlier ones are never rewritten.
        let first = log.find("[critical]").unwrap();
        let second = log.find("[minor]").unwrap();
        assert!(first < second);
    }
}
