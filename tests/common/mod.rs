//! Shared fixtures for integration tests.

use aget::config::AgetConfig;
use aget::identity::{AgentIdentity, CapabilityVocabulary, IdentityStore};
use aget::tooling::CliContext;
use std::path::PathBuf;
use tempfile::TempDir;

/// A scaffolded agent root in a temporary directory.
pub struct TestAgent {
    // Held so the directory outlives the test body.
    pub temp: TempDir,
    pub root: PathBuf,
}

impl TestAgent {
    /// Context pinned to the sandbox defaults: no global config file and no
    /// `AGET__` environment overlay can reach it.
    pub fn context(&self) -> CliContext {
        CliContext::with_config(self.root.clone(), AgetConfig::default())
    }
}

/// Create an agent root with a complete identity and starter capabilities.
pub fn scaffold_agent() -> TestAgent {
    let temp = TempDir::new().expect("temp dir");
    let root = temp.path().to_path_buf();
    let aget_dir = root.join(".aget");
    let config = AgetConfig::default();

    let store = IdentityStore::new(aget_dir, &config.identity);
    store
        .save(&AgentIdentity {
            name: "doc-reviewer".to_string(),
            version: "1.0.0".to_string(),
            domain: "documentation".to_string(),
            purpose: "Review project documentation for accuracy".to_string(),
        })
        .expect("write identity");
    store
        .save_capabilities(&CapabilityVocabulary::starter())
        .expect("write capabilities");

    TestAgent { temp, root }
}
