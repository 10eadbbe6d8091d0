//! Identity validation: check list plus errors, reported per agent.

use crate::identity::store::IdentityStore;

/// Validation result for an identity configuration.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub agent_name: String,
    pub checks: Vec<(String, bool)>,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn new(agent_name: String) -> Self {
        Self {
            agent_name,
            checks: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn add_check(&mut self, description: &str, passed: bool) {
        self.checks.push((description.to_string(), passed));
    }

    pub fn add_error(&mut self, error: String) {
        self.errors.push(error);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty() && self.checks.iter().all(|(_, passed)| *passed)
    }

    pub fn total_checks(&self) -> usize {
        self.checks.len()
    }

    pub fn passed_checks(&self) -> usize {
        self.checks.iter().filter(|(_, passed)| *passed).count()
    }
}

/// Validate the identity descriptor and capability vocabulary on disk.
pub fn validate_identity(store: &IdentityStore) -> ValidationResult {
    let mut result = ValidationResult::new(String::new());

    if !store.identity_path().exists() {
        result.add_error(format!(
            "Identity file not found: {}",
            store.identity_path().display()
        ));
        return result;
    }
    result.add_check("Identity file exists", true);

    let identity = match store.load() {
        Ok(identity) => identity,
        Err(e) => {
            result.add_error(format!("Failed to load identity: {}", e));
            return result;
        }
    };
    result.add_check("Identity file parses", true);
    result.agent_name = identity.name.clone();

    if identity.is_complete() {
        result.add_check("Required fields non-empty", true);
    } else {
        result.add_error(
            "Identity has empty fields (name, version, domain, purpose are required)".to_string(),
        );
    }

    // Vocabulary is optional; only a malformed file is an error.
    if store.capabilities_path().exists() {
        match store.load_capabilities() {
            Ok(vocab) => {
                result.add_check("Capability vocabulary parses", true);
                result.add_check(
                    "Capability vocabulary non-empty",
                    !vocab.capabilities.is_empty(),
                );
            }
            Err(e) => result.add_error(format!("Capability vocabulary invalid: {}", e)),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdentitySection;
    use crate::identity::capability::CapabilityVocabulary;
    use crate::identity::profile::AgentIdentity;

    fn store_in(temp: &tempfile::TempDir) -> IdentityStore {
        IdentityStore::new(temp.path().join(".aget"), &IdentitySection::default())
    }

    #[test]
    fn test_validation_result_counts() {
        let mut result = ValidationResult::new("r".to_string());
        assert!(result.is_valid());
        result.add_check("a", true);
        result.add_check("b", false);
        assert!(!result.is_valid());
        assert_eq!(result.total_checks(), 2);
        assert_eq!(result.passed_checks(), 1);
    }

    #[test]
    fn test_validate_missing_identity() {
        let temp = tempfile::tempdir().unwrap();
        let result = validate_identity(&store_in(&temp));
        assert!(!result.is_valid());
        assert!(!result.errors.is_empty());
    }

    #[test]
    fn test_validate_complete_identity() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(&temp);
        store.save(&AgentIdentity::placeholder()).unwrap();
        store
            .save_capabilities(&CapabilityVocabulary::starter())
            .unwrap();
        let result = validate_identity(&store);
        assert!(result.is_valid(), "errors: {:?}", result.errors);
        assert_eq!(result.agent_name, "reviewer");
    }

    #[test]
    fn test_validate_empty_field_fails() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(&temp);
        let mut identity = AgentIdentity::placeholder();
        identity.purpose = String::new();
        store.save(&identity).unwrap();
        store
            .save_capabilities(&CapabilityVocabulary::starter())
            .unwrap();
        let result = validate_identity(&store);
        assert!(!result.is_valid());
    }
}
