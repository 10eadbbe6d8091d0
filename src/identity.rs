//! Agent identity and capability vocabulary.
//!
//! The identity descriptor and the capability list are static declarative
//! data: loaded at startup, immutable for the process lifetime.

pub mod capability;
pub mod profile;
pub mod store;
pub mod validation;

pub use capability::{Capability, CapabilityVocabulary};
pub use profile::AgentIdentity;
pub use store::IdentityStore;
pub use validation::{validate_identity, ValidationResult};
