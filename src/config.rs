//! Layered configuration: defaults, global file, agent file, environment.

pub mod facade;
pub mod merge;
pub mod settings;
pub mod xdg;

pub use facade::ConfigLoader;
pub use settings::{AgetConfig, IdentitySection, ReviewSection, SessionSection};
pub use xdg::find_agent_root;
