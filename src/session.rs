//! Session protocol: wake banner, wind-down summary, handoff notes.

pub mod checks;
pub mod format;
pub mod state;
pub mod wake;
pub mod wind_down;

pub use checks::{run_sanity_checks, CheckStatus, SanityReport};
pub use state::SessionState;
pub use wake::WakeReport;
pub use wind_down::{WindDownOptions, WindDownReport};
