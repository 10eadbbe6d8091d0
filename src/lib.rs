//! Aget: Reviewer Agent Session Tooling
//!
//! Configures a reviewer agent's identity and capability vocabulary, runs the
//! session protocol (wake banner, wind-down summary with handoff notes), and
//! tracks review checklists and findings, gating artifact approval on
//! checklist completion.

pub mod config;
pub mod error;
pub mod identity;
pub mod logging;
pub mod review;
pub mod session;
pub mod tooling;
