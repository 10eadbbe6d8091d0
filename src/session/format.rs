//! Format wake and wind-down reports as text banners.

use crate::session::checks::CheckStatus;
use crate::session::wake::WakeReport;
use crate::session::wind_down::{format_duration, WindDownReport};
use owo_colors::OwoColorize;

const BANNER_WIDTH: usize = 60;

fn banner(title: &str) -> String {
    let line = "=".repeat(BANNER_WIDTH);
    format!("{}\n{}\n{}\n", line, title.bold(), line)
}

/// Format the wake greeting.
pub fn format_wake_text(report: &WakeReport) -> String {
    let mut out = String::new();
    out.push_str(&banner("SESSION WAKE"));
    out.push('\n');
    out.push_str(&format!(
        "Agent: {} v{}\n",
        report.agent.name, report.agent.version
    ));
    out.push_str(&format!("Domain: {}\n", report.agent.domain));
    out.push_str(&format!("Purpose: {}\n", report.agent.purpose));
    out.push('\n');

    if !report.capabilities.is_empty() {
        out.push_str("Capabilities:\n");
        for capability in &report.capabilities {
            match &capability.description {
                Some(description) => {
                    out.push_str(&format!("  - {}: {}\n", capability.label, description))
                }
                None => out.push_str(&format!("  - {}\n", capability.label)),
            }
        }
        out.push('\n');
    }

    if report.open_reviews.is_empty() {
        out.push_str("No open reviews.\n");
    } else {
        out.push_str("Open reviews:\n");
        for review in &report.open_reviews {
            out.push_str(&format!(
                "  - {} ({}/{} checklist items complete)\n",
                review.id, review.completed, review.total
            ));
        }
    }
    out.push('\n');
    out.push_str(&format!(
        "Session started: {}\n",
        report.timestamp.format("%Y-%m-%d %H:%M UTC")
    ));
    out
}

/// Format the wind-down summary.
pub fn format_wind_down_text(report: &WindDownReport) -> String {
    let mut out = String::new();
    out.push_str(&banner("SESSION WIND DOWN"));
    out.push('\n');

    let sanity = &report.sanity_check;
    match sanity.status {
        CheckStatus::Healthy => out.push_str(&format!(
            "Sanity Gate: passed ({}/{})\n",
            sanity.checks_passed, sanity.checks_total
        )),
        CheckStatus::Warning => out.push_str(&format!(
            "Sanity Gate: WARNING ({}/{} passed)\n",
            sanity.checks_passed, sanity.checks_total
        )),
        CheckStatus::Error => out.push_str(&format!(
            "Sanity Gate: ERROR ({}/{} passed)\n",
            sanity.checks_passed, sanity.checks_total
        )),
        CheckStatus::Skipped => out.push_str("Sanity Gate: SKIPPED\n"),
    }
    if !sanity.message.is_empty() {
        out.push_str(&format!("  {}\n", sanity.message));
    }
    out.push('\n');

    out.push_str(&format!(
        "Session duration: {}\n\n",
        format_duration(report.session.duration_seconds)
    ));

    if !report.pending_reviews.is_empty() {
        out.push_str("Pending Reviews:\n");
        for id in &report.pending_reviews {
            out.push_str(&format!("  - {}\n", id));
        }
        if report.mandatory_handoff {
            out.push_str("  [MANDATORY HANDOFF: session note written]\n");
        }
        out.push('\n');
    }

    if let Some(ref session_file) = report.session_file {
        out.push_str(&format!("Session Note: {}\n\n", session_file));
    }

    out.push_str(&"=".repeat(BANNER_WIDTH));
    out.push_str("\nSession ended.\n");
    out
}
