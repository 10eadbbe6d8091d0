//! Format review command results as text.

use crate::review::commands::{
    ReviewApproveResult, ReviewCheckResult, ReviewCloseResult, ReviewFindingResult,
    ReviewListOutput, ReviewStartResult, ReviewStatusOutput,
};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

pub fn format_start_text(result: &ReviewStartResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Review started: {} (artifact: {})\n",
        result.id, result.artifact
    ));
    out.push_str(&format!("Record: {}\n", result.record_path.display()));
    out.push_str("Checklist:\n");
    for item in &result.items {
        out.push_str(&format!("  [ ] {}\n", item));
    }
    out
}

pub fn format_check_text(result: &ReviewCheckResult) -> String {
    format!(
        "Checked '{}' on review {} ({}/{} complete)\n",
        result.label, result.id, result.completed, result.total
    )
}

pub fn format_finding_text(result: &ReviewFindingResult) -> String {
    format!(
        "Finding recorded on review {} (severity: {})\nLog: {}\n",
        result.id,
        result.severity,
        result.log_path.display()
    )
}

pub fn format_approve_text(result: &ReviewApproveResult) -> String {
    if result.decision.allowed {
        format!("Approved: {} (artifact: {})\n", result.id, result.artifact)
    } else {
        let mut out = String::new();
        out.push_str(&format!(
            "Approval DENIED for {}: checklist incomplete\n",
            result.id
        ));
        out.push_str("Incomplete items:\n");
        for label in &result.decision.incomplete {
            out.push_str(&format!("  [ ] {}\n", label));
        }
        out
    }
}

pub fn format_status_text(status: &ReviewStatusOutput) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Review")));
    out.push_str(&format!("  Id: {}\n", status.id));
    out.push_str(&format!("  Artifact: {}\n", status.artifact));
    out.push_str(&format!("  Status: {}\n", status.status));
    out.push_str(&format!(
        "  Opened: {}\n\n",
        status.opened_at.format("%Y-%m-%d %H:%M UTC")
    ));

    out.push_str(&format!("{}\n\n", format_section_heading("Checklist")));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Item", "Done"]);
    for item in &status.items {
        let done = if item.completed { "yes" } else { "no" };
        table.add_row(vec![item.label.clone(), done.to_string()]);
    }
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!(
        "Complete: {}/{}\n",
        status.completed, status.total
    ));

    if !status.findings.is_empty() {
        out.push_str(&format!("\n{}\n\n", format_section_heading("Findings")));
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Severity", "Description", "Remediation"]);
        for finding in &status.findings {
            table.add_row(vec![
                finding.severity.clone(),
                finding.description.clone(),
                finding.remediation.clone(),
            ]);
        }
        out.push_str(&format!("{}\n", table));
    }
    out
}

pub fn format_list_text(listing: &ReviewListOutput) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Reviews")));
    if listing.reviews.is_empty() {
        out.push_str("No reviews recorded.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Id", "Artifact", "Status", "Checklist", "Findings"]);
    for row in &listing.reviews {
        table.add_row(vec![
            row.id.clone(),
            row.artifact.clone(),
            row.status.clone(),
            format!("{}/{}", row.completed, row.total),
            row.findings.to_string(),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!("Total: {} reviews.\n", listing.total));
    out
}

pub fn format_close_text(result: &ReviewCloseResult) -> String {
    format!("Review closed: {}\n", result.id)
}
