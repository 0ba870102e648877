// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Plain-text and JSON rendering of audit reports

use crate::audit::{AuditReport, RegionReport, NO_RESOURCES_RATIONALE};
use crate::error::Result;

/// Appended to every text report
pub const PROJECT_WIDE_NOTE: &str = "Note: This audit covers custom code for the selected page only. \
Project-wide custom code (Site Settings > Custom Code) must be reviewed manually.";

/// Render a report as plain text
pub fn render_text(report: &AuditReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== Custom Code Audit: {} ({}) ===\n",
        report.page_name, report.page_id
    ));
    out.push_str(&format!(
        "Run #{} at {}\n",
        report.run_id,
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    for region in report.regions() {
        out.push('\n');
        render_region(&mut out, region);
    }

    out.push_str(&format!("\nSummary: {}\n", report.summary()));
    out.push_str(&format!("\n{}\n", PROJECT_WIDE_NOTE));
    out
}

/// Render one region: raw code, then one line per entry
pub fn render_region(out: &mut String, region: &RegionReport) {
    out.push_str(&format!("--- {} custom code ---\n", region.region));
    for line in region.display_code().lines() {
        out.push_str(&format!("    {}\n", line));
    }

    out.push_str(&format!("--- {} resources ---\n", region.region));
    if region.entries.is_no_resources() {
        out.push_str(&format!("  [NONE] {}\n", NO_RESOURCES_RATIONALE));
        return;
    }

    for entry in region.entries.entries() {
        out.push_str(&format!("  [{}] {}\n", entry.category, entry.reference));
        out.push_str(&format!("      {}\n", entry.rationale));
    }
}

/// Render a report as pretty JSON
pub fn render_json(report: &AuditReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
