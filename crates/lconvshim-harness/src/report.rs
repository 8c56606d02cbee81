//! Report generation for conformance results.

use serde::{Deserialize, Serialize};

use crate::verify::VerificationSummary;

/// A conformance report for one runtime mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformanceReport {
    pub title: String,
    /// Runtime mode tested (strict or hardened).
    pub mode: String,
    /// Timestamp (UTC).
    pub timestamp: String,
    pub summary: VerificationSummary,
}

impl ConformanceReport {
    /// Render the report as markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", self.title));
        out.push_str(&format!("- Mode: {}\n", self.mode));
        out.push_str(&format!("- Timestamp: {}\n", self.timestamp));
        out.push_str(&format!("- Total: {}\n", self.summary.total));
        out.push_str(&format!("- Passed: {}\n", self.summary.passed));
        out.push_str(&format!("- Failed: {}\n\n", self.summary.failed));

        out.push_str("| Entry point | Passed | Total |\n");
        out.push_str("|-------------|--------|-------|\n");
        for (function, tally) in self.summary.by_function() {
            out.push_str(&format!(
                "| {function} | {} | {} |\n",
                tally.passed, tally.total
            ));
        }
        out.push('\n');

        out.push_str("| Case | Section | Status |\n");
        out.push_str("|------|---------|--------|\n");
        for r in &self.summary.results {
            let status = if r.passed { "PASS" } else { "FAIL" };
            out.push_str(&format!(
                "| {} | {} | {} |\n",
                r.case_name, r.spec_section, status
            ));
        }

        let mut failures = self.summary.failures().peekable();
        if failures.peek().is_some() {
            out.push_str("\n## Failures\n");
            for r in failures {
                out.push_str(&format!("\n### {}\n\n```diff\n", r.case_name));
                out.push_str(r.diff.as_deref().unwrap_or(""));
                out.push_str("```\n");
            }
        }
        out
    }

    /// Render the report as JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
