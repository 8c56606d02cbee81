//! Output comparison and verification.
//!
//! A fixture case passes when the rendered output of the locale call equals
//! the expected text exactly. Cases the harness cannot execute render as
//! `unsupported:<reason>` and always fail.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::diff;
use crate::fixtures::FixtureCase;

/// Prefix of the rendering of a case that could not be executed.
pub const UNSUPPORTED_PREFIX: &str = "unsupported:";

/// Result of verifying a single fixture case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Case name; `both`-mode cases carry the mode they ran under.
    pub case_name: String,
    /// Locale entry point exercised (`setlocale`, `localeconv`, ...).
    pub function: String,
    /// Runtime mode the case ran under.
    pub mode: String,
    /// POSIX/C reference for the behavior.
    pub spec_section: String,
    /// Whether the rendering matched.
    pub passed: bool,
    /// Expected rendering.
    pub expected: String,
    /// Rendering produced by lconvshim.
    pub actual: String,
    /// Line diff, present only on failure.
    pub diff: Option<String>,
}

impl VerificationResult {
    /// Compare `actual` with what `case` expects under `mode`.
    #[must_use]
    pub fn compare(case: &FixtureCase, mode: &str, actual: String) -> Self {
        let case_name = if case.mode.eq_ignore_ascii_case("both") {
            format!("{} [{mode}]", case.name)
        } else {
            case.name.clone()
        };
        let passed = actual == case.expected_output;
        Self {
            case_name,
            function: case.function.clone(),
            mode: mode.to_string(),
            spec_section: case.spec_section.clone(),
            passed,
            diff: (!passed).then(|| diff::render_diff(&case.expected_output, &actual)),
            expected: case.expected_output.clone(),
            actual,
        }
    }

    /// True when the case never reached the locale call.
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        self.actual.starts_with(UNSUPPORTED_PREFIX)
    }
}

/// Pass count for one entry point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPointTally {
    pub passed: usize,
    pub total: usize,
}

/// Aggregate verification summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSummary {
    /// Cases run.
    pub total: usize,
    /// Cases whose rendering matched.
    pub passed: usize,
    /// Cases that differed or could not run.
    pub failed: usize,
    /// Per-case outcomes, in fixture order.
    pub results: Vec<VerificationResult>,
}

impl VerificationSummary {
    #[must_use]
    pub fn from_results(results: Vec<VerificationResult>) -> Self {
        let passed = results.iter().filter(|r| r.passed).count();
        Self {
            total: results.len(),
            passed,
            failed: results.len() - passed,
            results,
        }
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Failed results only.
    pub fn failures(&self) -> impl Iterator<Item = &VerificationResult> {
        self.results.iter().filter(|r| !r.passed)
    }

    /// Results whose function or inputs the harness could not execute.
    pub fn unsupported(&self) -> impl Iterator<Item = &VerificationResult> {
        self.results.iter().filter(|r| r.is_unsupported())
    }

    /// Pass counts keyed by entry point, in name order.
    #[must_use]
    pub fn by_function(&self) -> BTreeMap<&str, EntryPointTally> {
        let mut tallies: BTreeMap<&str, EntryPointTally> = BTreeMap::new();
        for r in &self.results {
            let tally = tallies.entry(r.function.as_str()).or_default();
            tally.total += 1;
            tally.passed += usize::from(r.passed);
        }
        tallies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(name: &str, function: &str, expected: &str, mode: &str) -> FixtureCase {
        FixtureCase {
            name: name.to_string(),
            function: function.to_string(),
            spec_section: "POSIX setlocale".to_string(),
            inputs: serde_json::Value::Null,
            expected_output: expected.to_string(),
            mode: mode.to_string(),
        }
    }

    #[test]
    fn both_mode_cases_are_tagged_with_the_active_mode() {
        let query = case("query", "setlocale", "C", "both");
        let r = VerificationResult::compare(&query, "hardened", "C".into());
        assert_eq!(r.case_name, "query [hardened]");
        assert_eq!(r.mode, "hardened");
        assert!(r.passed);
        assert!(r.diff.is_none());

        let reject = case("reject", "setlocale", "NULL", "strict");
        let r = VerificationResult::compare(&reject, "strict", "NULL".into());
        assert_eq!(r.case_name, "reject");
    }

    #[test]
    fn mismatch_keeps_both_renderings_and_a_diff() {
        let dp = case("dp", "localeconv", ",", "both");
        let r = VerificationResult::compare(&dp, "strict", ".".into());
        assert!(!r.passed);
        assert_eq!((r.expected.as_str(), r.actual.as_str()), (",", "."));
        assert!(r.diff.is_some());
        assert!(!r.is_unsupported());
    }

    #[test]
    fn summary_tallies_per_entry_point() {
        let run = |c: FixtureCase, actual: String| VerificationResult::compare(&c, "strict", actual);
        let results = vec![
            run(case("a", "setlocale", "C", "both"), "C".into()),
            run(case("b", "setlocale", "C", "both"), "NULL".into()),
            run(case("c", "localeconv", ".", "both"), ".".into()),
            run(
                case("d", "newlocale", "", "strict"),
                format!("{UNSUPPORTED_PREFIX}unknown function"),
            ),
        ];
        let summary = VerificationSummary::from_results(results);
        assert_eq!((summary.total, summary.passed, summary.failed), (4, 2, 2));
        assert!(!summary.all_passed());

        let tallies = summary.by_function();
        assert_eq!(tallies["setlocale"], EntryPointTally { passed: 1, total: 2 });
        assert_eq!(tallies["localeconv"], EntryPointTally { passed: 1, total: 1 });
        let order: Vec<_> = tallies.keys().copied().collect();
        assert_eq!(order, ["localeconv", "newlocale", "setlocale"]);

        let unsupported: Vec<_> = summary.unsupported().map(|r| r.case_name.as_str()).collect();
        assert_eq!(unsupported, ["d"]);
    }

    #[test]
    fn empty_summary_passes() {
        let summary = VerificationSummary::from_results(Vec::new());
        assert!(summary.all_passed());
        assert!(summary.by_function().is_empty());
    }
}
