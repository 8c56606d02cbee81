//! Test execution engine.

use crate::conformance::execute_fixture_case;
use crate::fixtures::{FixtureCase, FixtureSet};
use crate::verify::{UNSUPPORTED_PREFIX, VerificationResult};

/// Runs a fixture set and collects verification results.
pub struct TestRunner {
    /// Name of the test campaign.
    pub campaign: String,
    /// Mode being tested (strict or hardened).
    pub mode: String,
}

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub fn new(campaign: impl Into<String>, mode: impl Into<String>) -> Self {
        Self {
            campaign: campaign.into(),
            mode: mode.into(),
        }
    }

    /// Whether `case` runs under this runner's mode.
    #[must_use]
    pub fn applies_to(&self, case: &FixtureCase) -> bool {
        case.mode.eq_ignore_ascii_case("both") || case.mode.eq_ignore_ascii_case(&self.mode)
    }

    /// Run all fixtures in a set that apply to this runner's mode.
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<VerificationResult> {
        fixture_set
            .cases
            .iter()
            .filter(|case| self.applies_to(case))
            .map(|case| {
                VerificationResult::compare(case, &self.mode, execute_case(case, &self.mode))
            })
            .collect()
    }
}

fn execute_case(case: &FixtureCase, active_mode: &str) -> String {
    execute_fixture_case(&case.function, &case.inputs, active_mode)
        .unwrap_or_else(|err| format!("{UNSUPPORTED_PREFIX}{err}"))
}
