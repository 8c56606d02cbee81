//! Runtime policy bridge for ABI entrypoints.
//!
//! Resolves the active mode and turns core results into membrane decisions,
//! so the entry points themselves stay a thin C-to-Rust translation. Nothing
//! here locks or allocates once the mode is cached.

use lconvshim_core::locale::{Refusal, SetLocaleOutcome, call_outcome};
use lconvshim_membrane::{RuntimeDecision, SafetyLevel, safety_level};

#[inline]
pub(crate) fn mode() -> SafetyLevel {
    safety_level()
}

pub(crate) fn observe_setlocale(
    category: i32,
    mode: SafetyLevel,
    result: &Result<SetLocaleOutcome, Refusal>,
) {
    lconvshim_membrane::record(RuntimeDecision::setlocale(
        category,
        mode,
        call_outcome(result),
    ));
}

#[inline]
pub(crate) fn observe_localeconv() {
    lconvshim_membrane::record_conv_read();
}
