//! Healing policy for locale requests.
//!
//! Only one invalid input can be repaired: a locale name this runtime does not
//! carry. Hardened mode answers it with the canonical locale. An out-of-range
//! category has no sensible repair and is always rejected.

use std::sync::atomic::{AtomicU64, Ordering};

/// Actions the membrane can take on a locale request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HealingAction {
    /// Answer an unsupported locale name with the canonical `"C"` locale.
    SubstituteCanonicalLocale,
    /// No healing needed.
    None,
}

impl HealingAction {
    /// Returns true if this action represents an actual healing.
    #[must_use]
    pub const fn is_heal(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Stable vocabulary used in structured logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SubstituteCanonicalLocale => "substitute_canonical_locale",
            Self::None => "none",
        }
    }
}

/// Counts healing actions applied by the ABI layer.
pub struct HealingPolicy {
    /// Total heals applied.
    pub total_heals: AtomicU64,
    /// Unsupported names answered with `"C"`.
    pub canonical_substitutions: AtomicU64,
}

impl HealingPolicy {
    /// Create a new policy with zeroed counters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            total_heals: AtomicU64::new(0),
            canonical_substitutions: AtomicU64::new(0),
        }
    }

    /// Record a healing action.
    pub fn record(&self, action: &HealingAction) {
        match action {
            HealingAction::SubstituteCanonicalLocale => {
                self.total_heals.fetch_add(1, Ordering::Relaxed);
                self.canonical_substitutions.fetch_add(1, Ordering::Relaxed);
            }
            HealingAction::None => {}
        }
    }

    /// Total heals recorded so far.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total_heals.load(Ordering::Relaxed)
    }
}

impl Default for HealingPolicy {
    fn default() -> Self {
        Self::new()
    }
}
