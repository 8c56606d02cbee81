//! Per-call decisions for the locale entry points.
//!
//! The ABI layer classifies every `setlocale` call into a [`CallOutcome`],
//! wraps it in a [`RuntimeDecision`] and hands it to [`record`], which feeds
//! the global metrics and decision trace when the active mode observes.
//! `localeconv` only bumps a counter through [`record_conv_read`].

use crate::config::SafetyLevel;
use crate::heal::HealingAction;
use crate::metrics::{LocaleMetrics, global_metrics};
use crate::trace::global_trace;

/// Entry point a decision was taken for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocaleSymbol {
    Setlocale,
    Localeconv,
}

impl LocaleSymbol {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Setlocale => "setlocale",
            Self::Localeconv => "localeconv",
        }
    }
}

/// What the membrane did with a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MembraneAction {
    /// Served as requested.
    Allow,
    /// Served after a healing action.
    Repair,
    /// Rejected with the C error return.
    Deny,
}

impl MembraneAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Allow => "Allow",
            Self::Repair => "Repair",
            Self::Deny => "Deny",
        }
    }
}

/// Classification of a single call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallOutcome {
    /// `setlocale` with a null name.
    Query,
    /// `setlocale` with an alias of the canonical locale.
    Selected,
    /// `setlocale` with an unsupported name, answered with `"C"`.
    Substituted,
    /// `setlocale` with an out-of-range category.
    InvalidCategory,
    /// `setlocale` with an unsupported name, rejected.
    UnsupportedName,
    /// `localeconv`.
    ConvRead,
}

/// A classified call, as kept in metrics and the decision trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeDecision {
    pub symbol: LocaleSymbol,
    /// Raw category argument; `-1` for `localeconv`.
    pub category: i32,
    pub mode: SafetyLevel,
    pub outcome: CallOutcome,
}

impl RuntimeDecision {
    #[must_use]
    pub const fn setlocale(category: i32, mode: SafetyLevel, outcome: CallOutcome) -> Self {
        Self {
            symbol: LocaleSymbol::Setlocale,
            category,
            mode,
            outcome,
        }
    }

    #[must_use]
    pub const fn localeconv(mode: SafetyLevel) -> Self {
        Self {
            symbol: LocaleSymbol::Localeconv,
            category: -1,
            mode,
            outcome: CallOutcome::ConvRead,
        }
    }

    #[must_use]
    pub const fn action(&self) -> MembraneAction {
        match self.outcome {
            CallOutcome::Query | CallOutcome::Selected | CallOutcome::ConvRead => {
                MembraneAction::Allow
            }
            CallOutcome::Substituted => MembraneAction::Repair,
            CallOutcome::InvalidCategory | CallOutcome::UnsupportedName => MembraneAction::Deny,
        }
    }

    #[must_use]
    pub const fn healing(&self) -> HealingAction {
        match self.outcome {
            CallOutcome::Substituted => HealingAction::SubstituteCanonicalLocale,
            _ => HealingAction::None,
        }
    }

    /// Pack into one word: category in bits 0..32, symbol in 32..34, mode in
    /// 34..36, outcome in 36..39.
    #[must_use]
    pub const fn pack(&self) -> u64 {
        let symbol: u64 = match self.symbol {
            LocaleSymbol::Setlocale => 0,
            LocaleSymbol::Localeconv => 1,
        };
        let mode: u64 = match self.mode {
            SafetyLevel::Strict => 0,
            SafetyLevel::Hardened => 1,
            SafetyLevel::Off => 2,
        };
        let outcome: u64 = match self.outcome {
            CallOutcome::Query => 0,
            CallOutcome::Selected => 1,
            CallOutcome::Substituted => 2,
            CallOutcome::InvalidCategory => 3,
            CallOutcome::UnsupportedName => 4,
            CallOutcome::ConvRead => 5,
        };
        (self.category as u32 as u64) | (symbol << 32) | (mode << 34) | (outcome << 36)
    }

    /// Inverse of [`pack`](Self::pack). `None` for words `pack` never produces.
    #[must_use]
    pub const fn unpack(word: u64) -> Option<Self> {
        let symbol = match (word >> 32) & 0b11 {
            0 => LocaleSymbol::Setlocale,
            1 => LocaleSymbol::Localeconv,
            _ => return None,
        };
        let mode = match (word >> 34) & 0b11 {
            0 => SafetyLevel::Strict,
            1 => SafetyLevel::Hardened,
            2 => SafetyLevel::Off,
            _ => return None,
        };
        let outcome = match (word >> 36) & 0b111 {
            0 => CallOutcome::Query,
            1 => CallOutcome::Selected,
            2 => CallOutcome::Substituted,
            3 => CallOutcome::InvalidCategory,
            4 => CallOutcome::UnsupportedName,
            5 => CallOutcome::ConvRead,
            _ => return None,
        };
        if word >> 39 != 0 {
            return None;
        }
        Some(Self {
            symbol,
            category: word as u32 as i32,
            mode,
            outcome,
        })
    }
}

/// Publish a decision to the global metrics and trace. Neither locks nor
/// allocates. `localeconv` reads are counted but never traced.
pub fn record(decision: RuntimeDecision) {
    if !decision.mode.observes() {
        return;
    }
    apply_to(global_metrics(), &decision);
    if decision.outcome != CallOutcome::ConvRead {
        global_trace().push(decision);
    }
}

/// Count one `localeconv` call.
#[inline]
pub fn record_conv_read() {
    LocaleMetrics::inc(&global_metrics().conv_reads);
}

fn apply_to(metrics: &LocaleMetrics, decision: &RuntimeDecision) {
    match decision.outcome {
        CallOutcome::Query => LocaleMetrics::inc(&metrics.queries),
        CallOutcome::Selected => LocaleMetrics::inc(&metrics.selections),
        CallOutcome::Substituted => metrics.healing.record(&decision.healing()),
        CallOutcome::InvalidCategory => LocaleMetrics::inc(&metrics.invalid_categories),
        CallOutcome::UnsupportedName => LocaleMetrics::inc(&metrics.unsupported_names),
        CallOutcome::ConvRead => LocaleMetrics::inc(&metrics.conv_reads),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_follow_outcome() {
        let strict = SafetyLevel::Strict;
        assert_eq!(
            RuntimeDecision::setlocale(6, strict, CallOutcome::Query).action(),
            MembraneAction::Allow
        );
        assert_eq!(
            RuntimeDecision::setlocale(6, SafetyLevel::Hardened, CallOutcome::Substituted)
                .action(),
            MembraneAction::Repair
        );
        assert_eq!(
            RuntimeDecision::setlocale(99, strict, CallOutcome::InvalidCategory).action(),
            MembraneAction::Deny
        );
        assert_eq!(
            RuntimeDecision::localeconv(strict).action(),
            MembraneAction::Allow
        );
    }

    #[test]
    fn only_substitution_heals() {
        let d = RuntimeDecision::setlocale(0, SafetyLevel::Hardened, CallOutcome::Substituted);
        assert_eq!(d.healing(), HealingAction::SubstituteCanonicalLocale);
        let d = RuntimeDecision::setlocale(0, SafetyLevel::Strict, CallOutcome::UnsupportedName);
        assert_eq!(d.healing(), HealingAction::None);
    }

    #[test]
    fn apply_to_routes_each_outcome() {
        let m = LocaleMetrics::new();
        let mode = SafetyLevel::Strict;
        for outcome in [
            CallOutcome::Query,
            CallOutcome::Selected,
            CallOutcome::InvalidCategory,
            CallOutcome::UnsupportedName,
        ] {
            apply_to(&m, &RuntimeDecision::setlocale(1, mode, outcome));
        }
        apply_to(
            &m,
            &RuntimeDecision::setlocale(1, SafetyLevel::Hardened, CallOutcome::Substituted),
        );
        apply_to(&m, &RuntimeDecision::localeconv(mode));

        let snap = m.snapshot();
        assert_eq!(snap.queries, 1);
        assert_eq!(snap.selections, 1);
        assert_eq!(snap.invalid_categories, 1);
        assert_eq!(snap.unsupported_names, 1);
        assert_eq!(snap.heals, 1);
        assert_eq!(snap.conv_reads, 1);
    }

    #[test]
    fn pack_keeps_every_field() {
        let decisions = [
            RuntimeDecision::setlocale(-7, SafetyLevel::Strict, CallOutcome::InvalidCategory),
            RuntimeDecision::setlocale(i32::MAX, SafetyLevel::Off, CallOutcome::Selected),
            RuntimeDecision::setlocale(6, SafetyLevel::Hardened, CallOutcome::Substituted),
            RuntimeDecision::localeconv(SafetyLevel::Hardened),
        ];
        for d in decisions {
            assert_eq!(RuntimeDecision::unpack(d.pack()), Some(d));
        }
        assert_eq!(RuntimeDecision::unpack(3 << 32), None);
        assert_eq!(RuntimeDecision::unpack(7 << 36), None);
        assert_eq!(RuntimeDecision::unpack(1 << 40), None);
    }

    #[test]
    fn conv_reads_are_counted_not_traced() {
        let before_reads = global_metrics().snapshot().conv_reads;
        record_conv_read();
        record(RuntimeDecision::localeconv(SafetyLevel::Strict));
        assert!(global_metrics().snapshot().conv_reads >= before_reads + 2);
        assert!(
            global_trace()
                .snapshot()
                .iter()
                .all(|r| r.decision.outcome != CallOutcome::ConvRead)
        );
    }

    #[test]
    fn off_mode_leaves_no_trace() {
        record(RuntimeDecision::setlocale(
            1,
            SafetyLevel::Off,
            CallOutcome::Query,
        ));
        assert!(
            global_trace()
                .snapshot()
                .iter()
                .all(|r| r.decision.mode != SafetyLevel::Off)
        );
    }
}
