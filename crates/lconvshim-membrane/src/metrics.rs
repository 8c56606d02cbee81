//! Atomic counters for locale observability.
//!
//! All counters use relaxed ordering. They are diagnostic, not
//! synchronization primitives.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::heal::HealingPolicy;

/// Process-wide locale call counters.
pub struct LocaleMetrics {
    /// `setlocale` calls with a null name.
    pub queries: AtomicU64,
    /// `setlocale` calls that selected the canonical locale by name.
    pub selections: AtomicU64,
    /// `setlocale` calls rejected for an out-of-range category.
    pub invalid_categories: AtomicU64,
    /// `setlocale` calls rejected for an unsupported name (strict).
    pub unsupported_names: AtomicU64,
    /// `localeconv` calls.
    pub conv_reads: AtomicU64,
    /// Healing actions applied (hardened).
    pub healing: HealingPolicy,
}

impl LocaleMetrics {
    /// Create a new zeroed metrics instance.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            queries: AtomicU64::new(0),
            selections: AtomicU64::new(0),
            invalid_categories: AtomicU64::new(0),
            unsupported_names: AtomicU64::new(0),
            conv_reads: AtomicU64::new(0),
            healing: HealingPolicy::new(),
        }
    }

    /// Increment a counter by 1.
    pub fn inc(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Read a counter value.
    pub fn get(counter: &AtomicU64) -> u64 {
        counter.load(Ordering::Relaxed)
    }

    /// Snapshot all counters.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            queries: Self::get(&self.queries),
            selections: Self::get(&self.selections),
            invalid_categories: Self::get(&self.invalid_categories),
            unsupported_names: Self::get(&self.unsupported_names),
            conv_reads: Self::get(&self.conv_reads),
            heals: self.healing.total(),
        }
    }
}

impl Default for LocaleMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time snapshot of all locale counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub queries: u64,
    pub selections: u64,
    pub invalid_categories: u64,
    pub unsupported_names: u64,
    pub conv_reads: u64,
    pub heals: u64,
}

impl MetricsSnapshot {
    /// Total `setlocale` calls observed.
    #[must_use]
    pub const fn setlocale_calls(&self) -> u64 {
        self.queries + self.selections + self.invalid_categories + self.unsupported_names + self.heals
    }

    /// Counter deltas since `earlier`. Saturates so a concurrent reader never underflows.
    #[must_use]
    pub const fn since(&self, earlier: &Self) -> Self {
        Self {
            queries: self.queries.saturating_sub(earlier.queries),
            selections: self.selections.saturating_sub(earlier.selections),
            invalid_categories: self
                .invalid_categories
                .saturating_sub(earlier.invalid_categories),
            unsupported_names: self.unsupported_names.saturating_sub(earlier.unsupported_names),
            conv_reads: self.conv_reads.saturating_sub(earlier.conv_reads),
            heals: self.heals.saturating_sub(earlier.heals),
        }
    }
}

static GLOBAL_METRICS: LocaleMetrics = LocaleMetrics::new();

/// Access the global metrics instance.
#[must_use]
pub fn global_metrics() -> &'static LocaleMetrics {
    &GLOBAL_METRICS
}
