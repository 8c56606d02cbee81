//! Runtime membrane for lconvshim.
//!
//! Sits between the `extern "C"` locale entry points and the safe core. The
//! membrane owns everything that is process-wide but not locale data:
//!
//! - **Configuration** (`config`): strict / hardened runtime mode
//! - **Healing** (`heal`): what hardened mode does with an unsupported name
//! - **Policy** (`policy`): per-call decisions for `setlocale` / `localeconv`
//! - **Metrics** (`metrics`): atomic counters for observability
//! - **Trace** (`trace`): bounded ring of recent decisions for explainability

#![deny(unsafe_code)]

pub mod config;
pub mod heal;
pub mod metrics;
pub mod policy;
pub mod trace;

pub use config::{SafetyLevel, safety_level};
pub use heal::{HealingAction, HealingPolicy};
pub use metrics::{LocaleMetrics, MetricsSnapshot, global_metrics};
pub use policy::{
    CallOutcome, LocaleSymbol, MembraneAction, RuntimeDecision, record, record_conv_read,
};
pub use trace::{DecisionRecord, DecisionTrace, TRACE_CAPACITY, global_trace};
