//! Conformance testing harness for lconvshim.
//!
//! This crate provides:
//! - Fixtures: JSON descriptions of expected `setlocale` / `localeconv` behavior
//! - Runner: executes fixtures against the core under a chosen runtime mode
//! - Reports: markdown and JSON conformance summaries
//! - Structured logs: JSONL records with an artifact index
//! - Header generation: renders `locale.h` from the Rust definitions

#![forbid(unsafe_code)]

pub mod conformance;
pub mod diff;
pub mod error;
pub mod fixtures;
pub mod header;
pub mod report;
pub mod runner;
pub mod snapshot;
pub mod structured_log;
pub mod verify;

pub use error::HarnessError;
pub use fixtures::{FixtureCase, FixtureSet};
pub use report::ConformanceReport;
pub use runner::TestRunner;
pub use verify::{EntryPointTally, VerificationResult, VerificationSummary};
