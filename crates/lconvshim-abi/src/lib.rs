// extern "C" exports accept raw pointers from C callers; the contract is the
// C one documented on each function.
#![allow(clippy::missing_safety_doc)]
//! # lconvshim-abi
//!
//! ABI-compatible `extern "C"` boundary for `<locale.h>`.
//!
//! This crate produces a `cdylib` exposing `setlocale` and `localeconv` for a
//! platform whose C library lacks them. Each call passes through the runtime
//! policy bridge before delegating to `lconvshim-core`.
//!
//! # Architecture
//!
//! ```text
//! C caller -> ABI entry (this crate) -> runtime policy -> core -> return
//! ```
//!
//! In **strict** mode, names other than `"C"`, `"POSIX"` and `""` make
//! `setlocale` return null. In **hardened** mode they are answered with `"C"`.
//!
//! The `opaque-lconv` feature swaps the populated `struct lconv` for an empty
//! placeholder; exactly one shape exists per build.

mod runtime_policy;

pub mod locale_abi;

pub use locale_abi::{
    LC_ADDRESS, LC_ALL, LC_COLLATE, LC_CTYPE, LC_IDENTIFICATION, LC_MEASUREMENT, LC_MESSAGES,
    LC_MONETARY, LC_NAME, LC_NUMERIC, LC_PAPER, LC_TELEPHONE, LC_TIME, LConv, localeconv,
    setlocale,
};
