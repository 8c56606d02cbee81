//! # lconvshim-core
//!
//! Safe Rust model of `<locale.h>` for a runtime that only carries the POSIX
//! "C" locale. No `unsafe` code is permitted at the crate level; the
//! `extern "C"` surface lives in `lconvshim-abi`.

#![deny(unsafe_code)]

pub mod locale;

pub use locale::{
    Category, LocaleConv, LocaleError, Refusal, SetLocaleOutcome, c_locale_conv, call_outcome,
    locale_conv, resolve_locale, set_locale,
};
