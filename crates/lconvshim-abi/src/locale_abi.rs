//! ABI layer for `<locale.h>` functions.
//!
//! Only the POSIX "C" locale exists. `setlocale` accepts its aliases and
//! resolves other names per the runtime mode. `localeconv` returns the single
//! immutable C-locale record.

use std::ffi::{CStr, c_char, c_int};
use std::ptr;

use lconvshim_core::locale::{self as locale_core, SetLocaleOutcome};
use lconvshim_membrane::SafetyLevel;

use crate::runtime_policy;

pub const LC_CTYPE: c_int = locale_core::LC_CTYPE;
pub const LC_NUMERIC: c_int = locale_core::LC_NUMERIC;
pub const LC_TIME: c_int = locale_core::LC_TIME;
pub const LC_COLLATE: c_int = locale_core::LC_COLLATE;
pub const LC_MONETARY: c_int = locale_core::LC_MONETARY;
pub const LC_MESSAGES: c_int = locale_core::LC_MESSAGES;
pub const LC_ALL: c_int = locale_core::LC_ALL;
pub const LC_PAPER: c_int = locale_core::LC_PAPER;
pub const LC_NAME: c_int = locale_core::LC_NAME;
pub const LC_ADDRESS: c_int = locale_core::LC_ADDRESS;
pub const LC_TELEPHONE: c_int = locale_core::LC_TELEPHONE;
pub const LC_MEASUREMENT: c_int = locale_core::LC_MEASUREMENT;
pub const LC_IDENTIFICATION: c_int = locale_core::LC_IDENTIFICATION;

// ---------------------------------------------------------------------------
// struct lconv
// ---------------------------------------------------------------------------

/// C-compatible `struct lconv`, populated with the C-locale conventions.
///
/// Numeric members use the platform's `CHAR_MAX` (`c_char::MAX`) for "not
/// available", which is what C callers compare against.
#[cfg(not(feature = "opaque-lconv"))]
#[repr(C)]
pub struct LConv {
    pub decimal_point: *const c_char,
    pub thousands_sep: *const c_char,
    pub grouping: *const c_char,
    pub int_curr_symbol: *const c_char,
    pub currency_symbol: *const c_char,
    pub mon_decimal_point: *const c_char,
    pub mon_thousands_sep: *const c_char,
    pub mon_grouping: *const c_char,
    pub positive_sign: *const c_char,
    pub negative_sign: *const c_char,
    pub int_frac_digits: c_char,
    pub frac_digits: c_char,
    pub p_cs_precedes: c_char,
    pub n_cs_precedes: c_char,
    pub p_sep_by_space: c_char,
    pub n_sep_by_space: c_char,
    pub p_sign_posn: c_char,
    pub n_sign_posn: c_char,
}

/// C-compatible `struct lconv` as an empty placeholder (`struct lconv { };`).
#[cfg(feature = "opaque-lconv")]
#[repr(C)]
pub struct LConv {
    _opaque: [u8; 0],
}

#[cfg(not(feature = "opaque-lconv"))]
const fn c_char_field(v: i8) -> c_char {
    if v == locale_core::NOT_AVAILABLE {
        c_char::MAX
    } else {
        v as c_char
    }
}

impl LConv {
    #[cfg(not(feature = "opaque-lconv"))]
    const fn from_core(conv: &locale_core::LocaleConv) -> Self {
        Self {
            decimal_point: conv.decimal_point.as_ptr(),
            thousands_sep: conv.thousands_sep.as_ptr(),
            grouping: conv.grouping.as_ptr(),
            int_curr_symbol: conv.int_curr_symbol.as_ptr(),
            currency_symbol: conv.currency_symbol.as_ptr(),
            mon_decimal_point: conv.mon_decimal_point.as_ptr(),
            mon_thousands_sep: conv.mon_thousands_sep.as_ptr(),
            mon_grouping: conv.mon_grouping.as_ptr(),
            positive_sign: conv.positive_sign.as_ptr(),
            negative_sign: conv.negative_sign.as_ptr(),
            int_frac_digits: c_char_field(conv.int_frac_digits),
            frac_digits: c_char_field(conv.frac_digits),
            p_cs_precedes: c_char_field(conv.p_cs_precedes),
            n_cs_precedes: c_char_field(conv.n_cs_precedes),
            p_sep_by_space: c_char_field(conv.p_sep_by_space),
            n_sep_by_space: c_char_field(conv.n_sep_by_space),
            p_sign_posn: c_char_field(conv.p_sign_posn),
            n_sign_posn: c_char_field(conv.n_sign_posn),
        }
    }

    #[cfg(feature = "opaque-lconv")]
    const fn from_core(_conv: &locale_core::LocaleConv) -> Self {
        Self { _opaque: [] }
    }
}

// SAFETY: every pointer in LConv refers to a 'static NUL-terminated literal
// and the record is never written after static initialization.
unsafe impl Sync for LConv {}

/// The one `struct lconv` of the process.
static LCONV: LConv = LConv::from_core(&locale_core::C_LOCALE_CONV);

// ---------------------------------------------------------------------------
// setlocale
// ---------------------------------------------------------------------------

/// `setlocale` with an explicit runtime mode.
///
/// Null `locale` queries and returns `"C"`. `"C"`, `"POSIX"` and `""`
/// succeed with `"C"`. Other names return null in strict mode and `"C"` in
/// hardened mode. Out-of-range categories return null in every mode.
///
/// # Safety
///
/// `locale` must be null or point to a NUL-terminated string.
pub unsafe fn setlocale_with_mode(
    mode: SafetyLevel,
    category: c_int,
    locale: *const c_char,
) -> *mut c_char {
    let name = if locale.is_null() {
        None
    } else {
        // SAFETY: caller guarantees a NUL-terminated string.
        Some(unsafe { CStr::from_ptr(locale) }.to_bytes())
    };

    let result = locale_core::resolve_locale(category, name, mode);
    runtime_policy::observe_setlocale(category, mode, &result);

    match result {
        Ok(outcome) => canonical_name(outcome),
        Err(_) => ptr::null_mut(),
    }
}

#[inline]
fn canonical_name(outcome: SetLocaleOutcome) -> *mut c_char {
    // The returned string must not be modified by the caller.
    outcome.locale_name().as_ptr().cast_mut()
}

/// POSIX `setlocale`.
#[cfg_attr(not(debug_assertions), unsafe(no_mangle))]
pub unsafe extern "C" fn setlocale(category: c_int, locale: *const c_char) -> *mut c_char {
    // SAFETY: forwarded C contract.
    unsafe { setlocale_with_mode(runtime_policy::mode(), category, locale) }
}

// ---------------------------------------------------------------------------
// localeconv
// ---------------------------------------------------------------------------

/// POSIX `localeconv`.
///
/// Returns the static C-locale `struct lconv`. The caller must neither free
/// nor modify it. Touches one relaxed counter and nothing else.
#[cfg_attr(not(debug_assertions), unsafe(no_mangle))]
pub unsafe extern "C" fn localeconv() -> *mut LConv {
    runtime_policy::observe_localeconv();
    ptr::addr_of!(LCONV).cast_mut()
}
