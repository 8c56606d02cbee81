//! Numeric and monetary formatting conventions (`struct lconv`).

use std::ffi::CStr;

/// Value of a numeric field the locale does not specify (`CHAR_MAX` for a
/// signed `char`).
pub const NOT_AVAILABLE: i8 = i8::MAX;

/// Numeric and monetary formatting conventions.
///
/// Strings are `'static` and NUL-terminated so the ABI layer can hand them
/// to C without copying. Field order follows the compatibility header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleConv {
    /// Decimal-point character.
    pub decimal_point: &'static CStr,
    /// Thousands separator.
    pub thousands_sep: &'static CStr,
    /// Grouping specification.
    pub grouping: &'static CStr,
    /// International currency symbol.
    pub int_curr_symbol: &'static CStr,
    /// Local currency symbol.
    pub currency_symbol: &'static CStr,
    /// Monetary decimal-point character.
    pub mon_decimal_point: &'static CStr,
    /// Monetary thousands separator.
    pub mon_thousands_sep: &'static CStr,
    /// Monetary grouping specification.
    pub mon_grouping: &'static CStr,
    /// Positive-value sign.
    pub positive_sign: &'static CStr,
    /// Negative-value sign.
    pub negative_sign: &'static CStr,
    /// International fractional digits.
    pub int_frac_digits: i8,
    /// Local fractional digits.
    pub frac_digits: i8,
    /// 1 if currency_symbol precedes a positive value.
    pub p_cs_precedes: i8,
    /// 1 if currency_symbol precedes a negative value.
    pub n_cs_precedes: i8,
    /// 1 if a space separates currency_symbol from a positive value.
    pub p_sep_by_space: i8,
    /// 1 if a space separates currency_symbol from a negative value.
    pub n_sep_by_space: i8,
    /// Positioning of positive_sign.
    pub p_sign_posn: i8,
    /// Positioning of negative_sign.
    pub n_sign_posn: i8,
}

/// Conventions of the POSIX "C" locale.
pub const C_LOCALE_CONV: LocaleConv = LocaleConv {
    decimal_point: c".",
    thousands_sep: c"",
    grouping: c"",
    int_curr_symbol: c"",
    currency_symbol: c"",
    mon_decimal_point: c"",
    mon_thousands_sep: c"",
    mon_grouping: c"",
    positive_sign: c"",
    negative_sign: c"",
    int_frac_digits: NOT_AVAILABLE,
    frac_digits: NOT_AVAILABLE,
    p_cs_precedes: NOT_AVAILABLE,
    n_cs_precedes: NOT_AVAILABLE,
    p_sep_by_space: NOT_AVAILABLE,
    n_sep_by_space: NOT_AVAILABLE,
    p_sign_posn: NOT_AVAILABLE,
    n_sign_posn: NOT_AVAILABLE,
};

static C_LOCALE: LocaleConv = C_LOCALE_CONV;

/// The process-wide "C" locale record. Same address on every call.
#[inline]
#[must_use]
pub fn c_locale_conv() -> &'static LocaleConv {
    &C_LOCALE
}

impl LocaleConv {
    /// String fields paired with their `struct lconv` member names, in order.
    #[must_use]
    pub fn string_fields(&self) -> [(&'static str, &'static CStr); 10] {
        [
            ("decimal_point", self.decimal_point),
            ("thousands_sep", self.thousands_sep),
            ("grouping", self.grouping),
            ("int_curr_symbol", self.int_curr_symbol),
            ("currency_symbol", self.currency_symbol),
            ("mon_decimal_point", self.mon_decimal_point),
            ("mon_thousands_sep", self.mon_thousands_sep),
            ("mon_grouping", self.mon_grouping),
            ("positive_sign", self.positive_sign),
            ("negative_sign", self.negative_sign),
        ]
    }

    /// Numeric fields paired with their `struct lconv` member names, in order.
    #[must_use]
    pub fn numeric_fields(&self) -> [(&'static str, i8); 8] {
        [
            ("int_frac_digits", self.int_frac_digits),
            ("frac_digits", self.frac_digits),
            ("p_cs_precedes", self.p_cs_precedes),
            ("n_cs_precedes", self.n_cs_precedes),
            ("p_sep_by_space", self.p_sep_by_space),
            ("n_sep_by_space", self.n_sep_by_space),
            ("p_sign_posn", self.p_sign_posn),
            ("n_sign_posn", self.n_sign_posn),
        ]
    }

    /// Look up one field by member name, rendered as text. Numeric fields
    /// render as decimal integers.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<String> {
        if let Some((_, s)) = self.string_fields().into_iter().find(|(n, _)| *n == name) {
            return Some(s.to_string_lossy().into_owned());
        }
        self.numeric_fields()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.to_string())
    }

    /// Digit grouping is off: no separators and no grouping pattern.
    #[must_use]
    pub fn grouping_disabled(&self) -> bool {
        self.thousands_sep.is_empty()
            && self.grouping.is_empty()
            && self.mon_thousands_sep.is_empty()
            && self.mon_grouping.is_empty()
    }
}
