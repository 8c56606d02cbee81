//! Locale support.
//!
//! Only the POSIX "C" locale exists. `set_locale` accepts its aliases,
//! answers queries with `"C"`, and resolves any other name according to the
//! runtime mode: strict rejects it, hardened substitutes `"C"`.

mod category;
mod conv;

use std::ffi::CStr;

use lconvshim_membrane::{CallOutcome, SafetyLevel};

pub use category::{
    Category, LC_ADDRESS, LC_ALL, LC_COLLATE, LC_CTYPE, LC_IDENTIFICATION, LC_MAX,
    LC_MEASUREMENT, LC_MESSAGES, LC_MIN, LC_MONETARY, LC_NAME, LC_NUMERIC, LC_PAPER,
    LC_TELEPHONE, LC_TIME, valid_category,
};
pub use conv::{C_LOCALE_CONV, LocaleConv, NOT_AVAILABLE, c_locale_conv};

/// Canonical name of the only locale.
pub const C_LOCALE_NAME: &CStr = c"C";
/// Alias of the "C" locale.
pub const POSIX_LOCALE_NAME: &CStr = c"POSIX";

/// Errors from locale requests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocaleError {
    #[error("invalid locale category {0}")]
    InvalidCategory(i32),
    #[error("locale {0:?} is not available")]
    UnsupportedLocale(String),
}

/// Successful result of [`set_locale`]. The active locale is `"C"` in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetLocaleOutcome {
    /// No name given; current locale reported.
    Queried,
    /// An alias of the canonical locale was selected.
    Selected,
    /// An unsupported name was replaced by the canonical locale.
    Substituted,
}

impl SetLocaleOutcome {
    /// Name of the locale now in effect.
    #[must_use]
    pub const fn locale_name(self) -> &'static CStr {
        C_LOCALE_NAME
    }
}

/// Returns `true` if `name` refers to the "C" locale: `"C"`, `"POSIX"`, or
/// `""` (environment default, which resolves to `"C"` here).
#[inline]
pub fn is_c_locale(name: &[u8]) -> bool {
    matches!(name, b"C" | b"POSIX" | b"")
}

/// Why [`resolve_locale`] refused a request. Carries no copy of the name,
/// so the C entry points can classify without allocating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    InvalidCategory(i32),
    UnsupportedName,
}

/// Select or query the locale for `category` without allocating.
///
/// `name == None` queries. Aliases of the "C" locale always succeed. Any
/// other name is refused unless `level` heals, in which case `"C"` is
/// substituted. Nothing is ever switched, so repeated calls with the same
/// arguments return the same result.
pub fn resolve_locale(
    category: i32,
    name: Option<&[u8]>,
    level: SafetyLevel,
) -> Result<SetLocaleOutcome, Refusal> {
    if Category::from_raw(category).is_none() {
        return Err(Refusal::InvalidCategory(category));
    }
    let Some(name) = name else {
        return Ok(SetLocaleOutcome::Queried);
    };
    if is_c_locale(name) {
        Ok(SetLocaleOutcome::Selected)
    } else if level.heals_enabled() {
        Ok(SetLocaleOutcome::Substituted)
    } else {
        Err(Refusal::UnsupportedName)
    }
}

/// [`resolve_locale`] with an error that names the rejected locale.
pub fn set_locale(
    category: i32,
    name: Option<&[u8]>,
    level: SafetyLevel,
) -> Result<SetLocaleOutcome, LocaleError> {
    resolve_locale(category, name, level).map_err(|refusal| match refusal {
        Refusal::InvalidCategory(raw) => LocaleError::InvalidCategory(raw),
        Refusal::UnsupportedName => LocaleError::UnsupportedLocale(
            String::from_utf8_lossy(name.unwrap_or_default()).into_owned(),
        ),
    })
}

/// Membrane classification of a [`resolve_locale`] result.
#[must_use]
pub const fn call_outcome(result: &Result<SetLocaleOutcome, Refusal>) -> CallOutcome {
    match result {
        Ok(SetLocaleOutcome::Queried) => CallOutcome::Query,
        Ok(SetLocaleOutcome::Selected) => CallOutcome::Selected,
        Ok(SetLocaleOutcome::Substituted) => CallOutcome::Substituted,
        Err(Refusal::InvalidCategory(_)) => CallOutcome::InvalidCategory,
        Err(Refusal::UnsupportedName) => CallOutcome::UnsupportedName,
    }
}

/// Conventions of the current locale. Always the "C" locale record.
#[inline]
#[must_use]
pub fn locale_conv() -> &'static LocaleConv {
    c_locale_conv()
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRICT: SafetyLevel = SafetyLevel::Strict;
    const HARDENED: SafetyLevel = SafetyLevel::Hardened;

    #[test]
    fn query_returns_c_for_every_category() {
        for cat in Category::ALL_CATEGORIES {
            let outcome = set_locale(cat.as_raw(), None, STRICT).unwrap();
            assert_eq!(outcome, SetLocaleOutcome::Queried);
            assert_eq!(outcome.locale_name(), c"C");
        }
    }

    #[test]
    fn aliases_select_c() {
        for name in [&b"C"[..], b"POSIX", b""] {
            assert_eq!(
                set_locale(LC_ALL, Some(name), STRICT),
                Ok(SetLocaleOutcome::Selected)
            );
        }
    }

    #[test]
    fn strict_rejects_unknown_names() {
        assert_eq!(
            set_locale(LC_NUMERIC, Some(b"en_US.UTF-8"), STRICT),
            Err(LocaleError::UnsupportedLocale("en_US.UTF-8".into()))
        );
        // Off never heals.
        assert!(set_locale(LC_NUMERIC, Some(b"de_DE"), SafetyLevel::Off).is_err());
    }

    #[test]
    fn hardened_substitutes_c() {
        let outcome = set_locale(LC_MONETARY, Some(b"fr_FR"), HARDENED).unwrap();
        assert_eq!(outcome, SetLocaleOutcome::Substituted);
        assert_eq!(outcome.locale_name().to_bytes(), b"C");
    }

    #[test]
    fn invalid_category_fails_in_every_mode() {
        for level in [STRICT, HARDENED, SafetyLevel::Off] {
            assert_eq!(
                set_locale(-1, None, level),
                Err(LocaleError::InvalidCategory(-1))
            );
            assert_eq!(
                set_locale(13, Some(b"C"), level),
                Err(LocaleError::InvalidCategory(13))
            );
        }
    }

    #[test]
    fn set_locale_is_idempotent() {
        let a = set_locale(LC_TIME, Some(b"POSIX"), STRICT);
        let b = set_locale(LC_TIME, Some(b"POSIX"), STRICT);
        assert_eq!(a, b);
        let a = set_locale(LC_TIME, Some(b"xx"), STRICT);
        let b = set_locale(LC_TIME, Some(b"xx"), STRICT);
        assert_eq!(a, b);
    }

    #[test]
    fn call_outcome_covers_every_result() {
        assert_eq!(call_outcome(&Ok(SetLocaleOutcome::Queried)), CallOutcome::Query);
        assert_eq!(
            call_outcome(&resolve_locale(LC_ALL, Some(b"POSIX"), STRICT)),
            CallOutcome::Selected
        );
        assert_eq!(
            call_outcome(&resolve_locale(LC_ALL, Some(b"xx"), HARDENED)),
            CallOutcome::Substituted
        );
        assert_eq!(
            call_outcome(&resolve_locale(-3, None, STRICT)),
            CallOutcome::InvalidCategory
        );
        assert_eq!(
            call_outcome(&resolve_locale(LC_ALL, Some(b"xx"), STRICT)),
            CallOutcome::UnsupportedName
        );
    }

    #[test]
    fn resolve_and_set_agree() {
        for level in [STRICT, HARDENED, SafetyLevel::Off] {
            for cat in [-1, LC_CTYPE, LC_ALL, LC_IDENTIFICATION, 13] {
                let names: [Option<&[u8]>; 4] = [None, Some(b"C"), Some(b""), Some(b"de_DE")];
                for name in names {
                    let resolved = resolve_locale(cat, name, level);
                    let set = set_locale(cat, name, level);
                    assert_eq!(resolved.ok(), set.clone().ok());
                    assert_eq!(resolved.is_err(), set.is_err());
                }
            }
        }
        assert_eq!(
            resolve_locale(LC_ALL, Some(b"de_DE"), STRICT),
            Err(Refusal::UnsupportedName)
        );
        assert_eq!(resolve_locale(99, None, HARDENED), Err(Refusal::InvalidCategory(99)));
    }

    #[test]
    fn is_c_locale_is_case_sensitive() {
        assert!(is_c_locale(b"C"));
        assert!(is_c_locale(b"POSIX"));
        assert!(is_c_locale(b""));
        assert!(!is_c_locale(b"c"));
        assert!(!is_c_locale(b"posix"));
        assert!(!is_c_locale(b"C.UTF-8"));
    }

    #[test]
    fn error_messages_name_the_input() {
        assert_eq!(
            LocaleError::InvalidCategory(99).to_string(),
            "invalid locale category 99"
        );
        assert_eq!(
            LocaleError::UnsupportedLocale("ja_JP".into()).to_string(),
            "locale \"ja_JP\" is not available"
        );
    }

    #[test]
    fn locale_conv_is_the_c_record() {
        assert!(std::ptr::eq(locale_conv(), c_locale_conv()));
        assert_eq!(locale_conv().decimal_point, c".");
    }
}
