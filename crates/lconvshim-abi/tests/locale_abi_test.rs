//! Integration tests for the `<locale.h>` ABI surface.
//!
//! Run: cargo test -p lconvshim-abi --test locale_abi_test

use std::ffi::{CStr, c_char};
use std::ptr;

use lconvshim_abi::locale_abi::setlocale_with_mode;
use lconvshim_abi::{LC_ALL, LC_IDENTIFICATION, LC_NUMERIC, localeconv, setlocale};
use lconvshim_membrane::{CallOutcome, SafetyLevel, global_metrics, global_trace, safety_level};

unsafe fn text<'a>(p: *const c_char) -> &'a [u8] {
    assert!(!p.is_null());
    // SAFETY: non-null pointers from the ABI are 'static C strings.
    unsafe { CStr::from_ptr(p) }.to_bytes()
}

#[cfg(target_os = "linux")]
#[test]
fn exported_categories_match_host_libc() {
    use lconvshim_abi::{LC_COLLATE, LC_CTYPE, LC_MESSAGES, LC_MONETARY, LC_TIME};
    assert_eq!(LC_CTYPE, libc::LC_CTYPE);
    assert_eq!(LC_NUMERIC, libc::LC_NUMERIC);
    assert_eq!(LC_TIME, libc::LC_TIME);
    assert_eq!(LC_COLLATE, libc::LC_COLLATE);
    assert_eq!(LC_MONETARY, libc::LC_MONETARY);
    assert_eq!(LC_MESSAGES, libc::LC_MESSAGES);
    assert_eq!(LC_ALL, libc::LC_ALL);
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
#[test]
fn extended_categories_match_glibc() {
    use lconvshim_abi::{LC_ADDRESS, LC_MEASUREMENT, LC_NAME, LC_PAPER, LC_TELEPHONE};
    assert_eq!(LC_PAPER, libc::LC_PAPER);
    assert_eq!(LC_NAME, libc::LC_NAME);
    assert_eq!(LC_ADDRESS, libc::LC_ADDRESS);
    assert_eq!(LC_TELEPHONE, libc::LC_TELEPHONE);
    assert_eq!(LC_MEASUREMENT, libc::LC_MEASUREMENT);
    assert_eq!(LC_IDENTIFICATION, libc::LC_IDENTIFICATION);
}

#[test]
fn query_returns_c_for_every_category() {
    for cat in 0..=LC_IDENTIFICATION {
        let name = unsafe { setlocale(cat, ptr::null()) };
        assert_eq!(unsafe { text(name) }, b"C", "category {cat}");
    }
}

#[test]
fn canonical_aliases_succeed() {
    for alias in [c"C", c"POSIX", c""] {
        let name = unsafe { setlocale(LC_ALL, alias.as_ptr()) };
        assert_eq!(unsafe { text(name) }, b"C");
    }
    let after = unsafe { setlocale(LC_ALL, ptr::null()) };
    assert_eq!(unsafe { text(after) }, b"C");
}

#[test]
fn invalid_categories_return_null() {
    for mode in [SafetyLevel::Strict, SafetyLevel::Hardened] {
        for cat in [-1, LC_IDENTIFICATION + 1, i32::MAX] {
            let r = unsafe { setlocale_with_mode(mode, cat, c"C".as_ptr()) };
            assert!(r.is_null(), "mode={mode} category={cat}");
        }
    }
}

#[test]
fn strict_rejects_unknown_names() {
    let r = unsafe { setlocale_with_mode(SafetyLevel::Strict, LC_NUMERIC, c"en_US.UTF-8".as_ptr()) };
    assert!(r.is_null());
}

#[test]
fn hardened_substitutes_c_and_counts_a_heal() {
    let before = global_metrics().snapshot();
    let r = unsafe { setlocale_with_mode(SafetyLevel::Hardened, LC_NUMERIC, c"de_DE".as_ptr()) };
    assert_eq!(unsafe { text(r) }, b"C");
    let delta = global_metrics().snapshot().since(&before);
    assert!(delta.heals >= 1);
}

#[test]
fn default_entry_point_follows_configured_mode() {
    let r = unsafe { setlocale(LC_ALL, c"ja_JP.eucJP".as_ptr()) };
    if safety_level().heals_enabled() {
        assert_eq!(unsafe { text(r) }, b"C");
    } else {
        assert!(r.is_null());
    }
}

#[test]
fn setlocale_is_idempotent() {
    let a = unsafe { setlocale(LC_NUMERIC, c"POSIX".as_ptr()) };
    let b = unsafe { setlocale(LC_NUMERIC, c"POSIX".as_ptr()) };
    assert_eq!(unsafe { text(a) }, unsafe { text(b) });
}

#[test]
fn localeconv_returns_the_same_record_every_time() {
    let first = unsafe { localeconv() };
    assert!(!first.is_null());
    for _ in 0..100 {
        assert_eq!(unsafe { localeconv() }, first);
    }
}

#[test]
fn decisions_are_traced() {
    let before = global_trace().total_pushed();
    let _ = unsafe { setlocale_with_mode(SafetyLevel::Strict, LC_ALL, ptr::null()) };
    assert!(global_trace().total_pushed() > before);
}

#[test]
fn localeconv_is_counted_but_not_traced() {
    let before = global_metrics().snapshot();
    for _ in 0..10 {
        let _ = unsafe { localeconv() };
    }
    assert!(global_metrics().snapshot().since(&before).conv_reads >= 10);
    assert!(
        global_trace()
            .snapshot()
            .iter()
            .all(|r| r.decision.outcome != CallOutcome::ConvRead)
    );
}

#[cfg(not(feature = "opaque-lconv"))]
mod populated {
    use super::*;

    #[test]
    fn conventions_match_c_locale() {
        // SAFETY: localeconv returns a pointer to a static record.
        let lc = unsafe { &*localeconv() };
        unsafe {
            assert_eq!(text(lc.decimal_point), b".");
            for p in [
                lc.thousands_sep,
                lc.grouping,
                lc.int_curr_symbol,
                lc.currency_symbol,
                lc.mon_decimal_point,
                lc.mon_thousands_sep,
                lc.mon_grouping,
                lc.positive_sign,
                lc.negative_sign,
            ] {
                assert_eq!(text(p), b"");
            }
        }
        for v in [
            lc.int_frac_digits,
            lc.frac_digits,
            lc.p_cs_precedes,
            lc.n_cs_precedes,
            lc.p_sep_by_space,
            lc.n_sep_by_space,
            lc.p_sign_posn,
            lc.n_sign_posn,
        ] {
            assert_eq!(v, c_char::MAX);
        }
    }

    // The host process never calls setlocale, so its libc is still in "C".
    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    #[test]
    fn conventions_match_host_c_locale() {
        // SAFETY: both records are static; the host one is only read here.
        let ours = unsafe { &*localeconv() };
        let host = unsafe { &*libc::localeconv() };
        unsafe {
            assert_eq!(text(ours.decimal_point), text(host.decimal_point));
            assert_eq!(text(ours.thousands_sep), text(host.thousands_sep));
            assert_eq!(text(ours.currency_symbol), text(host.currency_symbol));
        }
        assert_eq!(ours.frac_digits, host.frac_digits);
        assert_eq!(ours.n_sign_posn, host.n_sign_posn);
    }

    #[test]
    fn concrete_scenario() {
        let name = unsafe { setlocale(LC_ALL, ptr::null()) };
        assert_eq!(unsafe { text(name) }, b"C");
        let lc = unsafe { &*localeconv() };
        assert_eq!(unsafe { text(lc.decimal_point) }, b".");
        assert_eq!(unsafe { text(lc.int_curr_symbol) }, b"");
    }

    #[test]
    fn layout_follows_c_struct() {
        use std::mem::{offset_of, size_of};
        let ptr_size = size_of::<*const c_char>();
        assert_eq!(offset_of!(lconvshim_abi::LConv, int_frac_digits), 10 * ptr_size);
        assert_eq!(
            offset_of!(lconvshim_abi::LConv, n_sign_posn),
            10 * ptr_size + 7
        );
    }

    #[test]
    fn concurrent_callers_see_identical_records() {
        let expected = unsafe { localeconv() } as usize;
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    s.spawn(move || {
                        (0..200).all(|_| {
                            let lc = unsafe { &*localeconv() };
                            ptr::addr_of!(*lc) as usize == expected
                                && unsafe { text(lc.decimal_point) } == b"."
                                && lc.frac_digits == c_char::MAX
                        })
                    })
                })
                .collect();
            for h in handles {
                assert!(h.join().unwrap());
            }
        });
    }
}

#[cfg(feature = "opaque-lconv")]
#[test]
fn opaque_record_has_no_fields() {
    assert_eq!(std::mem::size_of::<lconvshim_abi::LConv>(), 0);
    assert!(!unsafe { localeconv() }.is_null());
}
