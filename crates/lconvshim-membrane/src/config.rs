//! Runtime mode configuration.
//!
//! The mode is read once from the `LCONVSHIM_MODE` environment variable:
//! - `strict` (default): standard `setlocale` contract. Names other than
//!   `"C"`, `"POSIX"` and `""` are unavailable and yield a null return.
//! - `hardened`: unsupported names are healed by substituting the canonical
//!   `"C"` locale, so callers that never check the return keep working.
//!
//! `Off` is not reachable from the environment. Benchmarks use it through
//! the API to measure the accessor without metrics or trace bookkeeping.

use std::cell::Cell;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::{Duration, Instant};

/// Environment variable consulted on first use.
pub const MODE_ENV_VAR: &str = "LCONVSHIM_MODE";

/// Runtime operating mode for the membrane.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SafetyLevel {
    /// Reject unsupported locale names with a null return.
    #[default]
    Strict,
    /// Substitute the canonical locale for unsupported names.
    Hardened,
    /// No bookkeeping. Name resolution behaves like `Strict`.
    Off,
}

impl SafetyLevel {
    /// Parse from string (case-insensitive). Unknown values map to `Strict`.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "hardened" | "repair" | "heal" | "permissive" => Self::Hardened,
            "off" | "none" | "disabled" => Self::Off,
            _ => Self::Strict,
        }
    }

    /// Stable lowercase name, as used in fixtures and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Hardened => "hardened",
            Self::Off => "off",
        }
    }

    /// Returns true if unsupported names are healed instead of rejected.
    #[must_use]
    pub const fn heals_enabled(self) -> bool {
        matches!(self, Self::Hardened)
    }

    /// Returns true if metrics and trace records are kept.
    #[must_use]
    pub const fn observes(self) -> bool {
        !matches!(self, Self::Off)
    }
}

impl std::fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// 0=unresolved, 1=Strict, 2=Hardened, 255=resolving.
static CACHED_LEVEL: AtomicU8 = AtomicU8::new(LEVEL_UNRESOLVED);

const LEVEL_UNRESOLVED: u8 = 0;
const LEVEL_STRICT: u8 = 1;
const LEVEL_HARDENED: u8 = 2;
const LEVEL_RESOLVING: u8 = 255;

/// Busy-wait rounds before a waiting thread starts yielding.
const RESOLVE_SPINS: u32 = 64;
/// Longest a thread waits for another thread's resolution.
const RESOLVE_WAIT: Duration = Duration::from_millis(100);

thread_local! {
    static RESOLVING_HERE: Cell<bool> = const { Cell::new(false) };
}

/// Environment parsing only admits strict|hardened.
fn parse_mode_env(raw: &str) -> SafetyLevel {
    match SafetyLevel::from_str_loose(raw) {
        SafetyLevel::Hardened => SafetyLevel::Hardened,
        _ => SafetyLevel::Strict,
    }
}

fn read_env_level() -> SafetyLevel {
    std::env::var(MODE_ENV_VAR)
        .map(|v| parse_mode_env(&v))
        .unwrap_or_default()
}

fn encode(level: SafetyLevel) -> u8 {
    match level {
        SafetyLevel::Hardened => LEVEL_HARDENED,
        _ => LEVEL_STRICT,
    }
}

fn decode(v: u8) -> SafetyLevel {
    if v == LEVEL_HARDENED {
        SafetyLevel::Hardened
    } else {
        SafetyLevel::Strict
    }
}

/// Get the configured safety level (reads the environment on first call,
/// cached for the rest of the process).
///
/// A call that re-enters the first resolution on the same thread sees
/// `Strict`. Calls from other threads wait for the resolved value.
#[must_use]
pub fn safety_level() -> SafetyLevel {
    resolve_with(&CACHED_LEVEL, read_env_level)
}

fn resolve_with(cell: &AtomicU8, read_env: impl FnOnce() -> SafetyLevel) -> SafetyLevel {
    match cell.load(Ordering::Acquire) {
        LEVEL_UNRESOLVED => {}
        LEVEL_RESOLVING => return wait_for_resolution(cell),
        v => return decode(v),
    }

    if cell
        .compare_exchange(
            LEVEL_UNRESOLVED,
            LEVEL_RESOLVING,
            Ordering::AcqRel,
            Ordering::Acquire,
        )
        .is_err()
    {
        return wait_for_resolution(cell);
    }

    let _ = RESOLVING_HERE.try_with(|here| here.set(true));
    let encoded = encode(read_env());
    cell.store(encoded, Ordering::Release);
    let _ = RESOLVING_HERE.try_with(|here| here.set(false));
    decode(encoded)
}

/// Another resolution is in flight. The resolving thread itself gets
/// `Strict`; any other thread waits up to [`RESOLVE_WAIT`] for the result.
fn wait_for_resolution(cell: &AtomicU8) -> SafetyLevel {
    if RESOLVING_HERE.try_with(Cell::get).unwrap_or(true) {
        return SafetyLevel::Strict;
    }

    let mut deadline = None;
    let mut round = 0u32;
    loop {
        match cell.load(Ordering::Acquire) {
            LEVEL_UNRESOLVED | LEVEL_RESOLVING => {}
            v => return decode(v),
        }
        if round < RESOLVE_SPINS {
            round += 1;
            std::hint::spin_loop();
            continue;
        }
        let until = *deadline.get_or_insert_with(|| Instant::now() + RESOLVE_WAIT);
        if Instant::now() >= until {
            return SafetyLevel::Strict;
        }
        std::thread::yield_now();
    }
}
