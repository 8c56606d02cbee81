//! Locale categories.
//!
//! Values are part of the ABI: binaries compiled against one build of the
//! header hardcode them, so they must never be renumbered.

use std::fmt;

use super::LocaleError;

/// Character classification and conversion.
pub const LC_CTYPE: i32 = 0;
/// Numeric formatting.
pub const LC_NUMERIC: i32 = 1;
/// Date and time formatting.
pub const LC_TIME: i32 = 2;
/// String collation.
pub const LC_COLLATE: i32 = 3;
/// Monetary formatting.
pub const LC_MONETARY: i32 = 4;
/// Informational and diagnostic messages.
pub const LC_MESSAGES: i32 = 5;
/// All categories.
pub const LC_ALL: i32 = 6;
/// Paper size.
pub const LC_PAPER: i32 = 7;
/// Personal name formatting.
pub const LC_NAME: i32 = 8;
/// Postal address formatting.
pub const LC_ADDRESS: i32 = 9;
/// Telephone number formatting.
pub const LC_TELEPHONE: i32 = 10;
/// Measurement system.
pub const LC_MEASUREMENT: i32 = 11;
/// Locale metadata.
pub const LC_IDENTIFICATION: i32 = 12;

/// Minimum valid locale category value.
pub const LC_MIN: i32 = LC_CTYPE;
/// Maximum valid locale category value.
pub const LC_MAX: i32 = LC_IDENTIFICATION;

/// Returns `true` if `cat` is a valid locale category.
#[inline]
pub fn valid_category(cat: i32) -> bool {
    (LC_MIN..=LC_MAX).contains(&cat)
}

/// A locale category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i32)]
pub enum Category {
    Ctype = LC_CTYPE,
    Numeric = LC_NUMERIC,
    Time = LC_TIME,
    Collate = LC_COLLATE,
    Monetary = LC_MONETARY,
    Messages = LC_MESSAGES,
    All = LC_ALL,
    Paper = LC_PAPER,
    Name = LC_NAME,
    Address = LC_ADDRESS,
    Telephone = LC_TELEPHONE,
    Measurement = LC_MEASUREMENT,
    Identification = LC_IDENTIFICATION,
}

impl Category {
    /// Every category, in value order.
    pub const ALL_CATEGORIES: [Category; 13] = [
        Self::Ctype,
        Self::Numeric,
        Self::Time,
        Self::Collate,
        Self::Monetary,
        Self::Messages,
        Self::All,
        Self::Paper,
        Self::Name,
        Self::Address,
        Self::Telephone,
        Self::Measurement,
        Self::Identification,
    ];

    /// Map a raw category value.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Option<Self> {
        if raw < LC_MIN || raw > LC_MAX {
            return None;
        }
        Some(Self::ALL_CATEGORIES[raw as usize])
    }

    #[must_use]
    pub const fn as_raw(self) -> i32 {
        self as i32
    }

    /// The C macro name, e.g. `"LC_NUMERIC"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ctype => "LC_CTYPE",
            Self::Numeric => "LC_NUMERIC",
            Self::Time => "LC_TIME",
            Self::Collate => "LC_COLLATE",
            Self::Monetary => "LC_MONETARY",
            Self::Messages => "LC_MESSAGES",
            Self::All => "LC_ALL",
            Self::Paper => "LC_PAPER",
            Self::Name => "LC_NAME",
            Self::Address => "LC_ADDRESS",
            Self::Telephone => "LC_TELEPHONE",
            Self::Measurement => "LC_MEASUREMENT",
            Self::Identification => "LC_IDENTIFICATION",
        }
    }

    /// Look up a category by its C macro name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL_CATEGORIES.into_iter().find(|c| c.name() == name)
    }

    /// True for `LC_ALL`, which stands for every other category at once.
    #[must_use]
    pub const fn is_aggregate(self) -> bool {
        matches!(self, Self::All)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<i32> for Category {
    type Error = LocaleError;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        Self::from_raw(raw).ok_or(LocaleError::InvalidCategory(raw))
    }
}

impl From<Category> for i32 {
    fn from(c: Category) -> Self {
        c.as_raw()
    }
}
