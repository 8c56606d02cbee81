//! JSON snapshot of the locale categories and conventions record.

use std::collections::BTreeMap;

use lconvshim_core::locale::{Category, LocaleConv, c_locale_conv};
use serde::{Deserialize, Serialize};

/// Serializable view of a [`LocaleConv`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvSnapshot {
    pub strings: BTreeMap<String, String>,
    pub numerics: BTreeMap<String, i8>,
}

impl From<&LocaleConv> for ConvSnapshot {
    fn from(conv: &LocaleConv) -> Self {
        Self {
            strings: conv
                .string_fields()
                .into_iter()
                .map(|(n, v)| (n.to_string(), v.to_string_lossy().into_owned()))
                .collect(),
            numerics: conv
                .numeric_fields()
                .into_iter()
                .map(|(n, v)| (n.to_string(), v))
                .collect(),
        }
    }
}

/// Full locale snapshot: categories plus the "C" conventions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleSnapshot {
    pub locale: String,
    pub categories: BTreeMap<String, i32>,
    pub conventions: ConvSnapshot,
}

impl LocaleSnapshot {
    /// Snapshot of the C locale.
    #[must_use]
    pub fn capture() -> Self {
        Self {
            locale: "C".to_string(),
            categories: Category::ALL_CATEGORIES
                .into_iter()
                .map(|c| (c.name().to_string(), c.as_raw()))
                .collect(),
            conventions: ConvSnapshot::from(c_locale_conv()),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
