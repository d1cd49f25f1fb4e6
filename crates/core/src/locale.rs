//! Supported roster locales and locale extraction from feed addresses.
//!
//! Every upstream feed lives at `.../<locale>/students.json`; the locale
//! token in that path decides which `name_<locale>` column a feed fills.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Pattern matching the locale path segment of a feed address.
const FEED_PATH_PATTERN: &str = r"/([A-Za-z]+)/students\.json(?:[?#].*)?$";

static FEED_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(FEED_PATH_PATTERN).expect("valid regex"));

/// A roster locale. Each one owns exactly one translation column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Cn,
    Jp,
    Kr,
    Th,
    Tw,
    Vi,
    Zh,
}

impl Locale {
    /// The locale whose `Name` becomes a character's canonical name.
    pub const BASE: Locale = Locale::En;

    /// All locales in import order (base locale first).
    pub const ALL: [Locale; 8] = [
        Locale::En,
        Locale::Cn,
        Locale::Jp,
        Locale::Kr,
        Locale::Th,
        Locale::Tw,
        Locale::Vi,
        Locale::Zh,
    ];

    /// Short lowercase code as used in feed addresses and query strings.
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Cn => "cn",
            Locale::Jp => "jp",
            Locale::Kr => "kr",
            Locale::Th => "th",
            Locale::Tw => "tw",
            Locale::Vi => "vi",
            Locale::Zh => "zh",
        }
    }

    /// Name of the `students` column holding this locale's translation.
    pub fn name_column(self) -> &'static str {
        match self {
            Locale::En => "name_en",
            Locale::Cn => "name_cn",
            Locale::Jp => "name_jp",
            Locale::Kr => "name_kr",
            Locale::Th => "name_th",
            Locale::Tw => "name_tw",
            Locale::Vi => "name_vi",
            Locale::Zh => "name_zh",
        }
    }

    pub fn is_base(self) -> bool {
        self == Self::BASE
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Locale::ALL
            .into_iter()
            .find(|l| l.code() == lower)
            .ok_or_else(|| CoreError::Validation(format!("Unsupported locale '{s}'")))
    }
}

/// Extract the locale from a feed address such as
/// `https://schale.gg/data/jp/students.json`.
///
/// Fails when the address does not end in `/<locale>/students.json` or when
/// the locale token is not one of [`Locale::ALL`].
pub fn extract_locale(address: &str) -> Result<Locale, CoreError> {
    let token = FEED_PATH_RE
        .captures(address)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "Feed address '{address}' does not match '/<locale>/students.json'"
            ))
        })?;
    token.parse()
}
