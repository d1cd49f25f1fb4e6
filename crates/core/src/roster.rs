//! Student roster shapes: the raw upstream object and the canonical
//! per-locale fragment written by the upsert.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::locale::Locale;

/// One character object as served by an upstream locale feed.
///
/// Only the fields the roster stores are decoded; everything else in the
/// upstream object is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStudent {
    /// Upstream numeric identifier, stable across locales when present.
    #[serde(rename = "Id", default)]
    pub id: Option<i64>,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "BulletType", default)]
    pub bullet_type: Option<String>,
}

/// The columns one locale feed contributes for one character.
///
/// `canonical_name` is filled by [`normalize`] for the base locale only;
/// translations from other locales get it attached later through
/// [`StudentFragment::with_canonical_name`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentFragment {
    pub locale: Locale,
    pub canonical_name: Option<String>,
    /// Value for the `name_<locale>` column.
    pub name: String,
    pub bullet_type: String,
    pub source_id: Option<i64>,
}

impl StudentFragment {
    pub fn with_canonical_name(mut self, canonical_name: impl Into<String>) -> Self {
        self.canonical_name = Some(canonical_name.into());
        self
    }

    /// The natural key, or a validation error if it was never resolved.
    pub fn require_canonical_name(&self) -> Result<&str, CoreError> {
        self.canonical_name.as_deref().ok_or_else(|| {
            CoreError::Validation(format!(
                "'{}' fragment '{}' has no canonical name",
                self.locale, self.name
            ))
        })
    }
}

/// Map a raw upstream object onto the canonical fragment for `locale`.
///
/// Only presence is checked: `Name` and `BulletType` must be non-blank.
pub fn normalize(raw: RawStudent, locale: Locale) -> Result<StudentFragment, CoreError> {
    let name = required(raw.name, "Name")?;
    let bullet_type = required(raw.bullet_type, "BulletType")?;

    let canonical_name = locale.is_base().then(|| name.clone());

    Ok(StudentFragment {
        locale,
        canonical_name,
        name,
        bullet_type,
        source_id: raw.id,
    })
}

fn required(value: Option<String>, field: &str) -> Result<String, CoreError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CoreError::Validation(format!("Missing '{field}'"))),
    }
}
