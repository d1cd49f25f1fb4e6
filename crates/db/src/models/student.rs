//! Student roster model.

use pvptracker_core::locale::Locale;
use pvptracker_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `students` table: one canonical record per character,
/// carrying every locale's translation that has been imported so far.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Student {
    pub id: DbId,
    pub canonical_name: String,
    pub name_en: Option<String>,
    pub name_cn: Option<String>,
    pub name_jp: Option<String>,
    pub name_kr: Option<String>,
    pub name_th: Option<String>,
    pub name_tw: Option<String>,
    pub name_vi: Option<String>,
    pub name_zh: Option<String>,
    pub bullet_type: String,
    pub image_path: Option<String>,
    /// Upstream numeric id, when the feed supplied one.
    pub source_id: Option<i64>,
}

impl Student {
    /// The translated name stored for `locale`, if any.
    pub fn name_for(&self, locale: Locale) -> Option<&str> {
        let name = match locale {
            Locale::En => &self.name_en,
            Locale::Cn => &self.name_cn,
            Locale::Jp => &self.name_jp,
            Locale::Kr => &self.name_kr,
            Locale::Th => &self.name_th,
            Locale::Tw => &self.name_tw,
            Locale::Vi => &self.name_vi,
            Locale::Zh => &self.name_zh,
        };
        name.as_deref()
    }

    /// Name to show for `locale`, falling back to the canonical name.
    pub fn display_name(&self, locale: Locale) -> &str {
        self.name_for(locale).unwrap_or(&self.canonical_name)
    }
}
