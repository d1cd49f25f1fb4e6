//! PvP match record model and DTOs.

use pvptracker_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `pvp_records` table.
///
/// `a1..a4`/`d1..d4` are the attacking and defending strikers,
/// `a_support*`/`d_support*` the specials.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PvpRecord {
    pub id: DbId,
    pub date: String,
    pub attacker: String,
    pub defender: String,
    pub a1: Option<String>,
    pub a2: Option<String>,
    pub a3: Option<String>,
    pub a4: Option<String>,
    pub a_support1: Option<String>,
    pub a_support2: Option<String>,
    pub result: String,
    pub d1: Option<String>,
    pub d2: Option<String>,
    pub d3: Option<String>,
    pub d4: Option<String>,
    pub d_support1: Option<String>,
    pub d_support2: Option<String>,
    pub comments: Option<String>,
}

/// DTO for creating a match record.
///
/// Accepts both snake_case keys and the capitalized keys used by the
/// legacy `pvp_records.json` export (`Date`, `ASupport1`, ...).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePvpRecord {
    #[serde(alias = "Date")]
    pub date: String,
    #[serde(alias = "Attacker")]
    pub attacker: String,
    #[serde(alias = "Defender")]
    pub defender: String,
    #[serde(alias = "A1", default)]
    pub a1: Option<String>,
    #[serde(alias = "A2", default)]
    pub a2: Option<String>,
    #[serde(alias = "A3", default)]
    pub a3: Option<String>,
    #[serde(alias = "A4", default)]
    pub a4: Option<String>,
    #[serde(alias = "ASupport1", default)]
    pub a_support1: Option<String>,
    #[serde(alias = "ASupport2", default)]
    pub a_support2: Option<String>,
    #[serde(alias = "Result")]
    pub result: String,
    #[serde(alias = "D1", default)]
    pub d1: Option<String>,
    #[serde(alias = "D2", default)]
    pub d2: Option<String>,
    #[serde(alias = "D3", default)]
    pub d3: Option<String>,
    #[serde(alias = "D4", default)]
    pub d4: Option<String>,
    #[serde(alias = "DSupport1", default)]
    pub d_support1: Option<String>,
    #[serde(alias = "DSupport2", default)]
    pub d_support2: Option<String>,
    #[serde(alias = "Comments", default)]
    pub comments: Option<String>,
}
