//! Validation rules for submitted PvP match records.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Player names and results are restricted to word characters and spaces.
const MATCH_FIELD_PATTERN: &str = r"^[\w\s]+$";

static MATCH_FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(MATCH_FIELD_PATTERN).expect("valid regex"));

/// Validate a free-text match field (`attacker`, `defender`, `result`).
pub fn validate_match_field(field: &str, value: &str) -> Result<(), CoreError> {
    if MATCH_FIELD_RE.is_match(value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Field '{field}' must contain only letters, digits, underscores and spaces"
        )))
    }
}

/// Validate a match date. Only presence is enforced since historical
/// records use several date formats.
pub fn validate_match_date(value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation("Field 'date' is required".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_words_and_spaces() {
        assert!(validate_match_field("attacker", "Sensei 42").is_ok());
        assert!(validate_match_field("result", "Win").is_ok());
        assert!(validate_match_field("defender", "under_score").is_ok());
    }

    #[test]
    fn rejects_markup_and_empty() {
        assert!(validate_match_field("attacker", "<script>").is_err());
        assert!(validate_match_field("result", "").is_err());
        assert!(validate_match_field("result", "win;drop").is_err());
    }

    #[test]
    fn date_must_be_present() {
        assert!(validate_match_date("2024-03-01").is_ok());
        assert!(validate_match_date("   ").is_err());
    }
}
