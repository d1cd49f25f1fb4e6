//! Resolution of translated fragments to canonical names.
//!
//! Only base-locale fragments carry a canonical name. Translations are
//! attached to one through the upstream `Id` (persisted as `source_id`) or,
//! when the upstream omits ids, through the element's position in this
//! run's base feed.

use std::collections::HashMap;

/// Lookup from upstream identity to canonical name.
#[derive(Debug, Default)]
pub struct SourceIndex {
    by_source_id: HashMap<i64, String>,
    by_position: HashMap<usize, String>,
}

impl SourceIndex {
    /// Seed from pairs persisted by earlier runs. A later pair for the same
    /// id replaces an earlier one.
    pub fn seed(&mut self, pairs: impl IntoIterator<Item = (i64, String)>) {
        self.by_source_id.extend(pairs);
    }

    /// Record a base-locale element seen at `position` in this run.
    pub fn record_base(&mut self, position: usize, source_id: Option<i64>, canonical_name: &str) {
        if let Some(id) = source_id {
            self.by_source_id.insert(id, canonical_name.to_string());
        }
        self.by_position.insert(position, canonical_name.to_string());
    }

    /// Canonical name for a translated element.
    ///
    /// Elements carrying an upstream id resolve by id only; positional
    /// matching is the fallback for id-less feeds.
    pub fn resolve(&self, source_id: Option<i64>, position: usize) -> Option<&str> {
        match source_id {
            Some(id) => self.by_source_id.get(&id),
            None => self.by_position.get(&position),
        }
        .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_source_id.len().max(self.by_position.len())
    }

    pub fn is_empty(&self) -> bool {
        self.by_source_id.is_empty() && self.by_position.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_by_source_id_regardless_of_position() {
        let mut index = SourceIndex::default();
        index.record_base(0, Some(10000), "Aru");
        index.record_base(1, Some(10001), "Eimi");

        assert_eq!(index.resolve(Some(10001), 0), Some("Eimi"));
        assert_eq!(index.resolve(Some(10000), 7), Some("Aru"));
    }

    #[test]
    fn unknown_source_id_does_not_fall_back_to_position() {
        let mut index = SourceIndex::default();
        index.record_base(0, Some(10000), "Aru");
        assert_eq!(index.resolve(Some(99999), 0), None);
    }

    #[test]
    fn id_less_elements_resolve_by_position() {
        let mut index = SourceIndex::default();
        index.record_base(0, None, "Aru");
        index.record_base(1, None, "Haruka");

        assert_eq!(index.resolve(None, 1), Some("Haruka"));
        assert_eq!(index.resolve(None, 2), None);
    }

    #[test]
    fn seeded_pairs_resolve_without_a_base_feed() {
        let mut index = SourceIndex::default();
        assert!(index.is_empty());
        index.seed([(10000, "Aru".to_string())]);

        assert_eq!(index.resolve(Some(10000), 0), Some("Aru"));
        assert_eq!(index.resolve(None, 0), None);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn later_seeded_pair_wins_for_shared_id() {
        let mut index = SourceIndex::default();
        index.seed([(1, "Aru".to_string()), (1, "Aru (New Year)".to_string())]);
        assert_eq!(index.resolve(Some(1), 0), Some("Aru (New Year)"));
    }
}
