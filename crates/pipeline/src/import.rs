//! Sequential import of all locale feeds into the roster store.

use pvptracker_core::locale::{extract_locale, Locale};
use pvptracker_core::roster::{normalize, RawStudent, StudentFragment};
use pvptracker_db::store::StudentStore;
use serde::Serialize;

use crate::feed::FeedSource;
use crate::index::SourceIndex;

/// Outcome of importing one feed address.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FeedReport {
    pub url: String,
    /// `None` when the address did not yield a locale.
    pub locale: Option<Locale>,
    pub upserted: usize,
    /// Elements dropped by decoding, normalization, resolution or the store.
    pub skipped: usize,
    /// Why the whole feed was skipped, if it was.
    pub error: Option<String>,
}

/// Outcome of a full import run, one report per configured address.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportSummary {
    pub feeds: Vec<FeedReport>,
}

impl ImportSummary {
    pub fn upserted(&self) -> usize {
        self.feeds.iter().map(|f| f.upserted).sum()
    }

    pub fn skipped(&self) -> usize {
        self.feeds.iter().map(|f| f.skipped).sum()
    }

    /// Addresses whose feed was skipped entirely.
    pub fn failed_feeds(&self) -> Vec<&str> {
        self.feeds
            .iter()
            .filter(|f| f.error.is_some())
            .map(|f| f.url.as_str())
            .collect()
    }
}

/// Import every feed in `feed_urls`, one at a time.
///
/// The base locale is always processed first so its elements establish
/// the canonical rows and the [`SourceIndex`] that translations resolve
/// through; the remaining feeds keep their configured order. A failing
/// address, fetch or element is logged and skipped.
pub async fn import_roster(
    store: &dyn StudentStore,
    source: &dyn FeedSource,
    feed_urls: &[String],
) -> ImportSummary {
    let mut summary = ImportSummary::default();
    let mut feeds: Vec<(Locale, &str)> = Vec::with_capacity(feed_urls.len());

    for url in feed_urls {
        match extract_locale(url) {
            Ok(locale) => feeds.push((locale, url.as_str())),
            Err(e) => {
                tracing::error!(url = %url, error = %e, "Skipping feed with unrecognised address");
                summary.feeds.push(FeedReport {
                    url: url.clone(),
                    error: Some(e.to_string()),
                    ..Default::default()
                });
            }
        }
    }
    // Stable: non-base feeds keep their relative order.
    feeds.sort_by_key(|(locale, _)| !locale.is_base());

    let mut index = SourceIndex::default();
    match store.source_index().await {
        Ok(pairs) => index.seed(pairs),
        Err(e) => tracing::warn!(error = %e, "Could not load persisted source ids"),
    }

    for (locale, url) in feeds {
        let report = import_feed(store, source, &mut index, locale, url).await;
        summary.feeds.push(report);
    }

    tracing::info!(
        upserted = summary.upserted(),
        skipped = summary.skipped(),
        failed_feeds = summary.failed_feeds().len(),
        "Roster import finished"
    );
    summary
}

async fn import_feed(
    store: &dyn StudentStore,
    source: &dyn FeedSource,
    index: &mut SourceIndex,
    locale: Locale,
    url: &str,
) -> FeedReport {
    let mut report = FeedReport {
        url: url.to_string(),
        locale: Some(locale),
        ..Default::default()
    };

    let items = match source.fetch(url).await {
        Ok(items) => items,
        Err(e) => {
            tracing::error!(locale = %locale, url, error = %e, "Failed to fetch locale feed");
            report.error = Some(e.to_string());
            return report;
        }
    };

    for (position, item) in items.into_iter().enumerate() {
        let Some(fragment) = prepare_fragment(index, locale, position, item) else {
            report.skipped += 1;
            continue;
        };

        match store.upsert_student(&fragment).await {
            Ok(student) => {
                if locale.is_base() {
                    index.record_base(position, fragment.source_id, &student.canonical_name);
                }
                report.upserted += 1;
            }
            Err(e) => {
                tracing::error!(
                    locale = %locale,
                    name = %fragment.name,
                    error = %e,
                    "Failed to upsert student"
                );
                report.skipped += 1;
            }
        }
    }

    tracing::info!(
        locale = %locale,
        upserted = report.upserted,
        skipped = report.skipped,
        "Imported locale feed"
    );
    report
}

/// Decode, normalize and resolve one feed element. `None` means skip.
///
/// Base elements enter the index only once their row is stored, so a
/// rejected base row never lends its name to a translation.
fn prepare_fragment(
    index: &SourceIndex,
    locale: Locale,
    position: usize,
    item: serde_json::Value,
) -> Option<StudentFragment> {
    let raw: RawStudent = match serde_json::from_value(item) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(locale = %locale, position, error = %e, "Undecodable feed element");
            return None;
        }
    };

    let fragment = match normalize(raw, locale) {
        Ok(fragment) => fragment,
        Err(e) => {
            tracing::warn!(locale = %locale, position, error = %e, "Invalid feed element");
            return None;
        }
    };

    if fragment.canonical_name.is_some() {
        return Some(fragment);
    }

    match index.resolve(fragment.source_id, position) {
        Some(canonical_name) => {
            let canonical_name = canonical_name.to_string();
            Some(fragment.with_canonical_name(canonical_name))
        }
        None => {
            tracing::warn!(
                locale = %locale,
                name = %fragment.name,
                source_id = ?fragment.source_id,
                "No canonical student for translation"
            );
            None
        }
    }
}
