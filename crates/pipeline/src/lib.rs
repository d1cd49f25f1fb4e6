//! Student roster ingestion.
//!
//! Fetches every locale feed in turn, merges each character into its
//! canonical `students` row and then backfills portrait paths. Failures are
//! contained to one feed or one row; nothing here aborts the caller.

pub mod backfill;
pub mod config;
pub mod feed;
pub mod import;
pub mod index;

use pvptracker_db::store::StudentStore;

use crate::backfill::{backfill_image_paths, BackfillSummary};
use crate::feed::FeedSource;
use crate::import::{import_roster, ImportSummary};

/// Run the startup roster sync: import every feed, then backfill images.
///
/// The backfill runs regardless of how the import went.
pub async fn sync_roster(
    store: &dyn StudentStore,
    source: &dyn FeedSource,
    feed_urls: &[String],
) -> (ImportSummary, BackfillSummary) {
    let import = import_roster(store, source, feed_urls).await;
    let backfill = backfill_image_paths(store).await;
    (import, backfill)
}
