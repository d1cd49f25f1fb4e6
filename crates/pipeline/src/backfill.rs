//! Portrait path backfill.

use pvptracker_core::naming::student_image_path;
use pvptracker_db::store::StudentStore;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BackfillSummary {
    pub updated: usize,
    pub failed: usize,
}

/// Assign every stored student its deterministic portrait path,
/// overwriting whatever was there. Safe to run any number of times.
pub async fn backfill_image_paths(store: &dyn StudentStore) -> BackfillSummary {
    let mut summary = BackfillSummary::default();

    let ids = match store.student_ids().await {
        Ok(ids) => ids,
        Err(e) => {
            tracing::error!(error = %e, "Failed to list students for image backfill");
            return summary;
        }
    };

    for id in ids {
        let path = student_image_path(id);
        match store.set_image_path(id, &path).await {
            Ok(true) => summary.updated += 1,
            Ok(false) => {
                tracing::warn!(student_id = id, "Student vanished during image backfill");
                summary.failed += 1;
            }
            Err(e) => {
                tracing::error!(student_id = id, error = %e, "Failed to update student image path");
                summary.failed += 1;
            }
        }
    }

    tracing::info!(
        updated = summary.updated,
        failed = summary.failed,
        "Image path backfill finished"
    );
    summary
}
