//! Deterministic portrait naming for stored students.

use crate::types::DbId;

/// URL directory under which downloaded portraits are served.
pub const IMAGE_URL_DIR: &str = "/downloaded_images";

/// File extension of every downloaded portrait.
pub const IMAGE_EXTENSION: &str = "webp";

/// Portrait path for a student id.
///
/// Convention: `{IMAGE_URL_DIR}/{id}.webp`. Depends on nothing but `id`,
/// so recomputing it any number of times yields the same value.
///
/// # Examples
///
/// ```
/// use pvptracker_core::naming::student_image_path;
///
/// assert_eq!(student_image_path(7), "/downloaded_images/7.webp");
/// ```
pub fn student_image_path(id: DbId) -> String {
    format!("{IMAGE_URL_DIR}/{id}.{IMAGE_EXTENSION}")
}

/// Display URL for a student: the stored path when backfilled, otherwise
/// the path the backfill would assign.
pub fn student_image_url(id: DbId, image_path: Option<&str>) -> String {
    match image_path {
        Some(path) if !path.is_empty() => path.to_string(),
        _ => student_image_path(id),
    }
}
