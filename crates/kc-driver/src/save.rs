use std::path::Path;

use kc_card::Document;

use crate::error::DriverError;
use crate::json::to_json;

/// Writes `document`'s JSON export to `path`, pretty-printed.
///
/// This is one-way: JSON export is for inspection, not a storage format
/// this crate reads back. See [`to_json`] for the shape it produces.
///
/// # Errors
///
/// [`DriverError::Json`] if serialization fails (it shouldn't, since
/// [`to_json`] only ever produces a subset of `serde_json::Value` that
/// round-trips through `serde_json` fine); [`DriverError::Io`] on write
/// failure.
pub fn save_json(document: &Document, path: impl AsRef<Path>, include_image: bool) -> Result<(), DriverError> {
    let value = to_json(document, include_image);
    let text = serde_json::to_string_pretty(&value)?;
    std::fs::write(path, text)?;
    Ok(())
}
