/// Reading and writing images.json
use std::fs;
use std::path::Path;

use super::data::ImageRecord;
use super::scan::list_records;
use crate::config::GalleryConfig;
use crate::error::{GalleryError, Result};

/// Write the manifest as a pretty-printed (2-space) JSON array
pub fn write_manifest(records: &[ImageRecord], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json).map_err(|e| GalleryError::io(path, e))
}

/// Scan the gallery folder and regenerate images.json.
///
/// The scan runs to completion before anything is written, so a failed
/// scan leaves any existing manifest untouched.
/// Returns the number of records written.
pub fn generate(config: &GalleryConfig) -> Result<usize> {
    let gallery = config.gallery_path();
    let output = config.manifest_path();

    tracing::info!("🔍 Scanning gallery: {}", gallery.display());

    let records = list_records(&gallery, &config.gallery_dir)?;
    write_manifest(&records, &output)?;

    tracing::info!(
        "✅ {} generated successfully ({} images)",
        output.display(),
        records.len()
    );

    Ok(records.len())
}
