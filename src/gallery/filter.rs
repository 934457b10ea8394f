/// Tag filtering for the gallery view
use crate::manifest::ImageRecord;

/// Case-insensitive tag equality
pub fn tag_matches(tag: &str, wanted: &str) -> bool {
    tag.to_lowercase() == wanted.to_lowercase()
}

/// The records whose tag equals `tag`, ignoring case, in manifest order
pub fn filter_by_tag(records: &[ImageRecord], tag: &str) -> Vec<ImageRecord> {
    records
        .iter()
        .filter(|record| tag_matches(&record.tag, tag))
        .cloned()
        .collect()
}
