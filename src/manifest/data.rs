/// Shared data structures for the manifest
///
/// These structs represent the data model that flows from the
/// directory scan, through images.json or the API, into the viewer.
use serde::{Deserialize, Serialize};

/// Represents a single image in the gallery
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// Path of the image, e.g. "gallery/cats/tabby.jpg"
    pub src: String,
    /// Name of the folder the image lives in
    pub tag: String,
    /// Free text; nothing populates it yet
    #[serde(default)]
    pub description: String,
}

impl ImageRecord {
    pub fn new(src: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            tag: tag.into(),
            description: String::new(),
        }
    }
}

/// Unique tags of a manifest, in the order they first appear
pub fn tag_set(records: &[ImageRecord]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for record in records {
        if !tags.iter().any(|t| t == &record.tag) {
            tags.push(record.tag.clone());
        }
    }
    tags
}
