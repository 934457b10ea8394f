/// Manifest module
///
/// This module turns a tag/file directory tree into the image manifest:
/// - Shared data structures (data.rs)
/// - The directory scan used by both the generator and the server (scan.rs)
/// - Reading and writing images.json (writer.rs)

pub mod data;
pub mod scan;
pub mod writer;

pub use data::{tag_set, ImageRecord};
pub use scan::{list_records, list_tags};
