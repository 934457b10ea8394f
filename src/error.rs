/// Error types shared by the generator, the server and the viewer
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while scanning, serving or fetching a gallery
#[derive(Debug, Error)]
pub enum GalleryError {
    /// Reading the tag/image directory tree failed
    #[error("failed to scan {path}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// Reading or writing a single file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Transport-level failure talking to a gallery server
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered, but not with a success status
    #[error("HTTP error! Status: {status} ({url})")]
    Status { status: u16, url: String },

    /// A location that cannot be fetched from (e.g. a non-file, non-http URL)
    #[error("unusable location: {0}")]
    Location(String),
}

impl GalleryError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GalleryError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, GalleryError>;
