use image::imageops::FilterType;
use reqwest::Url;
use std::fs;
use std::path::PathBuf;

use crate::gallery::fetch::fetch_bytes;

/// Size of generated thumbnails (longest side)
const THUMBNAIL_SIZE: u32 = 256;

/// Decoded thumbnail pixels, ready to hand to the renderer
#[derive(Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    /// RGBA8, row-major
    pub pixels: Vec<u8>,
}

impl std::fmt::Debug for Thumbnail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Thumbnail")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// Get the thumbnail cache directory
/// Returns ~/.cache/tag-gallery/thumbnails on Linux
pub fn get_thumbnail_cache_dir() -> Option<PathBuf> {
    let mut path = dirs_next::cache_dir().or_else(dirs_next::home_dir)?;
    path.push("tag-gallery");
    path.push("thumbnails");
    Some(path)
}

/// File name of the cached thumbnail for an image URL.
///
/// The whole URL is kept, with every byte other than `[A-Za-z0-9.-]`
/// written as `_XX`, so distinct URLs never share a file. `version` (when
/// known) is appended after a `~`, which the escaping never produces.
pub fn cache_key(url: &Url, version: Option<&str>) -> String {
    let mut key = String::new();
    for byte in url.as_str().bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'.' {
            key.push(byte as char);
        } else {
            key.push_str(&format!("_{:02X}", byte));
        }
    }
    if let Some(version) = version {
        key.push('~');
        key.push_str(version);
    }
    format!("{}.png", key)
}

/// Size and modification time of a local source, so a replaced file
/// gets a fresh thumbnail. Remote sources have no version.
async fn source_version(url: &Url) -> Option<String> {
    if url.scheme() != "file" {
        return None;
    }
    let path = url.to_file_path().ok()?;
    let metadata = tokio::fs::metadata(&path).await.ok()?;
    let modified = metadata
        .modified()
        .ok()?
        .duration_since(std::time::UNIX_EPOCH)
        .ok()?;
    Some(format!("{}-{}", metadata.len(), modified.as_nanos()))
}

/// Decode an image and shrink it to thumbnail size
pub fn make_thumbnail(bytes: &[u8]) -> Result<Thumbnail, String> {
    let img = image::load_from_memory(bytes).map_err(|e| format!("Failed to decode image: {}", e))?;

    // Resize to thumbnail size (keeps aspect ratio, never upscales)
    let thumbnail = if img.width() > THUMBNAIL_SIZE || img.height() > THUMBNAIL_SIZE {
        img.resize(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Lanczos3)
    } else {
        img
    };

    let rgba = thumbnail.to_rgba8();
    Ok(Thumbnail {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

fn read_cached(path: &PathBuf) -> Option<Thumbnail> {
    let bytes = fs::read(path).ok()?;
    make_thumbnail(&bytes).ok()
}

fn save_cached(path: &PathBuf, thumbnail: &Thumbnail) {
    let Some(buffer) =
        image::RgbaImage::from_raw(thumbnail.width, thumbnail.height, thumbnail.pixels.clone())
    else {
        return;
    };

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            tracing::warn!("⚠️  Failed to create thumbnail cache directory: {}", e);
            return;
        }
    }

    if let Err(e) = buffer.save(path) {
        tracing::warn!("⚠️  Failed to cache thumbnail {}: {}", path.display(), e);
    }
}

/// Load the thumbnail for an image URL, from the disk cache when possible
pub async fn load_thumbnail(url: Url) -> Result<Thumbnail, String> {
    let version = source_version(&url).await;
    let cached =
        get_thumbnail_cache_dir().map(|dir| dir.join(cache_key(&url, version.as_deref())));

    if let Some(path) = cached.clone() {
        let hit = tokio::task::spawn_blocking(move || read_cached(&path))
            .await
            .ok()
            .flatten();
        if let Some(thumbnail) = hit {
            return Ok(thumbnail);
        }
    }

    let bytes = fetch_bytes(&url).await.map_err(|e| e.to_string())?;

    // Spawn blocking because decoding and resizing are CPU-intensive
    tokio::task::spawn_blocking(move || -> Result<Thumbnail, String> {
        let thumbnail = make_thumbnail(&bytes)?;
        if let Some(path) = cached {
            save_cached(&path, &thumbnail);
        }
        tracing::debug!("📸 Generated thumbnail for {}", url);
        Ok(thumbnail)
    })
    .await
    .map_err(|e| format!("Task join error: {}", e))?
}
