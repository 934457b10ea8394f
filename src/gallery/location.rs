/// Page locations and navigation URLs
///
/// The viewer is always "at" a page URL: `file:///…/index.html` for a local
/// site or `http://host/index.html` for a running server. Relative paths are
/// resolved against the page's base path (the URL minus its last segment).
use std::path::Path;

use reqwest::Url;

use crate::error::{GalleryError, Result};

pub const HOME_PAGE: &str = "index.html";
pub const GALLERY_PAGE: &str = "gallery.html";
pub const TAG_PARAM: &str = "tag";

/// Which page the location shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Home,
    Tag(String),
}

impl View {
    /// `?tag=<name>` selects the tag gallery, anything else is home
    pub fn from_url(url: &Url) -> Self {
        url.query_pairs()
            .find(|(key, _)| key == TAG_PARAM)
            .map(|(_, value)| value.into_owned())
            .filter(|tag| !tag.is_empty())
            .map(View::Tag)
            .unwrap_or(View::Home)
    }
}

/// Resolve `src` against the base path of `page`.
/// A leading `/` resolves against the origin instead.
pub fn resolve(page: &Url, src: &str) -> Url {
    let mut url = page.clone();
    url.set_query(None);
    url.set_fragment(None);

    if let Ok(mut segments) = url.path_segments_mut() {
        if src.starts_with('/') {
            segments.clear();
        } else {
            segments.pop();
        }
        segments.extend(src.trim_start_matches('/').split('/'));
    }

    url
}

pub fn manifest_url(page: &Url) -> Url {
    resolve(page, crate::config::DEFAULT_MANIFEST)
}

pub fn home_url(page: &Url) -> Url {
    resolve(page, HOME_PAGE)
}

/// `gallery.html?tag=<urlencoded tag>` next to the current page
pub fn gallery_url(page: &Url, tag: &str) -> Url {
    let mut url = resolve(page, GALLERY_PAGE);
    url.query_pairs_mut().append_pair(TAG_PARAM, tag);
    url
}

/// Home page URL of a site root on disk
pub fn site_url(root: &Path) -> Result<Url> {
    let root = root
        .canonicalize()
        .map_err(|e| GalleryError::io(root, e))?;
    let dir = Url::from_directory_path(&root)
        .map_err(|_| GalleryError::Location(root.display().to_string()))?;
    Ok(home_url(&dir))
}

/// Parse a command line location: a URL, a site directory, or a page file
pub fn parse_location(input: &str) -> Result<Url> {
    if input.contains("://") {
        return Url::parse(input).map_err(|e| GalleryError::Location(format!("{input}: {e}")));
    }

    let path = Path::new(input);
    if path.is_dir() {
        return site_url(path);
    }

    let file = path
        .canonicalize()
        .map_err(|e| GalleryError::io(path, e))?;
    Url::from_file_path(&file).map_err(|_| GalleryError::Location(file.display().to_string()))
}
