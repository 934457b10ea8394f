/// Runtime configuration
///
/// Defaults, overridden by `TAG_GALLERY_*` environment variables,
/// overridden in turn by command line flags (see main.rs).
use std::env;
use std::path::PathBuf;

/// Name of the folder (under the site root) holding one subfolder per tag
pub const DEFAULT_GALLERY_DIR: &str = "gallery";
/// Name of the generated manifest file (at the site root)
pub const DEFAULT_MANIFEST: &str = "images.json";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryConfig {
    /// Directory containing index.html, images.json and the gallery folder
    pub site_root: PathBuf,
    pub gallery_dir: String,
    pub manifest_name: String,
    /// Address the server binds to
    pub bind: String,
    pub port: u16,
    /// Number of columns in the viewer grid
    pub columns: usize,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            site_root: PathBuf::from("."),
            gallery_dir: DEFAULT_GALLERY_DIR.to_string(),
            manifest_name: DEFAULT_MANIFEST.to_string(),
            bind: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            columns: 4,
        }
    }
}

impl GalleryConfig {
    /// Defaults with overrides from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Defaults with overrides from an arbitrary variable lookup.
    /// Unparseable values fall back to the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(root) = lookup("TAG_GALLERY_ROOT").filter(|v| !v.trim().is_empty()) {
            config.site_root = PathBuf::from(root);
        }
        if let Some(bind) = lookup("TAG_GALLERY_BIND").filter(|v| !v.trim().is_empty()) {
            config.bind = bind.trim().to_string();
        }
        if let Some(port) = lookup("TAG_GALLERY_PORT").and_then(|v| v.trim().parse().ok()) {
            config.port = port;
        }
        if let Some(columns) = lookup("TAG_GALLERY_COLUMNS")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|c| *c > 0)
        {
            config.columns = columns;
        }

        config
    }

    /// `<site_root>/gallery`
    pub fn gallery_path(&self) -> PathBuf {
        self.site_root.join(&self.gallery_dir)
    }

    /// `<site_root>/images.json`
    pub fn manifest_path(&self) -> PathBuf {
        self.site_root.join(&self.manifest_name)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}
