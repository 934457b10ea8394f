/// Fetching manifests and image bytes from a page location
///
/// `file://` locations are read from disk, `http(s)://` locations are
/// fetched over HTTP. Nothing is retried.
use reqwest::Url;
use serde::de::DeserializeOwned;

use super::location::{manifest_url, resolve};
use crate::error::{GalleryError, Result};
use crate::manifest::ImageRecord;

/// Raw bytes behind a URL
pub async fn fetch_bytes(url: &Url) -> Result<Vec<u8>> {
    match url.scheme() {
        "file" => {
            let path = url
                .to_file_path()
                .map_err(|_| GalleryError::Location(url.to_string()))?;
            tokio::fs::read(&path)
                .await
                .map_err(|e| GalleryError::io(path, e))
        }
        "http" | "https" => {
            let response = reqwest::get(url.clone()).await?;
            let status = response.status();
            if !status.is_success() {
                return Err(GalleryError::Status {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }
            Ok(response.bytes().await?.to_vec())
        }
        other => Err(GalleryError::Location(format!(
            "unsupported scheme '{other}': {url}"
        ))),
    }
}

async fn fetch_json<T: DeserializeOwned>(url: &Url) -> Result<T> {
    let bytes = fetch_bytes(url).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Make every record's `src` an absolute URL based at `page`
fn resolve_sources(page: &Url, records: Vec<ImageRecord>) -> Vec<ImageRecord> {
    records
        .into_iter()
        .map(|record| ImageRecord {
            src: resolve(page, &record.src).to_string(),
            ..record
        })
        .collect()
}

/// Fetch images.json next to `page`, with sources resolved against it
pub async fn fetch_images(page: &Url) -> Result<Vec<ImageRecord>> {
    let records: Vec<ImageRecord> = fetch_json(&manifest_url(page)).await?;
    tracing::debug!("Fetched {} images from {}", records.len(), page);
    Ok(resolve_sources(page, records))
}

/// Where a page gets its image list from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Source {
    /// images.json next to the page
    #[default]
    Manifest,
    /// The live `/api/images` and `/api/tags` endpoints of the page's server
    Api,
}

/// Fetch the page's images from `source`.
/// A failure is logged and yields no images.
pub async fn fetch_images_or_empty(page: &Url, source: Source) -> Vec<ImageRecord> {
    let fetched = match source {
        Source::Manifest => fetch_images(page).await,
        Source::Api => fetch_api_images(page).await,
    };

    match fetched {
        Ok(records) => records,
        Err(e) => {
            tracing::error!("❌ Error fetching images: {}", e);
            Vec::new()
        }
    }
}

fn api_url(origin: &Url, endpoint: &str) -> Url {
    resolve(origin, &format!("/api/{endpoint}"))
}

/// Records from a live server's `/api/images`
pub async fn fetch_api_images(origin: &Url) -> Result<Vec<ImageRecord>> {
    let records: Vec<ImageRecord> = fetch_json(&api_url(origin, "images")).await?;
    Ok(resolve_sources(origin, records))
}

/// Tag names from a live server's `/api/tags`
pub async fn fetch_api_tags(origin: &Url) -> Result<Vec<String>> {
    fetch_json(&api_url(origin, "tags")).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GalleryConfig;
    use crate::gallery::location::site_url;
    use crate::manifest::writer::write_manifest;
    use crate::server::{build_router, AppState};
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_site(root: &Path) {
        let gallery = root.join("gallery");
        fs::create_dir_all(gallery.join("cats")).unwrap();
        fs::write(gallery.join("cats/a.jpg"), b"cat bytes").unwrap();
        write_manifest(
            &[
                ImageRecord::new("gallery/cats/a.jpg", "cats"),
                ImageRecord::new("gallery/dogs/b.png", "dogs"),
            ],
            &root.join("images.json"),
        )
        .unwrap();
    }

    async fn spawn_server(root: &Path) -> Url {
        let config = GalleryConfig {
            site_root: root.to_path_buf(),
            ..GalleryConfig::default()
        };
        let app = build_router(AppState::new(&config));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
        Url::parse(&format!("http://{addr}/index.html")).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_images_from_local_site() {
        let dir = tempdir().unwrap();
        write_site(dir.path());
        let page = site_url(dir.path()).unwrap();

        let images = fetch_images(&page).await.unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].src, resolve(&page, "gallery/cats/a.jpg").to_string());

        let bytes = fetch_bytes(&Url::parse(&images[0].src).unwrap()).await.unwrap();
        assert_eq!(bytes, b"cat bytes");
    }

    #[tokio::test]
    async fn test_missing_manifest_yields_empty_list() {
        let dir = tempdir().unwrap();
        let page = site_url(dir.path()).unwrap();

        assert!(matches!(fetch_images(&page).await, Err(GalleryError::Io { .. })));
        assert!(fetch_images_or_empty(&page, Source::Manifest).await.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_manifest_yields_empty_list() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("images.json"), "{ not json").unwrap();
        let page = site_url(dir.path()).unwrap();

        assert!(matches!(fetch_images(&page).await, Err(GalleryError::Json(_))));
        assert!(fetch_images_or_empty(&page, Source::Manifest).await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_over_http() {
        let dir = tempdir().unwrap();
        write_site(dir.path());
        let page = spawn_server(dir.path()).await;

        let images = fetch_images(&page).await.unwrap();
        assert_eq!(images.len(), 2);
        assert!(images[0].src.starts_with("http://127.0.0.1:"));

        let bytes = fetch_bytes(&Url::parse(&images[0].src).unwrap()).await.unwrap();
        assert_eq!(bytes, b"cat bytes");

        let missing = resolve(&page, "nope.json");
        assert!(matches!(
            fetch_bytes(&missing).await,
            Err(GalleryError::Status { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_live_endpoints() {
        let dir = tempdir().unwrap();
        write_site(dir.path());
        let page = spawn_server(dir.path()).await;

        let images = fetch_api_images(&page).await.unwrap();
        assert_eq!(images.len(), 1);
        assert!(images[0].src.ends_with("/gallery/cats/a.jpg"));

        assert_eq!(fetch_api_tags(&page).await.unwrap(), vec!["cats"]);
        assert_eq!(fetch_images_or_empty(&page, Source::Api).await, images);
    }

    #[tokio::test]
    async fn test_api_source_against_plain_files_yields_empty_list() {
        let dir = tempdir().unwrap();
        write_site(dir.path());
        let page = site_url(dir.path()).unwrap();

        assert!(fetch_images_or_empty(&page, Source::Api).await.is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_scheme() {
        let url = Url::parse("ftp://example.com/images.json").unwrap();
        assert!(matches!(fetch_bytes(&url).await, Err(GalleryError::Location(_))));
    }
}
