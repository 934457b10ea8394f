/// Live gallery server
///
/// Serves the site root as static files and exposes the directory scan
/// as two JSON endpoints:
/// - `GET /api/images` (handlers.rs)
/// - `GET /api/tags` (handlers.rs)
/// - everything else from disk (static_files.rs)
use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use crate::config::GalleryConfig;

pub mod handlers;
pub mod static_files;

/// Per-server state; every request scans the filesystem on its own
#[derive(Debug, Clone)]
pub struct AppState {
    pub site_root: Arc<PathBuf>,
    pub gallery_dir: Arc<str>,
}

impl AppState {
    pub fn new(config: &GalleryConfig) -> Self {
        Self {
            site_root: Arc::new(config.site_root.clone()),
            gallery_dir: Arc::from(config.gallery_dir.as_str()),
        }
    }

    pub fn gallery_path(&self) -> PathBuf {
        self.site_root.join(&*self.gallery_dir)
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/images", get(handlers::images))
        .route("/api/tags", get(handlers::tags))
        .route("/", get(static_files::index))
        .route("/*path", get(static_files::file))
        .with_state(state)
}

async fn wait_for_shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
}

/// Bind and serve until ctrl-c
pub async fn run(config: &GalleryConfig) -> std::io::Result<()> {
    let app = build_router(AppState::new(config));
    let listener = TcpListener::bind(config.bind_addr()).await?;

    tracing::info!(
        "🚀 Server running at http://{} (site root: {})",
        listener.local_addr()?,
        config.site_root.display()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await?;

    tracing::info!("👋 Server stopped");
    Ok(())
}
