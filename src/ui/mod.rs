/// Native gallery viewer
///
/// - Application state, messages and layout (app.rs)
/// - Thumbnail decoding and caching for grid cells (thumbnail.rs)

pub mod app;
pub mod thumbnail;

pub use app::run;
