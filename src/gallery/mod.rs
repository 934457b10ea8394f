/// Gallery client logic
///
/// Everything the viewer needs that does not depend on the GUI toolkit:
/// - Page locations and navigation URLs (location.rs)
/// - Manifest and image fetching (fetch.rs)
/// - Tag filtering (filter.rs)
/// - Incremental page reveal (paging.rs)
/// - Search suggestions (search.rs)
/// - Fire-once visibility tracking for lazy image loads (lazy.rs)

pub mod fetch;
pub mod filter;
pub mod lazy;
pub mod location;
pub mod paging;
pub mod search;

pub use lazy::{GridViewport, LazyLoader};
pub use paging::RenderState;
