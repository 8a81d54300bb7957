//! Gallery side of the viewer: turns the newline-delimited manifest into
//! artwork identifiers, builds the sidebar navigation links and resolves the
//! color/depth image URLs for a single artwork.
//!
//! Network access goes through [`AssetFetcher`] so the loader can be driven
//! by an in-memory fake in tests and by [`GalleryClient`] in the browser.

mod handle;
mod links;
mod manifest;
mod remote;
mod urls;

pub use handle::ArtworkId;
pub use links::{nav_links, NavLink, LINK_CLASS};
pub use manifest::{Manifest, ManifestEntry};
pub use remote::{load_manifest, AssetFetcher, GalleryClient};
pub use urls::ArtworkUrls;
pub use viewconfig::SortOrder;

#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
}
