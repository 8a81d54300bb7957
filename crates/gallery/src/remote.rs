use reqwest::Client;
use url::Url;
use viewconfig::SortOrder;

use crate::{ArtworkId, GalleryError, Manifest};

/// Source of manifest text and image bytes.
///
/// Futures are not required to be `Send`; everything runs on the browser's
/// single thread.
#[allow(async_fn_in_trait)]
pub trait AssetFetcher {
    async fn fetch_text(&self, url: &Url) -> Result<String, GalleryError>;
    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, GalleryError>;
}

#[derive(Debug, Clone, Default)]
pub struct GalleryClient {
    http: Client,
}

impl GalleryClient {
    pub fn new() -> Result<Self, GalleryError> {
        let http = Client::builder().build()?;
        Ok(Self { http })
    }

    async fn get(&self, url: &Url) -> Result<reqwest::Response, GalleryError> {
        tracing::debug!(%url, "fetching");
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GalleryError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

impl AssetFetcher for GalleryClient {
    async fn fetch_text(&self, url: &Url) -> Result<String, GalleryError> {
        Ok(self.get(url).await?.text().await?)
    }

    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, GalleryError> {
        Ok(self.get(url).await?.bytes().await?.to_vec())
    }
}

/// Fetches the manifest at `url` and returns its artwork ids in `order`.
pub async fn load_manifest<F: AssetFetcher>(
    fetcher: &F,
    url: &Url,
    order: SortOrder,
) -> Result<Vec<ArtworkId>, GalleryError> {
    let text = fetcher.fetch_text(url).await?;
    let manifest = Manifest::parse(&text);
    tracing::debug!(%url, entries = manifest.len(), ?order, "parsed manifest");
    Ok(manifest.artwork_ids(order))
}
