//! Loading the two images and bringing up the renderer.
//!
//! Both images are fetched before anything touches the page, so a missing
//! depth map leaves the preview container untouched.

use anyhow::{Context, Result};
use gallery::{ArtworkUrls, AssetFetcher};
use renderer::{FrameTarget, ParallaxRenderer, ParallaxUniforms, TextureImage};

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewRequest {
    pub urls: ArtworkUrls,
    pub scale_factor: f32,
    pub depth_factor: f32,
}

/// Creates the drawing surface once both images are decoded.
#[allow(async_fn_in_trait)]
pub trait PreviewMount {
    type Target: FrameTarget;

    /// Attaches a surface sized to `color` and returns a target drawing both
    /// images.
    async fn mount(&mut self, color: &TextureImage, depth: &TextureImage) -> Result<Self::Target>;
}

/// Fetches color then depth, mounts the surface, issues the initial draw and
/// applies the requested scale and depth factors.
pub async fn show_preview<F, M>(
    fetcher: &F,
    mount: &mut M,
    request: &PreviewRequest,
) -> Result<ParallaxRenderer<M::Target>>
where
    F: AssetFetcher,
    M: PreviewMount,
{
    let urls = &request.urls;
    let color_bytes = fetcher
        .fetch_bytes(&urls.color)
        .await
        .with_context(|| format!("loading color image {}", urls.color))?;
    let depth_bytes = fetcher
        .fetch_bytes(&urls.depth)
        .await
        .with_context(|| format!("loading depth map {}", urls.depth))?;

    let color = TextureImage::decode(&color_bytes).context("decoding color image")?;
    let depth = TextureImage::decode(&depth_bytes).context("decoding depth map")?;
    if depth.size() != color.size() {
        tracing::debug!(
            color = ?color.size(),
            depth = ?depth.size(),
            "depth map size differs from color image"
        );
    }

    let target = mount
        .mount(&color, &depth)
        .await
        .context("creating preview surface")?;
    let uniforms = ParallaxUniforms::for_image(color.width(), color.height());
    let mut renderer = ParallaxRenderer::new(target, uniforms)?;
    renderer.set_scale_factor(request.scale_factor)?;
    renderer.set_depth_factor(request.depth_factor)?;

    tracing::info!(
        color = %urls.color,
        width = color.width(),
        height = color.height(),
        "preview ready"
    );
    Ok(renderer)
}
