use gallery::{ArtworkId, ArtworkUrls, GalleryError};
use renderer::{CssTilt, ShiftMotion};
use url::Url;
use viewconfig::{ConfigError, QueryParams, ViewParams, ViewerConfig};

use crate::preview::PreviewRequest;

/// Everything a page visit needs: the bundled configuration, the page URL
/// and the view parameters resolved from its query string.
#[derive(Debug, Clone)]
pub struct PageSettings {
    pub config: ViewerConfig,
    pub page: Url,
    pub view: ViewParams,
}

impl PageSettings {
    pub fn new(config: ViewerConfig, page: Url) -> Self {
        let view = ViewParams::resolve(&QueryParams::from_url(&page), &config.defaults);
        Self { config, page, view }
    }

    pub fn manifest_url(&self) -> Result<Url, ConfigError> {
        Ok(self.page.join(&self.config.manifest.url)?)
    }

    pub fn artwork(&self) -> ArtworkId {
        ArtworkId::new(self.view.art.clone())
    }

    pub fn preview_request(&self) -> Result<PreviewRequest, GalleryError> {
        let urls = ArtworkUrls::resolve(&self.config.artwork, &self.page, &self.artwork())?;
        Ok(PreviewRequest {
            urls,
            scale_factor: self.view.scale_factor,
            depth_factor: self.view.depth_factor,
        })
    }

    /// Element id of the fragment shader selected by the `alt` flag.
    pub fn fragment_shader_id(&self) -> &str {
        self.config.shaders.fragment_for(self.view.alt)
    }

    pub fn motion(&self) -> ShiftMotion {
        ShiftMotion::new(self.view.strength).with_speed(self.config.motion.speed)
    }

    pub fn tilt(&self) -> CssTilt {
        CssTilt {
            perspective_px: self.config.motion.perspective_px,
            degrees: self.config.motion.tilt_degrees,
        }
    }
}
