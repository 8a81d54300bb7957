use anyhow::Result;
use renderer::{GpuTarget, ShaderSources, TextureImage};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, HtmlElement};

use crate::dom::{self, DomError};
use crate::preview::PreviewMount;

/// Mounts a fresh `<canvas>` inside the preview container.
pub struct CanvasMount {
    document: Document,
    container: HtmlElement,
    sources: ShaderSources,
}

impl CanvasMount {
    pub fn new(document: &Document, container_id: &str, sources: ShaderSources) -> Result<Self, DomError> {
        let container = dom::element_as(document, container_id, "an HTML element")?;
        Ok(Self {
            document: document.clone(),
            container,
            sources,
        })
    }

    pub fn container(&self) -> &HtmlElement {
        &self.container
    }
}

impl PreviewMount for CanvasMount {
    type Target = GpuTarget;

    async fn mount(&mut self, color: &TextureImage, depth: &TextureImage) -> Result<GpuTarget> {
        self.container.set_inner_html("");
        let canvas: HtmlCanvasElement = self
            .document
            .create_element("canvas")
            .map_err(DomError::js)?
            .dyn_into()
            .map_err(|_| DomError::WrongElement {
                id: "canvas".to_string(),
                expected: "a canvas",
            })?;
        canvas.set_width(color.width());
        canvas.set_height(color.height());
        self.container.append_child(&canvas).map_err(DomError::js)?;

        let target = GpuTarget::new(
            wgpu::SurfaceTarget::Canvas(canvas),
            &self.sources,
            color,
            depth,
        )
        .await?;
        Ok(target)
    }
}
