use crate::{ParallaxUniforms, RenderError};

/// Anything that can present one frame for a uniform set.
pub trait FrameTarget {
    fn draw(&mut self, uniforms: &ParallaxUniforms) -> Result<(), RenderError>;
}

/// Uniform state plus the target it is drawn to.
///
/// Every setter changes exactly one uniform and redraws once before
/// returning. The remaining uniforms stay as they were at construction.
pub struct ParallaxRenderer<T> {
    target: T,
    uniforms: ParallaxUniforms,
    draws: u64,
}

impl<T: FrameTarget> ParallaxRenderer<T> {
    /// Takes ownership of `target` and issues the initial draw.
    pub fn new(target: T, uniforms: ParallaxUniforms) -> Result<Self, RenderError> {
        let mut renderer = Self {
            target,
            uniforms,
            draws: 0,
        };
        renderer.redraw()?;
        Ok(renderer)
    }

    pub fn set_shift(&mut self, shift: [f32; 2]) -> Result<(), RenderError> {
        self.uniforms.shift = shift;
        self.redraw()
    }

    pub fn set_scale_factor(&mut self, scale_factor: f32) -> Result<(), RenderError> {
        self.uniforms.scale_factor = scale_factor;
        self.redraw()
    }

    pub fn set_depth_factor(&mut self, depth_factor: f32) -> Result<(), RenderError> {
        self.uniforms.depth_factor = depth_factor;
        self.redraw()
    }

    pub fn uniforms(&self) -> &ParallaxUniforms {
        &self.uniforms
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Number of draws issued, including the initial one.
    pub fn draw_count(&self) -> u64 {
        self.draws
    }

    fn redraw(&mut self) -> Result<(), RenderError> {
        self.draws += 1;
        self.target.draw(&self.uniforms)
    }
}
