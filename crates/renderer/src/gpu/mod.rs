//! wgpu side of the renderer.
//!
//! - `context` creates the GL-backend instance, surface, adapter and device.
//! - `channels` uploads the color image and depth map with their samplers.
//! - `pipeline` compiles the wrapped shaders and builds the quad pipeline,
//!   reporting validation failures through error scopes.
//! - `uniforms` mirrors the std140 parameter block.
//! - `state` ties them together as `GpuTarget`.

mod channels;
mod context;
mod pipeline;
mod state;
mod uniforms;

pub use state::GpuTarget;
pub use uniforms::ParallaxUniforms;
