//! Depth-map parallax renderer.
//!
//! A color image and its depth map are drawn on a full-screen quad whose
//! fragment shader offsets each sample by a 2D shift vector scaled by depth.
//! The flow is:
//!
//! ```text
//!   TextureImage (color, depth) ─┐
//!   ShaderSources ───────────────┼─▶ GpuTarget::new ──▶ ParallaxRenderer::new (initial draw)
//!                                │                              │
//!   TimeSource ─▶ ParallaxLoop::tick ─▶ ShiftMotion ─▶ set_shift ┘──▶ FrameTarget::draw
//! ```
//!
//! `ParallaxRenderer` owns the uniform state and redraws synchronously on
//! every setter. It talks to the GPU only through [`FrameTarget`], so the
//! uniform bookkeeping and the animation loop are exercised without a
//! graphics context. [`GpuTarget`] is the wgpu implementation; it runs on the
//! GL backend, which is WebGL2 in the browser.
//!
//! Shaders are authored in WebGL-style GLSL (`attribute`, `varying`,
//! `texture2D`, `gl_FragColor`) and wrapped at runtime by [`compile`] so the
//! same names resolve against the wgpu bind group.

pub mod compile;
mod error;
mod gpu;
mod parallax;
pub mod runtime;
mod types;

pub use error::{RenderError, Stage};
pub use gpu::{GpuTarget, ParallaxUniforms};
pub use parallax::{FrameTarget, ParallaxRenderer};
pub use runtime::{
    CssTilt, FrameUpdate, LoopControl, ParallaxLoop, Shift, ShiftMotion, SteppedTimeSource,
    TimeSource,
};
pub use types::{ShaderSources, TextureImage};
