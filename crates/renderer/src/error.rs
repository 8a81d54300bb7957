use std::fmt;

/// Shader stage named in compile diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl Stage {
    pub(crate) fn naga(self) -> wgpu::naga::ShaderStage {
        match self {
            Stage::Vertex => wgpu::naga::ShaderStage::Vertex,
            Stage::Fragment => wgpu::naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Vertex => f.write_str("vertex"),
            Stage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("graphics context unavailable: {0}")]
    ContextUnavailable(String),
    #[error("unable to compile {stage} shader: {log}")]
    ShaderCompile { stage: Stage, log: String },
    #[error("unable to link shader program: {log}")]
    ProgramLink { log: String },
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),
    #[error("image is {width}x{height} but the device allows at most {max} pixels per side")]
    TextureTooLarge { width: u32, height: u32, max: u32 },
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}
