use bytemuck::{Pod, Zeroable};

const IDENTITY_MAT3: [[f32; 4]; 3] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
];

/// Contents of the `ParallaxParams` std140 block.
///
/// `mat3` members occupy three vec4-aligned columns; `_padding0` moves the
/// first matrix to its 16-byte boundary.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ParallaxUniforms {
    pub scale_factor: f32,
    pub depth_factor: f32,
    pub shift: [f32; 2],
    pub input_size: [f32; 4],
    pub output_frame: [f32; 4],
    pub offset: [f32; 3],
    pub scale: f32,
    pub focus: f32,
    pub enlarge: f32,
    pub aspect: f32,
    pub _padding0: f32,
    pub projection_matrix: [[f32; 4]; 3],
    pub filter_matrix: [[f32; 4]; 3],
}

impl ParallaxUniforms {
    pub const INITIAL_SCALE_FACTOR: f32 = 0.03;
    pub const INITIAL_DEPTH_FACTOR: f32 = 0.02;
    pub const INITIAL_SHIFT: [f32; 2] = [0.5, 0.0];

    /// Uniforms for a color image of `width` x `height` pixels.
    pub fn for_image(width: u32, height: u32) -> Self {
        let (w, h) = (width as f32, height as f32);
        Self {
            scale_factor: Self::INITIAL_SCALE_FACTOR,
            depth_factor: Self::INITIAL_DEPTH_FACTOR,
            shift: Self::INITIAL_SHIFT,
            input_size: [w, h, 0.0, 0.0],
            output_frame: [0.0, 0.0, 1.0, 1.0],
            offset: [0.0; 3],
            scale: 1.0,
            focus: 1.0,
            enlarge: 1.0,
            aspect: if h > 0.0 { w / h } else { 1.0 },
            _padding0: 0.0,
            projection_matrix: IDENTITY_MAT3,
            filter_matrix: IDENTITY_MAT3,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
