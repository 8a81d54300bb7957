use crate::RenderError;

/// Decoded image ready for upload, tightly packed RGBA8 rows.
#[derive(Clone, PartialEq, Eq)]
pub struct TextureImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl TextureImage {
    /// Decodes PNG or JPEG bytes. Rows stay in file order (top row first),
    /// matching the quad's texture coordinates.
    pub fn decode(bytes: &[u8]) -> Result<Self, RenderError> {
        let decoded = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = decoded.dimensions();
        Ok(Self {
            width,
            height,
            rgba: decoded.into_raw(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }
}

impl std::fmt::Debug for TextureImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}

/// WebGL-style vertex and fragment source text, before wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use image::ImageEncoder;

    use super::*;

    fn encode_png(width: u32, height: u32, pixels: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        image::codecs::png::PngEncoder::new(&mut bytes)
            .write_image(pixels, width, height, image::ExtendedColorType::Rgba8)
            .unwrap();
        bytes
    }

    #[test]
    fn decodes_png_into_rgba_rows() {
        let pixels = [
            255, 0, 0, 255, 0, 255, 0, 255, //
            0, 0, 255, 255, 255, 255, 255, 128,
        ];
        let decoded = TextureImage::decode(&encode_png(2, 2, &pixels)).unwrap();
        assert_eq!(decoded.size(), (2, 2));
        assert_eq!(decoded.rgba(), &pixels);
    }

    #[test]
    fn rejects_garbage_bytes() {
        let err = TextureImage::decode(b"not an image").unwrap_err();
        assert!(matches!(err, RenderError::ImageDecode(_)));
    }
}
