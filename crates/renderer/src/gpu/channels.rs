use wgpu::util::{DeviceExt, TextureDataOrder};

use crate::{RenderError, TextureImage};

/// Rejects images the device cannot hold as a texture or present as a
/// surface.
pub(crate) fn check_dimensions((width, height): (u32, u32), max: u32) -> Result<(), RenderError> {
    if width > max || height > max {
        return Err(RenderError::TextureTooLarge { width, height, max });
    }
    Ok(())
}

/// A sampled 2D image bound next to the uniform block.
pub(crate) struct ImageChannel {
    _texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl ImageChannel {
    /// Uploads `image` as RGBA8 with mirrored-repeat addressing and linear
    /// filtering.
    pub(crate) fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        image: &TextureImage,
        max_dimension: u32,
    ) -> Result<Self, RenderError> {
        let (width, height) = image.size();
        check_dimensions(image.size(), max_dimension)?;

        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width: width.max(1),
                    height: height.max(1),
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8Unorm,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            TextureDataOrder::LayerMajor,
            image.rgba(),
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::MirrorRepeat,
            address_mode_v: wgpu::AddressMode::MirrorRepeat,
            address_mode_w: wgpu::AddressMode::MirrorRepeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        tracing::debug!(label, width, height, "uploaded image texture");

        Ok(Self {
            _texture: texture,
            view,
            sampler,
        })
    }
}
