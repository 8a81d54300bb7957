use wgpu::util::DeviceExt;

use crate::{FrameTarget, RenderError, ShaderSources, TextureImage};

use super::channels::ImageChannel;
use super::context::GpuContext;
use super::pipeline::{ParallaxPipeline, QUAD_VERTICES};
use super::uniforms::ParallaxUniforms;

/// wgpu-backed [`FrameTarget`]: one pipeline, one bind group, one quad.
pub struct GpuTarget {
    context: GpuContext,
    pipeline: ParallaxPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    vertex_buffer: wgpu::Buffer,
    _channels: [ImageChannel; 2],
}

impl GpuTarget {
    /// Builds the pipeline for `sources` and uploads both images. The
    /// surface is sized to the color image.
    pub async fn new(
        surface: wgpu::SurfaceTarget<'static>,
        sources: &ShaderSources,
        color: &TextureImage,
        depth: &TextureImage,
    ) -> Result<Self, RenderError> {
        let context = GpuContext::new(surface, color.size()).await?;
        let pipeline = ParallaxPipeline::new(&context.device, context.format(), sources).await?;

        let device = &context.device;
        let color_channel = ImageChannel::upload(
            device,
            &context.queue,
            "color image",
            color,
            context.max_texture_dimension,
        )?;
        let depth_channel = ImageChannel::upload(
            device,
            &context.queue,
            "depth map",
            depth,
            context.max_texture_dimension,
        )?;

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("parallax uniforms"),
            size: std::mem::size_of::<ParallaxUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad vertices"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("parallax bind group"),
            layout: &pipeline.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&color_channel.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&color_channel.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(&depth_channel.view),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: wgpu::BindingResource::Sampler(&depth_channel.sampler),
                },
            ],
        });

        Ok(Self {
            context,
            pipeline,
            bind_group,
            uniform_buffer,
            vertex_buffer,
            _channels: [color_channel, depth_channel],
        })
    }

    fn acquire(&self) -> Result<wgpu::SurfaceTexture, RenderError> {
        match self.context.surface.get_current_texture() {
            Ok(frame) => Ok(frame),
            Err(error @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                tracing::warn!(%error, "surface lost; reconfiguring");
                self.context.reconfigure();
                Ok(self.context.surface.get_current_texture()?)
            }
            Err(error) => Err(error.into()),
        }
    }
}

impl FrameTarget for GpuTarget {
    fn draw(&mut self, uniforms: &ParallaxUniforms) -> Result<(), RenderError> {
        self.context
            .queue
            .write_buffer(&self.uniform_buffer, 0, uniforms.as_bytes());

        let frame = self.acquire()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("parallax encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("parallax pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            render_pass.set_pipeline(&self.pipeline.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.draw(0..QUAD_VERTICES.len() as u32, 0..1);
        }
        self.context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}
