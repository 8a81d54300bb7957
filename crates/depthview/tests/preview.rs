use std::cell::RefCell;
use std::collections::HashMap;

use anyhow::Result;
use depthview::{show_preview, PreviewMount, PreviewRequest};
use gallery::{ArtworkUrls, AssetFetcher, GalleryError};
use image::ImageEncoder;
use renderer::{FrameTarget, ParallaxUniforms, RenderError, TextureImage};
use url::Url;

const COLOR_URL: &str = "https://images.example/eurydice-02.jpg";
const DEPTH_URL: &str = "https://depth.example/eurydice-02-dpt_beit_large_512.png";

fn encode_png(width: u32, height: u32) -> Vec<u8> {
    let pixels = vec![200u8; (width * height * 4) as usize];
    let mut bytes = Vec::new();
    image::codecs::png::PngEncoder::new(&mut bytes)
        .write_image(&pixels, width, height, image::ExtendedColorType::Rgba8)
        .unwrap();
    bytes
}

#[derive(Default)]
struct MemoryFetcher {
    files: HashMap<String, Vec<u8>>,
    requested: RefCell<Vec<String>>,
}

impl MemoryFetcher {
    fn with_file(mut self, url: &str, bytes: Vec<u8>) -> Self {
        self.files.insert(url.to_string(), bytes);
        self
    }
}

impl AssetFetcher for MemoryFetcher {
    async fn fetch_text(&self, url: &Url) -> Result<String, GalleryError> {
        Err(GalleryError::Status {
            url: url.to_string(),
            status: 404,
        })
    }

    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, GalleryError> {
        self.requested.borrow_mut().push(url.to_string());
        self.files
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| GalleryError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

#[derive(Default)]
struct RecordingTarget {
    frames: Vec<ParallaxUniforms>,
}

impl FrameTarget for RecordingTarget {
    fn draw(&mut self, uniforms: &ParallaxUniforms) -> Result<(), RenderError> {
        self.frames.push(*uniforms);
        Ok(())
    }
}

#[derive(Default)]
struct FakeMount {
    mounted: Vec<((u32, u32), (u32, u32))>,
}

impl PreviewMount for FakeMount {
    type Target = RecordingTarget;

    async fn mount(&mut self, color: &TextureImage, depth: &TextureImage) -> Result<RecordingTarget> {
        self.mounted.push((color.size(), depth.size()));
        Ok(RecordingTarget::default())
    }
}

fn request(scale_factor: f32, depth_factor: f32) -> PreviewRequest {
    PreviewRequest {
        urls: ArtworkUrls {
            color: Url::parse(COLOR_URL).unwrap(),
            depth: Url::parse(DEPTH_URL).unwrap(),
        },
        scale_factor,
        depth_factor,
    }
}

#[test]
fn missing_depth_map_never_mounts() {
    let fetcher = MemoryFetcher::default().with_file(COLOR_URL, encode_png(4, 2));
    let mut mount = FakeMount::default();

    let err = pollster::block_on(show_preview(&fetcher, &mut mount, &request(1.0, 0.05)))
        .err()
        .expect("depth fetch should fail");

    assert!(format!("{err:#}").contains(DEPTH_URL));
    assert!(mount.mounted.is_empty());
}

#[test]
fn undecodable_color_image_never_mounts() {
    let fetcher = MemoryFetcher::default()
        .with_file(COLOR_URL, b"<html>not found</html>".to_vec())
        .with_file(DEPTH_URL, encode_png(4, 2));
    let mut mount = FakeMount::default();

    let result = pollster::block_on(show_preview(&fetcher, &mut mount, &request(1.0, 0.05)));

    assert!(result.is_err());
    assert!(mount.mounted.is_empty());
}

#[test]
fn preview_draws_initial_frame_then_applies_factors() {
    let fetcher = MemoryFetcher::default()
        .with_file(COLOR_URL, encode_png(4, 2))
        .with_file(DEPTH_URL, encode_png(4, 2));
    let mut mount = FakeMount::default();

    let renderer = pollster::block_on(show_preview(&fetcher, &mut mount, &request(1.2, 0.07))).unwrap();

    assert_eq!(
        *fetcher.requested.borrow(),
        vec![COLOR_URL.to_string(), DEPTH_URL.to_string()]
    );
    assert_eq!(mount.mounted, vec![((4, 2), (4, 2))]);
    assert_eq!(renderer.draw_count(), 3);

    let frames = &renderer.target().frames;
    assert_eq!(frames[0].scale_factor, 0.03);
    assert_eq!(frames[0].depth_factor, 0.02);
    assert_eq!(frames[0].input_size, [4.0, 2.0, 0.0, 0.0]);
    assert_eq!(frames[0].aspect, 2.0);
    assert_eq!(renderer.uniforms().scale_factor, 1.2);
    assert_eq!(renderer.uniforms().depth_factor, 0.07);
    assert_eq!(renderer.uniforms().shift, [0.5, 0.0]);
}
