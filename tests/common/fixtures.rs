//! Test fixtures: in-memory images, masks and configs.

use base64::Engine;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

use wallpaint::models::{AppConfig, MaskChannelSetting, MaskOptions};

/// Mid grey used by the gray-to-red scenario
pub const GREY_100: [u8; 4] = [100, 100, 100, 255];

/// Encode an RGBA image as PNG bytes
pub fn encode_png(img: RgbaImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut buf, ImageFormat::Png)
        .expect("Failed to encode test PNG");
    buf.into_inner()
}

/// Solid-color photo as PNG bytes
pub fn solid_photo(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    encode_png(RgbaImage::from_pixel(width, height, Rgba(rgba)))
}

/// Base64 PNG mask with the same alpha everywhere
pub fn uniform_mask_b64(width: u32, height: u32, alpha: u8) -> String {
    b64(&encode_png(RgbaImage::from_pixel(
        width,
        height,
        Rgba([255, 255, 255, alpha]),
    )))
}

/// Base64 PNG mask: left half transparent, right half opaque
pub fn half_mask_b64(width: u32, height: u32) -> String {
    let img = ImageBuffer::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgba([0, 0, 0, 0])
        } else {
            Rgba([0, 0, 0, 255])
        }
    });
    b64(&encode_png(img))
}

pub fn b64(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// Config pointing at a mock endpoint, feathering off for exact pixel checks
pub fn config_for(endpoint: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.segmentation.endpoint = endpoint.to_string();
    config.segmentation.timeout_secs = 5;
    config.mask = MaskOptions {
        feather_sigma: 0.0,
        channel: MaskChannelSetting::Alpha,
    };
    config
}

/// Decode PNG response bytes into RGBA
pub fn decode_png(bytes: &[u8]) -> RgbaImage {
    image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .expect("Failed to decode PNG")
        .to_rgba8()
}
