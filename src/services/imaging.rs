//! Image decoding, canvas fitting, mask extraction and PNG encoding.
//!
//! Everything here is synchronous and CPU-bound. Async callers should run it
//! through `spawn_blocking` when the images are large.

use base64::Engine;
use image::{imageops, imageops::FilterType, DynamicImage, ImageFormat, RgbaImage};
use paint_recolor::{Mask, PixelBuffer};
use sha2::{Digest, Sha256};
use std::io::Cursor;

use crate::error::{MaskError, SessionError};
use crate::models::{CanvasOptions, MaskOptions};

/// Decode an uploaded photo and fit it to the working canvas.
pub fn decode_to_canvas(bytes: &[u8], canvas: &CanvasOptions) -> Result<PixelBuffer, SessionError> {
    if bytes.is_empty() {
        return Err(SessionError::Decode("empty image".to_string()));
    }
    let img = image::load_from_memory(bytes).map_err(|e| SessionError::Decode(e.to_string()))?;
    let (width, height) = (img.width(), img.height());
    let img = fit_canvas(img, canvas);

    tracing::debug!(
        original_width = width,
        original_height = height,
        width = img.width(),
        height = img.height(),
        "Decoded upload"
    );

    rgba_to_buffer(img.to_rgba8()).map_err(SessionError::Decode)
}

/// Downscale so the image fits within the canvas limits, keeping aspect ratio.
/// Images already within both limits are returned unchanged.
pub fn fit_canvas(img: DynamicImage, canvas: &CanvasOptions) -> DynamicImage {
    let max_width = canvas.max_width.max(1);
    let max_height = canvas.max_height.max(1);
    if img.width() <= max_width && img.height() <= max_height {
        return img;
    }
    img.resize(max_width, max_height, FilterType::Triangle)
}

/// Turn a base64 PNG mask into paint weights aligned with a canvas.
///
/// The PNG is resized to exactly `width` x `height` and feathered with a
/// Gaussian blur before the configured channel is read out.
pub fn decode_mask(
    png_base64: &str,
    width: u32,
    height: u32,
    options: &MaskOptions,
) -> Result<Mask, MaskError> {
    let png_bytes = base64::engine::general_purpose::STANDARD
        .decode(strip_data_url(png_base64.trim()))
        .map_err(|e| MaskError::Decode(format!("invalid base64: {e}")))?;

    let img = image::load_from_memory_with_format(&png_bytes, ImageFormat::Png)
        .map_err(|e| MaskError::Decode(e.to_string()))?;

    let mut rgba = img.to_rgba8();
    if rgba.dimensions() != (width, height) {
        tracing::debug!(
            mask_width = rgba.width(),
            mask_height = rgba.height(),
            width,
            height,
            "Resizing mask to canvas"
        );
        rgba = imageops::resize(&rgba, width, height, FilterType::Triangle);
    }

    if options.feather_sigma > 0.0 && width > 0 && height > 0 {
        rgba = imageops::blur(&rgba, options.feather_sigma);
    }

    let pixels = rgba_to_buffer(rgba).map_err(MaskError::Decode)?;
    Ok(Mask::from_pixels(&pixels, options.channel.into()))
}

/// Accept `data:image/png;base64,...` as well as bare base64.
fn strip_data_url(s: &str) -> &str {
    match s.strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map_or(rest, |(_, data)| data),
        None => s,
    }
}

fn rgba_to_buffer(rgba: RgbaImage) -> Result<PixelBuffer, String> {
    let (width, height) = rgba.dimensions();
    PixelBuffer::from_raw(width, height, rgba.into_raw()).map_err(|e| e.to_string())
}

/// Encode an RGBA buffer as PNG.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, png::EncodingError> {
    encode_raw(
        buffer.width(),
        buffer.height(),
        png::ColorType::Rgba,
        buffer.as_raw(),
    )
}

/// Encode mask weights as an 8-bit greyscale PNG (white = painted).
pub fn encode_mask_png(mask: &Mask) -> Result<Vec<u8>, png::EncodingError> {
    encode_raw(
        mask.width(),
        mask.height(),
        png::ColorType::Grayscale,
        mask.as_raw(),
    )
}

fn encode_raw(
    width: u32,
    height: u32,
    color_type: png::ColorType,
    data: &[u8],
) -> Result<Vec<u8>, png::EncodingError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(data)?;
    }
    Ok(buf.into_inner())
}

/// Short content digest of an upload: first 16 bytes of SHA-256, hex encoded.
pub fn digest(bytes: &[u8]) -> String {
    let hash = Sha256::digest(bytes);
    hex::encode(&hash[..16])
}
