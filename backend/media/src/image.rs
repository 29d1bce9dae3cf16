//! Image preparation: decode, flatten to RGB, downsample, and re-encode as
//! base64 JPEG for inline transport.

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, RgbImage};
use tracing::debug;

use persocr_core::{ImagePrepareError, PreparedPayload, JPEG_QUALITY, MAX_IMAGE_SIDE};

/// Dimensions that fit inside a `max` x `max` box with the aspect ratio kept.
///
/// Never upsamples. The longer side becomes exactly `max`; the shorter side is
/// rounded to the nearest pixel and is at least 1.
pub fn fit_within(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width <= max && height <= max {
        return (width, height);
    }
    let scale = |short: u32, long: u32| -> u32 {
        let scaled = (u64::from(short) * u64::from(max) + u64::from(long) / 2) / u64::from(long);
        (scaled as u32).max(1)
    };
    if width >= height {
        (max, scale(height, width))
    } else {
        (scale(width, height), max)
    }
}

/// Read an image file and turn it into a [`PreparedPayload`].
pub fn prepare_image(path: &Path) -> Result<PreparedPayload, ImagePrepareError> {
    let bytes = std::fs::read(path).map_err(|source| ImagePrepareError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let decoded = decode(path, &bytes)?;
    let (original_width, original_height) = (decoded.width(), decoded.height());

    let rgb = decoded.to_rgb8();
    let (width, height) = fit_within(original_width, original_height, MAX_IMAGE_SIDE);
    let rgb: RgbImage = if (width, height) == (original_width, original_height) {
        rgb
    } else {
        image::imageops::resize(&rgb, width, height, FilterType::CatmullRom)
    };

    let mut jpeg = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY))
        .map_err(|e| ImagePrepareError::Encode(e.to_string()))?;

    debug!(
        file = %path.display(),
        original_width,
        original_height,
        width,
        height,
        jpeg_bytes = jpeg.len(),
        "Prepared image payload"
    );

    Ok(PreparedPayload {
        original_width,
        original_height,
        width,
        height,
        base64: STANDARD.encode(&jpeg),
    })
}

/// Sniff the format from content first, then fall back to the extension.
fn decode(path: &Path, bytes: &[u8]) -> Result<DynamicImage, ImagePrepareError> {
    let decode_error = |message: String| ImagePrepareError::Decode {
        path: path.to_path_buf(),
        message,
    };

    match image::load_from_memory(bytes) {
        Ok(img) => Ok(img),
        Err(sniff_err) => match ImageFormat::from_path(path) {
            Ok(format) => image::load_from_memory_with_format(bytes, format)
                .map_err(|e| decode_error(e.to_string())),
            Err(_) => Err(decode_error(sniff_err.to_string())),
        },
    }
}
