//! # WebP 编码
//!
//! 把 JPEG/PNG 源图编码为有损 WebP，透明图保留 alpha。
//!
//! ## 依赖关系
//! - 被 `pipeline/image.rs` 调用
//! - 使用 `image` 解码，`webp` (libwebp) 编码

use crate::error::{AssetError, Result};
use crate::models::config::WebpOptions;

/// WebP 单边像素上限
const MAX_DIMENSION: u32 = 16_383;

/// 编码为 WebP
pub fn encode(input: &[u8], options: &WebpOptions) -> Result<Vec<u8>> {
    let img = image::load_from_memory(input).map_err(|e| AssetError::conversion("image", "webp", e))?;
    let (width, height) = (img.width(), img.height());
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(AssetError::conversion(
            "image",
            "webp",
            format!("{}x{} exceeds the {} pixel limit", width, height, MAX_DIMENSION),
        ));
    }

    let quality = options.quality as f32;
    let memory = if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        webp::Encoder::from_rgba(rgba.as_raw(), width, height).encode_simple(false, quality)
    } else {
        let rgb = img.to_rgb8();
        webp::Encoder::from_rgb(rgb.as_raw(), width, height).encode_simple(false, quality)
    }
    .map_err(|e| AssetError::conversion("image", "webp", format!("{:?}", e)))?;

    Ok(memory.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codecs::testing::{sample_jpeg, sample_png};

    fn assert_webp(data: &[u8]) {
        assert_eq!(&data[0..4], b"RIFF");
        assert_eq!(&data[8..12], b"WEBP");
    }

    #[test]
    fn test_encode_from_png_and_jpeg() {
        assert_webp(&encode(&sample_png(20, 10), &WebpOptions::default()).unwrap());
        assert_webp(&encode(&sample_jpeg(20, 10), &WebpOptions::default()).unwrap());
    }

    #[test]
    fn test_rejects_oversized_image() {
        let err = encode(&sample_png(16_400, 1), &WebpOptions::default()).unwrap_err();
        assert!(err.to_string().contains("16400x1"));
    }

    #[test]
    fn test_rejects_undecodable_input() {
        let err = encode(b"<svg/>", &WebpOptions::default()).unwrap_err();
        assert!(matches!(err, AssetError::ConversionError { .. }));
    }
}
