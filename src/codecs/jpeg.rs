//! # JPEG 重编码
//!
//! 解码后以固定质量重新编码为渐进式 JPEG（优化 Huffman 表）。
//!
//! ## 依赖关系
//! - 被 `pipeline/image.rs` 调用
//! - 使用 `image` 解码，`jpeg-encoder` 编码

use crate::error::{AssetError, Result};
use crate::models::config::JpegOptions;

use jpeg_encoder::{ColorType, Encoder};

/// 重编码 JPEG
pub fn optimize(input: &[u8], options: &JpegOptions) -> Result<Vec<u8>> {
    let img = image::load_from_memory_with_format(input, image::ImageFormat::Jpeg)
        .map_err(|e| AssetError::conversion("jpeg", "jpeg", e))?;
    let rgb = img.to_rgb8();

    let (width, height) = (
        u16::try_from(rgb.width()),
        u16::try_from(rgb.height()),
    );
    let (Ok(width), Ok(height)) = (width, height) else {
        return Err(AssetError::conversion(
            "jpeg",
            "jpeg",
            format!("image {}x{} exceeds 65535 pixels", rgb.width(), rgb.height()),
        ));
    };

    let mut out = Vec::new();
    let mut encoder = Encoder::new(&mut out, options.quality);
    encoder.set_progressive(options.progressive);
    encoder.set_optimized_huffman_tables(true);
    encoder
        .encode(rgb.as_raw(), width, height, ColorType::Rgb)
        .map_err(|e| AssetError::conversion("jpeg", "jpeg", e))?;

    Ok(out)
}
