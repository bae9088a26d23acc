//! # PNG 调色板量化
//!
//! 按质量窗口把 RGBA 图像量化为 8 位调色板 PNG。
//! 达不到最低质量时原样返回输入（颜色丰富的照片不降质）。
//!
//! ## 依赖关系
//! - 被 `pipeline/image.rs` 调用
//! - 使用 `image` 解码，`imagequant` 量化，`png` 编码

use crate::error::{AssetError, Result};
use crate::models::config::PngOptions;

/// 量化 PNG
pub fn optimize(input: &[u8], options: &PngOptions) -> Result<Vec<u8>> {
    let img = image::load_from_memory_with_format(input, image::ImageFormat::Png)
        .map_err(|e| fail(e))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let pixels: Vec<imagequant::RGBA> = rgba
        .pixels()
        .map(|p| imagequant::RGBA::new(p[0], p[1], p[2], p[3]))
        .collect();

    let (min_quality, max_quality) = options.quality_percent();
    let mut liq = imagequant::new();
    liq.set_speed(options.speed as i32).map_err(fail)?;
    liq.set_quality(min_quality, max_quality).map_err(fail)?;

    let mut image = liq
        .new_image(pixels, width as usize, height as usize, 0.0)
        .map_err(fail)?;
    let mut quantized = match liq.quantize(&mut image) {
        Ok(quantized) => quantized,
        Err(imagequant::Error::QualityTooLow) => return Ok(input.to_vec()),
        Err(e) => return Err(fail(e)),
    };
    quantized.set_dithering_level(1.0).map_err(fail)?;
    let (palette, indices) = quantized.remapped(&mut image).map_err(fail)?;

    let mut rgb_palette = Vec::with_capacity(palette.len() * 3);
    let mut alphas = Vec::with_capacity(palette.len());
    for color in &palette {
        rgb_palette.extend_from_slice(&[color.r, color.g, color.b]);
        alphas.push(color.a);
    }

    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Best);
        encoder.set_palette(rgb_palette);
        if alphas.iter().any(|&a| a != u8::MAX) {
            encoder.set_trns(alphas);
        }

        let mut writer = encoder.write_header().map_err(fail)?;
        writer.write_image_data(&indices).map_err(fail)?;
        writer.finish().map_err(fail)?;
    }

    Ok(out)
}

fn fail(e: impl std::fmt::Display) -> AssetError {
    AssetError::conversion("png", "png", e)
}
