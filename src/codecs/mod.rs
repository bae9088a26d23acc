//! # 编解码模块
//!
//! 单个缓冲区到单个缓冲区的格式转换，不接触文件系统。
//!
//! ## 依赖关系
//! - 被 `pipeline/` 使用
//! - 子模块: sfnt, woff, woff2（字体）；jpeg, png, webp, svg（图片）

pub mod jpeg;
pub mod png;
pub mod sfnt;
pub mod svg;
pub mod webp;
pub mod woff;
pub mod woff2;

/// 测试用样例图片
#[cfg(test)]
pub mod testing {
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), format).unwrap();
        buf
    }

    /// 渐变 JPEG
    pub fn sample_jpeg(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 7) as u8, (y * 11) as u8, ((x + y) * 3) as u8])
        });
        encode(DynamicImage::ImageRgb8(img), ImageFormat::Jpeg)
    }

    /// 带透明度的渐变 PNG
    pub fn sample_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 8) as u8, (y * 8) as u8, 128, if x < width / 2 { 255 } else { 96 }])
        });
        encode(DynamicImage::ImageRgba8(img), ImageFormat::Png)
    }

    /// 颜色远多于 256 种的 RGB 噪声 PNG（像照片一样无法无损量化）
    pub fn noise_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            let mut v = x.wrapping_mul(0x9E37_79B9) ^ y.wrapping_mul(0x85EB_CA6B);
            v ^= v >> 16;
            v = v.wrapping_mul(0x7FEB_352D);
            v ^= v >> 15;
            v = v.wrapping_mul(0x846C_A68B);
            v ^= v >> 16;
            Rgb([v as u8, (v >> 8) as u8, (v >> 16) as u8])
        });
        encode(DynamicImage::ImageRgb8(img), ImageFormat::Png)
    }
}
