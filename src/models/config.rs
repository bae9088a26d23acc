//! # 配置模型
//!
//! 流水线的全部可调参数：目录、编解码质量、清单格式。
//!
//! ## 配置层级
//! 1. 内置默认值（与项目目录结构 `scr/assets/...` 一致）
//! 2. 可选 TOML 配置文件（`--config`）
//! 3. 命令行参数覆盖（见 `commands/`）
//!
//! ## 依赖关系
//! - 被 `commands/` 加载与覆盖
//! - 被 `pipeline/` 和 `codecs/` 读取
//! - 使用 `serde` + `toml`

use crate::error::{AssetError, Result};

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// 全局配置
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub fonts: FontConfig,
    pub images: ImageConfig,
}

impl AppConfig {
    /// 加载配置；未指定文件时使用默认值
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => AppConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文件读取
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| AssetError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml(&text).map_err(|reason| AssetError::ConfigError {
            path: path.display().to_string(),
            reason,
        })
    }

    fn from_toml(text: &str) -> std::result::Result<Self, String> {
        toml::from_str(text).map_err(|e| e.to_string())
    }

    /// 校验数值范围
    pub fn validate(&self) -> Result<()> {
        self.images.validate()
    }
}

// ─────────────────────────────────────────────────────────────
// 字体
// ─────────────────────────────────────────────────────────────

/// 字体流水线配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontConfig {
    /// 待转换 TTF 所在目录
    pub source_dir: PathBuf,
    /// WOFF/WOFF2 输出目录
    pub target_dir: PathBuf,
    /// 生成的 SCSS 清单路径
    pub manifest_path: PathBuf,
    /// 样式表中引用字体的 URL 前缀
    pub url_prefix: String,
    /// 字体族变量中的通用回退字体
    pub fallback: String,
    /// `font-display` 取值
    pub font_display: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        FontConfig {
            source_dir: PathBuf::from("scr/assets/fonts/fonts_to_convert"),
            target_dir: PathBuf::from("scr/assets/fonts"),
            manifest_path: PathBuf::from("scr/scss/fonts.scss"),
            url_prefix: "/assets/fonts".to_string(),
            fallback: "sans-serif".to_string(),
            font_display: "swap".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────
// 图片
// ─────────────────────────────────────────────────────────────

/// 图片流水线配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageConfig {
    /// 待处理图片目录
    pub source_dir: PathBuf,
    /// 输出目录
    pub target_dir: PathBuf,
    /// 同一源文件的所有变体全部编码成功后才写入
    pub atomic: bool,
    pub jpeg: JpegOptions,
    pub png: PngOptions,
    pub webp: WebpOptions,
    pub svg: SvgOptions,
}

impl Default for ImageConfig {
    fn default() -> Self {
        ImageConfig {
            source_dir: PathBuf::from("scr/assets/img/img_to_convert"),
            target_dir: PathBuf::from("scr/assets/img"),
            atomic: false,
            jpeg: JpegOptions::default(),
            png: PngOptions::default(),
            webp: WebpOptions::default(),
            svg: SvgOptions::default(),
        }
    }
}

impl ImageConfig {
    fn validate(&self) -> Result<()> {
        check_quality("images.jpeg.quality", self.jpeg.quality)?;
        check_quality("images.webp.quality", self.webp.quality)?;

        let [min, max] = self.png.quality;
        if !(0.0..=1.0).contains(&min) || !(0.0..=1.0).contains(&max) || min > max {
            return Err(AssetError::InvalidArgument(format!(
                "images.png.quality must be a range within 0.0..=1.0, got [{}, {}]",
                min, max
            )));
        }
        if !(1..=10).contains(&self.png.speed) {
            return Err(AssetError::InvalidArgument(format!(
                "images.png.speed must be between 1 and 10, got {}",
                self.png.speed
            )));
        }
        Ok(())
    }
}

fn check_quality(name: &str, quality: u8) -> Result<()> {
    if quality > 100 {
        return Err(AssetError::InvalidArgument(format!(
            "{} must be between 0 and 100, got {}",
            name, quality
        )));
    }
    Ok(())
}

/// JPEG 重编码参数
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JpegOptions {
    pub quality: u8,
    pub progressive: bool,
}

impl Default for JpegOptions {
    fn default() -> Self {
        JpegOptions {
            quality: 80,
            progressive: true,
        }
    }
}

/// PNG 调色板量化参数
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PngOptions {
    /// 质量窗口 [min, max]，取值 0.0..=1.0
    pub quality: [f32; 2],
    /// 1 最慢（质量最好）~ 10 最快
    pub speed: u8,
}

impl Default for PngOptions {
    fn default() -> Self {
        PngOptions {
            quality: [0.6, 0.8],
            speed: 1,
        }
    }
}

impl PngOptions {
    /// 转换为 0..=100 的整数质量窗口
    pub fn quality_percent(&self) -> (u8, u8) {
        let to_percent = |q: f32| (q * 100.0).round().clamp(0.0, 100.0) as u8;
        (to_percent(self.quality[0]), to_percent(self.quality[1]))
    }
}

/// WebP 有损编码参数
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WebpOptions {
    pub quality: u8,
}

impl Default for WebpOptions {
    fn default() -> Self {
        WebpOptions { quality: 80 }
    }
}

/// SVG 结构优化参数
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SvgOptions {
    /// 清理未引用的 id，并把被引用的 id 缩短
    pub cleanup_ids: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        SvgOptions { cleanup_ids: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.fonts.url_prefix, "/assets/fonts");
        assert_eq!(config.images.jpeg.quality, 80);
        assert!(config.images.jpeg.progressive);
        assert_eq!(config.images.webp.quality, 80);
        assert_eq!(config.images.png.quality_percent(), (60, 80));
        assert_eq!(config.images.png.speed, 1);
        assert!(!config.images.atomic);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
[fonts]
source_dir = "raw/fonts"

[images.webp]
quality = 65
"#,
        )
        .unwrap();
        assert_eq!(config.fonts.source_dir, PathBuf::from("raw/fonts"));
        assert_eq!(config.fonts.target_dir, PathBuf::from("scr/assets/fonts"));
        assert_eq!(config.images.webp.quality, 65);
        assert_eq!(config.images.jpeg.quality, 80);
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(AppConfig::from_toml("[fonts]\nsorce_dir = \"x\"\n").is_err());
    }

    #[test]
    fn test_invalid_ranges() {
        let mut config = AppConfig::default();
        config.images.png.quality = [0.9, 0.5];
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.images.webp.quality = 101;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.images.png.speed = 0;
        assert!(config.validate().is_err());
    }
}
