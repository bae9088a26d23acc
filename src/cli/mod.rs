//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `fonts`: TTF -> WOFF/WOFF2 + SCSS 样式表
//! - `images`: 图片压缩与 WebP 转换
//! - `build`: 依次执行 fonts 与 images
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: fonts, images, build

pub mod build;
pub mod fonts;
pub mod images;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// assetkit - 静态站点资源批量转换工具
#[derive(Parser)]
#[command(name = "assetkit")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Batch font and image conversion for static web projects", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// TOML configuration file (defaults apply when omitted)
    #[arg(short, long, global = true, env = "ASSETKIT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Convert TTF fonts to WOFF/WOFF2 and generate the @font-face stylesheet
    Fonts(fonts::FontsArgs),

    /// Optimize JPEG/PNG/SVG/GIF images and emit WebP siblings
    Images(images::ImagesArgs),

    /// Run the font and image pipelines one after another
    Build(build::BuildArgs),
}
