//! # images 子命令 CLI 定义
//!
//! JPEG/PNG/SVG 压缩，JPEG/PNG 额外输出 WebP，GIF 原样复制
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/images.rs`

use clap::Args;
use std::path::PathBuf;

/// images 子命令参数
#[derive(Args, Debug, Default)]
pub struct ImagesArgs {
    /// Directory containing the images to process
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output directory for optimized images
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JPEG quality (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub jpeg_quality: Option<u8>,

    /// WebP quality (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub webp_quality: Option<u8>,

    /// Write a source file's outputs only if every conversion succeeded
    #[arg(long, default_value_t = false)]
    pub atomic: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 1)]
    pub jobs: usize,

    /// Write a per-file CSV report
    #[arg(long)]
    pub report: Option<PathBuf>,
}
