//! # fonts 子命令 CLI 定义
//!
//! TTF -> WOFF/WOFF2，生成 `@font-face` 样式表
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/fonts.rs`

use clap::Args;
use std::path::PathBuf;

/// fonts 子命令参数
#[derive(Args, Debug, Default)]
pub struct FontsArgs {
    /// Directory containing the .ttf files to convert
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output directory for .woff/.woff2 files
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path of the generated SCSS stylesheet
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,

    /// URL prefix used in the stylesheet
    #[arg(long)]
    pub url_prefix: Option<String>,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 1)]
    pub jobs: usize,

    /// Write a per-file CSV report
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Only print the detected font descriptors, convert nothing
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}
