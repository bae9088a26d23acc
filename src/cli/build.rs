//! # build 子命令 CLI 定义
//!
//! 依次运行字体与图片流水线，目录取自配置文件或默认值
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/build.rs`

use clap::Args;

/// build 子命令参数
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 1)]
    pub jobs: usize,

    /// Write a source image's outputs only if every conversion succeeded
    #[arg(long, default_value_t = false)]
    pub atomic: bool,
}
