//! # assetkit - 静态站点资源批量转换工具
//!
//! 把项目里的源字体和源图片批量转换成适合网页发布的格式。
//!
//! ## 子命令
//! - `fonts`  - TTF -> WOFF/WOFF2，并生成 `@font-face` 样式表
//! - `images` - JPEG/PNG/SVG 压缩，JPEG/PNG 额外输出 WebP，GIF 原样复制
//! - `build`  - 依次执行 fonts 与 images
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── pipeline/ (流水线、文件名解析、样式表)
//!   │     ├── batch/    (文件枚举、执行器、写出、进度报告)
//!   │     ├── codecs/   (WOFF/WOFF2/JPEG/PNG/WebP/SVG 编码)
//!   │     └── models/   (数据模型与配置)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod codecs;
mod commands;
mod error;
mod models;
mod pipeline;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli) {
        utils::output::print_error(&e.one_line());
        std::process::exit(1);
    }
}
