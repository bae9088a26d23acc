//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `models/`, `pipeline/`, `utils/`
//! - 子模块: fonts, images, build

pub mod build;
pub mod fonts;
pub mod images;

use crate::cli::{Cli, Commands};
use crate::error::Result;
use crate::models::AppConfig;

/// 执行命令
pub fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Fonts(args) => fonts::execute(args, config.fonts),
        Commands::Images(args) => images::execute(args, config.images),
        Commands::Build(args) => build::execute(args, config),
    }
}
