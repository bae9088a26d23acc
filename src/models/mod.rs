//! # 数据模型模块
//!
//! 定义源文件、字体描述和流水线配置。
//!
//! ## 依赖关系
//! - 被 `batch/`、`pipeline/` 和 `commands/` 使用
//! - 子模块: source, font, config

pub mod config;
pub mod font;
pub mod source;

pub use config::{AppConfig, FontConfig, ImageConfig};
pub use font::{FontDescriptor, FontEntry, FontStyle};
pub use source::SourceFile;
