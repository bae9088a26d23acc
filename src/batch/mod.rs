//! # 批量处理模块
//!
//! 流水线共用的枚举、执行、写入和报告组件。
//!
//! ## 功能
//! - 按扩展名收集输入文件
//! - 逐文件执行（可选并行），失败互不影响
//! - 输出写入
//! - 事件报告
//!
//! ## 依赖关系
//! - 被 `pipeline/` 和 `commands/` 使用
//! - 使用 `walkdir`、`rayon`、`indicatif`

pub mod collector;
pub mod reporter;
pub mod runner;
pub mod sink;

pub use collector::FileCollector;
pub use reporter::{ConsoleReporter, PipelineEvent, Reporter};
pub use runner::{BatchResult, BatchRunner, ProcessResult};
pub use sink::SinkWriter;
