//! # 批量执行器
//!
//! 逐文件执行处理任务并汇总结果。
//!
//! ## 功能
//! - 默认顺序执行（`jobs = 1`）
//! - `jobs > 1` 时基于 rayon 线程池并行，结果仍按输入顺序返回
//! - 单文件结果分类与汇总统计
//!
//! ## 依赖关系
//! - 被 `pipeline/mod.rs` 调用
//! - 使用 `rayon` 进行并行处理

use crate::error::{AssetError, Result};

use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// 单个文件处理结果
#[derive(Debug, Clone)]
pub enum ProcessResult<M> {
    /// 全部输出写入成功
    Success {
        input: PathBuf,
        outputs: Vec<PathBuf>,
        meta: M,
    },
    /// 部分输出已写入，部分失败（不回滚已写入的兄弟输出）
    Partial {
        input: PathBuf,
        outputs: Vec<PathBuf>,
        errors: Vec<String>,
    },
    /// 处理失败
    Failed { input: PathBuf, error: String },
}

impl<M> ProcessResult<M> {
    /// 源文件路径
    pub fn input(&self) -> &Path {
        match self {
            ProcessResult::Success { input, .. }
            | ProcessResult::Partial { input, .. }
            | ProcessResult::Failed { input, .. } => input,
        }
    }

    /// 已写入的输出
    pub fn outputs(&self) -> &[PathBuf] {
        match self {
            ProcessResult::Success { outputs, .. } | ProcessResult::Partial { outputs, .. } => {
                outputs
            }
            ProcessResult::Failed { .. } => &[],
        }
    }

    /// 状态标签
    pub fn status(&self) -> &'static str {
        match self {
            ProcessResult::Success { .. } => "ok",
            ProcessResult::Partial { .. } => "partial",
            ProcessResult::Failed { .. } => "failed",
        }
    }

    /// 错误信息（成功时为空）
    pub fn error_message(&self) -> String {
        match self {
            ProcessResult::Success { .. } => String::new(),
            ProcessResult::Partial { errors, .. } => errors.join("; "),
            ProcessResult::Failed { error, .. } => error.clone(),
        }
    }

    /// 成功时的附加数据
    pub fn meta(&self) -> Option<&M> {
        match self {
            ProcessResult::Success { meta, .. } => Some(meta),
            _ => None,
        }
    }
}

/// 批量处理结果统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchResult {
    /// 成功数量
    pub success: usize,
    /// 部分成功数量
    pub partial: usize,
    /// 失败数量
    pub failed: usize,
    /// 输出文件总数
    pub outputs: usize,
    /// 失败详情 (文件路径, 错误信息)
    pub failures: Vec<(String, String)>,
}

impl BatchResult {
    /// 合并处理结果
    pub fn merge<M>(&mut self, result: &ProcessResult<M>) {
        self.outputs += result.outputs().len();
        match result {
            ProcessResult::Success { .. } => self.success += 1,
            ProcessResult::Partial { input, errors, .. } => {
                self.partial += 1;
                self.failures
                    .push((input.display().to_string(), errors.join("; ")));
            }
            ProcessResult::Failed { input, error } => {
                self.failed += 1;
                self.failures.push((input.display().to_string(), error.clone()));
            }
        }
    }

    /// 从结果列表汇总
    pub fn from_results<M>(results: &[ProcessResult<M>]) -> Self {
        let mut batch_result = BatchResult::default();
        for result in results {
            batch_result.merge(result);
        }
        batch_result
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success + self.partial + self.failed
    }
}

/// 批量执行器
#[derive(Debug, Clone, Copy)]
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self { jobs: 1 }
    }
}

impl BatchRunner {
    /// 创建新的批量执行器（0 = CPU 核数）
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 处理列表，结果顺序与输入顺序一致
    pub fn run<T, R, F>(&self, items: &[T], processor: F) -> Result<Vec<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        if self.jobs <= 1 || items.len() <= 1 {
            return Ok(items.iter().map(processor).collect());
        }

        // 配置 rayon 线程池
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| AssetError::Other(format!("Failed to start worker pool: {}", e)))?;

        Ok(pool.install(|| items.par_iter().map(&processor).collect()))
    }
}
