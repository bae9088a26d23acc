//! # 批量转换流水线
//!
//! 字体与图片共用的流水线骨架：
//!
//! ```text
//! FileCollector ──> AssetTransform::transform (逐文件) ──> SinkWriter
//!                                                   └──> (字体) FontManifest
//! ```
//!
//! ## 错误语义
//! - 输入目录缺失或不可读：返回错误，一个文件都不处理
//! - 单文件失败：记录在 `ProcessResult` 中，继续处理下一个文件
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `batch/`, `codecs/`, `models/`
//! - 子模块: metadata, manifest, font, image

pub mod font;
pub mod image;
pub mod manifest;
pub mod metadata;

use crate::batch::{
    BatchResult, BatchRunner, FileCollector, PipelineEvent, ProcessResult, Reporter, SinkWriter,
};
use crate::error::Result;
use crate::models::SourceFile;

use std::path::PathBuf;

/// 单个源文件的转换
pub trait AssetTransform: Sync {
    /// 成功时携带的附加数据
    type Meta: Send;

    /// 用于日志的名称
    fn label(&self) -> &'static str;

    /// 扩展名白名单
    fn extensions(&self) -> &'static [&'static str];

    /// 转换并写出一个文件；失败只影响该文件
    fn transform(
        &self,
        source: &SourceFile,
        sink: &SinkWriter,
        reporter: &dyn Reporter,
    ) -> ProcessResult<Self::Meta>;
}

/// 一次流水线运行的结果
#[derive(Debug)]
pub struct PipelineRun<M> {
    /// 按枚举顺序排列
    pub results: Vec<ProcessResult<M>>,
    pub summary: BatchResult,
}

impl<M> PipelineRun<M> {
    fn empty() -> Self {
        PipelineRun {
            results: Vec::new(),
            summary: BatchResult::default(),
        }
    }
}

/// 批量转换流水线
pub struct Pipeline<'r, T: AssetTransform> {
    transform: T,
    source_dir: PathBuf,
    sink: SinkWriter,
    runner: BatchRunner,
    reporter: &'r dyn Reporter,
}

impl<'r, T: AssetTransform> Pipeline<'r, T> {
    pub fn new(
        transform: T,
        source_dir: impl Into<PathBuf>,
        target_dir: impl Into<PathBuf>,
        reporter: &'r dyn Reporter,
    ) -> Self {
        Pipeline {
            transform,
            source_dir: source_dir.into(),
            sink: SinkWriter::new(target_dir),
            runner: BatchRunner::default(),
            reporter,
        }
    }

    /// 设置执行器（并行度）
    pub fn with_runner(mut self, runner: BatchRunner) -> Self {
        self.runner = runner;
        self
    }

    /// 执行：枚举 -> 逐文件转换 -> 汇总
    pub fn run(&self) -> Result<PipelineRun<T::Meta>> {
        self.reporter.report(PipelineEvent::Scanning {
            label: self.transform.label(),
            dir: &self.source_dir,
        });

        let files = FileCollector::new(&self.source_dir)
            .with_extensions(self.transform.extensions())
            .collect()?;

        self.reporter
            .report(PipelineEvent::Discovered { count: files.len() });

        if files.is_empty() {
            self.reporter.report(PipelineEvent::NothingFound {
                dir: &self.source_dir,
            });
            return Ok(PipelineRun::empty());
        }

        self.sink.ensure_dir()?;

        let results = self.runner.run(&files, |source| {
            self.reporter
                .report(PipelineEvent::FileStarted { input: &source.path });
            let result = self.transform.transform(source, &self.sink, self.reporter);
            self.reporter
                .report(PipelineEvent::FileFinished { input: &source.path });
            result
        })?;

        let summary = BatchResult::from_results(&results);
        self.reporter.report(PipelineEvent::Finished {
            label: self.transform.label(),
            result: &summary,
        });

        Ok(PipelineRun { results, summary })
    }
}

/// 写出一个输出并报告；失败时返回单行错误信息
pub(crate) fn write_output(
    sink: &SinkWriter,
    source: &SourceFile,
    file_name: &str,
    bytes: &[u8],
    reporter: &dyn Reporter,
) -> std::result::Result<PathBuf, String> {
    match sink.write(file_name, bytes) {
        Ok(path) => {
            reporter.report(PipelineEvent::OutputWritten {
                input: &source.path,
                output: &path,
            });
            Ok(path)
        }
        Err(e) => {
            let msg = e.one_line();
            reporter.report(PipelineEvent::FileFailed {
                input: &source.path,
                error: &msg,
            });
            Err(msg)
        }
    }
}

/// 读取源文件；失败时报告并返回 `Failed`
pub(crate) fn read_source<M>(
    source: &SourceFile,
    reporter: &dyn Reporter,
) -> std::result::Result<Vec<u8>, ProcessResult<M>> {
    std::fs::read(&source.path).map_err(|e| {
        let err = crate::error::AssetError::FileReadError {
            path: source.path.display().to_string(),
            source: e,
        };
        fail(source, &err, reporter)
    })
}

/// 报告并构造单文件失败结果
pub(crate) fn fail<M>(
    source: &SourceFile,
    error: &crate::error::AssetError,
    reporter: &dyn Reporter,
) -> ProcessResult<M> {
    let msg = error.one_line();
    reporter.report(PipelineEvent::FileFailed {
        input: &source.path,
        error: &msg,
    });
    ProcessResult::Failed {
        input: source.path.clone(),
        error: msg,
    }
}
