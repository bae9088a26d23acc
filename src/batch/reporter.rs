//! # 流水线事件报告
//!
//! 把流水线的控制台副作用抽象为 `Reporter`，核心逻辑因此可以脱离终端测试。
//!
//! ## 实现
//! - `ConsoleReporter`：彩色输出 + 进度条（终端）
//! - `RecordingReporter`：仅测试使用，记录事件文本
//!
//! ## 依赖关系
//! - 被 `pipeline/` 和 `commands/` 使用
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::batch::runner::BatchResult;
use crate::utils::{output, progress};

use indicatif::ProgressBar;
use std::path::Path;
use std::sync::Mutex;

/// 流水线事件
#[derive(Debug)]
pub enum PipelineEvent<'a> {
    /// 开始扫描输入目录
    Scanning { label: &'a str, dir: &'a Path },
    /// 扫描完成
    Discovered { count: usize },
    /// 没有匹配的文件，后续阶段跳过
    NothingFound { dir: &'a Path },
    /// 开始处理单个文件
    FileStarted { input: &'a Path },
    /// 输出写入成功
    OutputWritten { input: &'a Path, output: &'a Path },
    /// 单个输出或整个文件失败（不中止批处理）
    FileFailed { input: &'a Path, error: &'a str },
    /// 单个文件处理结束
    FileFinished { input: &'a Path },
    /// 清单写入成功
    ManifestWritten { path: &'a Path, entries: usize },
    /// 没有可写入清单的条目
    ManifestSkipped,
    /// 批处理结束
    Finished { label: &'a str, result: &'a BatchResult },
}

/// 事件接收者
pub trait Reporter: Sync {
    fn report(&self, event: PipelineEvent<'_>);
}

/// 终端输出
pub struct ConsoleReporter {
    /// 是否显示进度条
    show_progress: bool,
    bar: Mutex<Option<ProgressBar>>,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(console::Term::stdout().is_term())
    }
}

impl ConsoleReporter {
    pub fn new(show_progress: bool) -> Self {
        Self {
            show_progress,
            bar: Mutex::new(None),
        }
    }

    /// 打印时暂停进度条，避免输出错乱
    fn print(&self, f: impl FnOnce()) {
        match self.bar.lock() {
            Ok(guard) => match guard.as_ref() {
                Some(pb) => pb.suspend(f),
                None => f(),
            },
            Err(_) => f(),
        }
    }

    fn with_bar(&self, f: impl FnOnce(&mut Option<ProgressBar>)) {
        if let Ok(mut guard) = self.bar.lock() {
            f(&mut guard);
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

impl Reporter for ConsoleReporter {
    fn report(&self, event: PipelineEvent<'_>) {
        match event {
            PipelineEvent::Scanning { label, dir } => {
                output::print_header(&format!("Converting {}", label));
                output::print_info(&format!("Source directory: {}", dir.display()));
            }
            PipelineEvent::Discovered { count } => {
                output::print_info(&format!("Found {} file(s) to process", count));
                if self.show_progress && count > 0 {
                    self.with_bar(|bar| {
                        *bar = Some(progress::create_progress_bar(count as u64, "Processing"))
                    });
                }
            }
            PipelineEvent::NothingFound { dir } => {
                output::print_warning(&format!(
                    "No matching files under {}. Check the path and file extensions.",
                    dir.display()
                ));
            }
            PipelineEvent::FileStarted { input } => {
                if let Ok(guard) = self.bar.lock() {
                    if let Some(pb) = guard.as_ref() {
                        pb.set_message(file_name(input));
                    }
                }
            }
            PipelineEvent::OutputWritten { input, output: out } => {
                self.print(|| output::print_conversion(&file_name(input), &file_name(out)));
            }
            PipelineEvent::FileFailed { input, error } => {
                self.print(|| output::print_error(&format!("{}: {}", file_name(input), error)));
            }
            PipelineEvent::FileFinished { .. } => {
                if let Ok(guard) = self.bar.lock() {
                    if let Some(pb) = guard.as_ref() {
                        pb.inc(1);
                    }
                }
            }
            PipelineEvent::ManifestWritten { path, entries } => {
                output::print_success(&format!(
                    "Stylesheet with {} font-face rule(s) written to '{}'",
                    entries,
                    path.display()
                ));
            }
            PipelineEvent::ManifestSkipped => {
                output::print_skip("No converted fonts, stylesheet not generated");
            }
            PipelineEvent::Finished { label, result } => {
                self.with_bar(|bar| {
                    if let Some(pb) = bar.take() {
                        pb.finish_and_clear();
                    }
                });
                output::print_done(&format!(
                    "{}: {} converted, {} partial, {} failed ({} output file(s))",
                    label, result.success, result.partial, result.failed, result.outputs
                ));
            }
        }
    }
}

/// 记录事件的报告器（测试用）
#[cfg(test)]
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<String>>,
}

#[cfg(test)]
impl RecordingReporter {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn contains(&self, prefix: &str) -> bool {
        self.events().iter().any(|e| e.starts_with(prefix))
    }
}

#[cfg(test)]
impl Reporter for RecordingReporter {
    fn report(&self, event: PipelineEvent<'_>) {
        let line = match event {
            PipelineEvent::Scanning { label, .. } => format!("scanning {}", label),
            PipelineEvent::Discovered { count } => format!("discovered {}", count),
            PipelineEvent::NothingFound { .. } => "nothing-found".to_string(),
            PipelineEvent::FileStarted { input } => format!("started {}", file_name(input)),
            PipelineEvent::OutputWritten { output, .. } => format!("written {}", file_name(output)),
            PipelineEvent::FileFailed { input, error } => {
                format!("failed {}: {}", file_name(input), error)
            }
            PipelineEvent::FileFinished { input } => format!("finished {}", file_name(input)),
            PipelineEvent::ManifestWritten { entries, .. } => format!("manifest {}", entries),
            PipelineEvent::ManifestSkipped => "manifest-skipped".to_string(),
            PipelineEvent::Finished { result, .. } => format!(
                "done {}/{}/{}",
                result.success, result.partial, result.failed
            ),
        };
        self.events.lock().unwrap().push(line);
    }
}
