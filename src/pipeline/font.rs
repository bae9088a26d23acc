//! # 字体流水线
//!
//! TTF -> WOFF + WOFF2，之后生成 `@font-face` 样式表。
//!
//! ## 流程
//! 1. 文件名 -> `FontDescriptor`
//! 2. 读取 TTF，分别编码 WOFF 与 WOFF2（两个独立编码器，输入都是原始 TTF）
//! 3. 两个缓冲区都成功后写出
//! 4. 批处理结束后，用成功的文件生成清单；没有成功文件时不写清单
//!
//! ## 依赖关系
//! - 被 `commands/fonts.rs` 调用
//! - 使用 `codecs/woff.rs`, `codecs/woff2.rs`
//! - 使用 `pipeline/metadata.rs`, `pipeline/manifest.rs`

use super::manifest::{FontManifest, ManifestStyle};
use super::metadata::extract_font_descriptor;
use super::{fail, read_source, write_output, AssetTransform, Pipeline, PipelineRun};
use crate::batch::{BatchRunner, PipelineEvent, ProcessResult, Reporter, SinkWriter};
use crate::codecs::{woff, woff2};
use crate::error::Result;
use crate::models::{FontConfig, FontEntry, SourceFile};

/// 字体扩展名白名单
pub const FONT_EXTENSIONS: &[&str] = &["ttf"];

/// TTF -> WOFF/WOFF2 转换
#[derive(Debug, Default, Clone, Copy)]
pub struct FontTransform;

impl AssetTransform for FontTransform {
    type Meta = FontEntry;

    fn label(&self) -> &'static str {
        "fonts"
    }

    fn extensions(&self) -> &'static [&'static str] {
        FONT_EXTENSIONS
    }

    fn transform(
        &self,
        source: &SourceFile,
        sink: &SinkWriter,
        reporter: &dyn Reporter,
    ) -> ProcessResult<FontEntry> {
        let descriptor = extract_font_descriptor(&source.file_name);

        let ttf = match read_source(source, reporter) {
            Ok(bytes) => bytes,
            Err(failed) => return failed,
        };

        let encoded = woff::encode(&ttf).and_then(|w1| woff2::encode(&ttf).map(|w2| (w1, w2)));
        let (woff_bytes, woff2_bytes) = match encoded {
            Ok(buffers) => buffers,
            Err(e) => return fail(source, &e, reporter),
        };

        let mut outputs = Vec::with_capacity(2);
        let mut errors = Vec::new();
        for (ext, bytes) in [("woff", &woff_bytes), ("woff2", &woff2_bytes)] {
            match write_output(sink, source, &source.with_extension(ext), bytes, reporter) {
                Ok(path) => outputs.push(path),
                Err(msg) => errors.push(msg),
            }
        }

        if !errors.is_empty() {
            return if outputs.is_empty() {
                ProcessResult::Failed {
                    input: source.path.clone(),
                    error: errors.join("; "),
                }
            } else {
                ProcessResult::Partial {
                    input: source.path.clone(),
                    outputs,
                    errors,
                }
            };
        }

        ProcessResult::Success {
            input: source.path.clone(),
            outputs,
            meta: FontEntry {
                descriptor,
                basename: source.stem.clone(),
            },
        }
    }
}

/// 字体流水线运行结果
#[derive(Debug)]
pub struct FontRun {
    pub run: PipelineRun<FontEntry>,
    /// 清单（只含成功的文件）
    pub manifest: FontManifest,
    /// 是否写出了样式表
    pub manifest_written: bool,
}

/// 运行字体流水线并生成样式表
pub fn run_fonts(config: &FontConfig, runner: BatchRunner, reporter: &dyn Reporter) -> Result<FontRun> {
    let run = Pipeline::new(FontTransform, &config.source_dir, &config.target_dir, reporter)
        .with_runner(runner)
        .run()?;

    let manifest = FontManifest::from_entries(
        run.results
            .iter()
            .filter_map(|result| result.meta())
            .cloned(),
    );

    let manifest_written = if manifest.is_empty() {
        reporter.report(PipelineEvent::ManifestSkipped);
        false
    } else {
        manifest.write(&config.manifest_path, &ManifestStyle::from(config))?;
        reporter.report(PipelineEvent::ManifestWritten {
            path: &config.manifest_path,
            entries: manifest.len(),
        });
        true
    };

    Ok(FontRun {
        run,
        manifest,
        manifest_written,
    })
}
