//! # 图片流水线
//!
//! 按扩展名分派：
//!
//! | 类型 | 输出 | 转换 |
//! |---|---|---|
//! | JPEG | 同名 JPEG + `.webp` | 渐进式重编码；WebP |
//! | PNG  | 同名 PNG + `.webp`  | 调色板量化；WebP |
//! | SVG  | 同名 SVG            | 结构优化 |
//! | GIF  | 同名 GIF            | 原样复制 |
//!
//! 每个输出都是独立的失败单元：WebP 失败不影响（也不回滚）已写出的 JPEG。
//! `atomic` 模式下先全部编码，全部成功才写出。
//!
//! ## 依赖关系
//! - 被 `commands/images.rs` 调用
//! - 使用 `codecs/jpeg.rs`, `codecs/png.rs`, `codecs/webp.rs`, `codecs/svg.rs`

use super::{fail, read_source, write_output, AssetTransform, Pipeline, PipelineRun};
use crate::batch::{BatchRunner, PipelineEvent, ProcessResult, Reporter, SinkWriter};
use crate::codecs::{jpeg, png, svg, webp};
use crate::error::{AssetError, Result};
use crate::models::{ImageConfig, SourceFile};

/// 图片扩展名白名单
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "svg"];

/// 图片类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Svg,
    Gif,
}

/// 单个输出变体
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// 渐进式重编码 JPEG
    OptimizedJpeg,
    /// 调色板量化 PNG
    QuantizedPng,
    /// 结构优化 SVG
    OptimizedSvg,
    /// 有损 WebP
    WebP,
    /// 原样复制
    Passthrough,
}

impl ImageKind {
    /// 根据扩展名识别（大小写不敏感）
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageKind::Jpeg),
            "png" => Some(ImageKind::Png),
            "svg" => Some(ImageKind::Svg),
            "gif" => Some(ImageKind::Gif),
            _ => None,
        }
    }

    /// 该类型产出的变体（写出顺序）
    pub fn variants(&self) -> &'static [Variant] {
        match self {
            ImageKind::Jpeg => &[Variant::OptimizedJpeg, Variant::WebP],
            ImageKind::Png => &[Variant::QuantizedPng, Variant::WebP],
            ImageKind::Svg => &[Variant::OptimizedSvg],
            ImageKind::Gif => &[Variant::Passthrough],
        }
    }
}

impl Variant {
    /// 输出文件名
    pub fn output_name(&self, source: &SourceFile) -> String {
        match self {
            Variant::WebP => source.with_extension("webp"),
            _ => source.file_name.clone(),
        }
    }

    /// 编码
    pub fn encode(&self, input: &[u8], config: &ImageConfig) -> Result<Vec<u8>> {
        match self {
            Variant::OptimizedJpeg => jpeg::optimize(input, &config.jpeg),
            Variant::QuantizedPng => png::optimize(input, &config.png),
            Variant::OptimizedSvg => svg::optimize(input, &config.svg),
            Variant::WebP => webp::encode(input, &config.webp),
            Variant::Passthrough => Ok(input.to_vec()),
        }
    }
}

/// 图片转换
#[derive(Debug, Clone)]
pub struct ImageTransform {
    config: ImageConfig,
}

impl ImageTransform {
    pub fn new(config: ImageConfig) -> Self {
        Self { config }
    }

    /// 逐个编码、逐个写出
    fn best_effort(
        &self,
        source: &SourceFile,
        input: &[u8],
        variants: &[Variant],
        sink: &SinkWriter,
        reporter: &dyn Reporter,
    ) -> (Vec<std::path::PathBuf>, Vec<String>) {
        let mut outputs = Vec::new();
        let mut errors = Vec::new();

        for variant in variants {
            let name = variant.output_name(source);
            match variant.encode(input, &self.config) {
                Ok(bytes) => match write_output(sink, source, &name, &bytes, reporter) {
                    Ok(path) => outputs.push(path),
                    Err(msg) => errors.push(msg),
                },
                Err(e) => {
                    let msg = format!("{}: {}", name, e.one_line());
                    reporter.report(PipelineEvent::FileFailed {
                        input: &source.path,
                        error: &msg,
                    });
                    errors.push(msg);
                }
            }
        }

        (outputs, errors)
    }

    /// 全部编码成功后才写出
    fn atomic(
        &self,
        source: &SourceFile,
        input: &[u8],
        variants: &[Variant],
        sink: &SinkWriter,
        reporter: &dyn Reporter,
    ) -> (Vec<std::path::PathBuf>, Vec<String>) {
        let mut encoded = Vec::with_capacity(variants.len());
        for variant in variants {
            let name = variant.output_name(source);
            match variant.encode(input, &self.config) {
                Ok(bytes) => encoded.push((name, bytes)),
                Err(e) => {
                    let msg = format!("{}: {}", name, e.one_line());
                    reporter.report(PipelineEvent::FileFailed {
                        input: &source.path,
                        error: &msg,
                    });
                    return (Vec::new(), vec![msg]);
                }
            }
        }

        let mut outputs = Vec::new();
        let mut errors = Vec::new();
        for (name, bytes) in &encoded {
            match write_output(sink, source, name, bytes, reporter) {
                Ok(path) => outputs.push(path),
                Err(msg) => errors.push(msg),
            }
        }
        (outputs, errors)
    }
}

impl AssetTransform for ImageTransform {
    type Meta = ();

    fn label(&self) -> &'static str {
        "images"
    }

    fn extensions(&self) -> &'static [&'static str] {
        IMAGE_EXTENSIONS
    }

    fn transform(
        &self,
        source: &SourceFile,
        sink: &SinkWriter,
        reporter: &dyn Reporter,
    ) -> ProcessResult<()> {
        let Some(kind) = ImageKind::from_extension(&source.extension) else {
            let err = AssetError::UnsupportedFormat(source.extension.clone());
            return fail(source, &err, reporter);
        };

        let input = match read_source(source, reporter) {
            Ok(bytes) => bytes,
            Err(failed) => return failed,
        };

        let (outputs, errors) = if self.config.atomic {
            self.atomic(source, &input, kind.variants(), sink, reporter)
        } else {
            self.best_effort(source, &input, kind.variants(), sink, reporter)
        };

        match (outputs.is_empty(), errors.is_empty()) {
            (_, true) => ProcessResult::Success {
                input: source.path.clone(),
                outputs,
                meta: (),
            },
            (true, false) => ProcessResult::Failed {
                input: source.path.clone(),
                error: errors.join("; "),
            },
            (false, false) => ProcessResult::Partial {
                input: source.path.clone(),
                outputs,
                errors,
            },
        }
    }
}

/// 运行图片流水线
pub fn run_images(
    config: &ImageConfig,
    runner: BatchRunner,
    reporter: &dyn Reporter,
) -> Result<PipelineRun<()>> {
    Pipeline::new(
        ImageTransform::new(config.clone()),
        &config.source_dir,
        &config.target_dir,
        reporter,
    )
    .with_runner(runner)
    .run()
}
