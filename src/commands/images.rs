//! # images 命令实现
//!
//! 合并命令行参数与配置，运行图片流水线并输出汇总。
//!
//! ## 依赖关系
//! - 使用 `cli/images.rs` 定义的参数
//! - 使用 `pipeline/image.rs`
//! - 使用 `utils/output.rs`, `utils/report.rs`

use crate::batch::{BatchRunner, ConsoleReporter};
use crate::cli::images::ImagesArgs;
use crate::error::Result;
use crate::models::ImageConfig;
use crate::pipeline::image::run_images;
use crate::utils::{output, report};

/// 执行 images 命令
pub fn execute(args: ImagesArgs, config: ImageConfig) -> Result<()> {
    let config = apply_args(&args, config);

    if config.atomic {
        output::print_info("Atomic mode: outputs are written only when every conversion succeeds");
    }

    let reporter = ConsoleReporter::default();
    let run = run_images(&config, BatchRunner::new(args.jobs), &reporter)?;

    if !run.results.is_empty() {
        println!("{}", report::summary_table(&run.results));
    }

    if let Some(path) = &args.report {
        report::write_csv_report(&run.results, path)?;
        output::print_success(&format!("Report saved to '{}'", path.display()));
    }

    Ok(())
}

/// 命令行参数覆盖配置
fn apply_args(args: &ImagesArgs, mut config: ImageConfig) -> ImageConfig {
    if let Some(input) = &args.input {
        config.source_dir = input.clone();
    }
    if let Some(output) = &args.output {
        config.target_dir = output.clone();
    }
    if let Some(quality) = args.jpeg_quality {
        config.jpeg.quality = quality;
    }
    if let Some(quality) = args.webp_quality {
        config.webp.quality = quality;
    }
    config.atomic |= args.atomic;
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_args_override_config() {
        let args = ImagesArgs {
            output: Some(PathBuf::from("dist/img")),
            webp_quality: Some(60),
            atomic: true,
            ..ImagesArgs::default()
        };

        let config = apply_args(&args, ImageConfig::default());
        assert_eq!(config.source_dir, PathBuf::from("scr/assets/img/img_to_convert"));
        assert_eq!(config.target_dir, PathBuf::from("dist/img"));
        assert_eq!(config.webp.quality, 60);
        assert_eq!(config.jpeg.quality, 80);
        assert!(config.atomic);
    }
}
