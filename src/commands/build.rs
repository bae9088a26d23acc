//! # build 命令实现
//!
//! 依次运行字体与图片流水线。某个流水线的输入目录缺失时给出警告并继续下一个。
//!
//! ## 依赖关系
//! - 使用 `cli/build.rs` 定义的参数
//! - 使用 `pipeline/font.rs`, `pipeline/image.rs`

use crate::batch::{BatchRunner, ConsoleReporter};
use crate::cli::build::BuildArgs;
use crate::error::{AssetError, Result};
use crate::models::AppConfig;
use crate::pipeline::font::run_fonts;
use crate::pipeline::image::run_images;
use crate::utils::output;

/// 执行 build 命令
pub fn execute(args: BuildArgs, mut config: AppConfig) -> Result<()> {
    config.images.atomic |= args.atomic;
    let runner = BatchRunner::new(args.jobs);
    let reporter = ConsoleReporter::default();

    let mut failed = 0;
    let mut total = 0;

    match run_fonts(&config.fonts, runner, &reporter) {
        Ok(result) => {
            failed += result.run.summary.failed + result.run.summary.partial;
            total += result.run.summary.total();
        }
        Err(e @ AssetError::DirectoryNotFound { .. }) => output::print_warning(&e.one_line()),
        Err(e) => return Err(e),
    }

    match run_images(&config.images, runner, &reporter) {
        Ok(run) => {
            failed += run.summary.failed + run.summary.partial;
            total += run.summary.total();
        }
        Err(e @ AssetError::DirectoryNotFound { .. }) => output::print_warning(&e.one_line()),
        Err(e) => return Err(e),
    }

    if failed > 0 {
        output::print_warning(&format!(
            "{} of {} source file(s) were not fully converted",
            failed, total
        ));
    }

    Ok(())
}
