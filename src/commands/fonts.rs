//! # fonts 命令实现
//!
//! 合并命令行参数与配置，运行字体流水线并输出汇总。
//!
//! ## 依赖关系
//! - 使用 `cli/fonts.rs` 定义的参数
//! - 使用 `pipeline/font.rs`, `pipeline/metadata.rs`
//! - 使用 `utils/output.rs`, `utils/report.rs`

use crate::batch::{BatchRunner, ConsoleReporter, FileCollector};
use crate::cli::fonts::FontsArgs;
use crate::error::Result;
use crate::models::FontConfig;
use crate::pipeline::font::{run_fonts, FONT_EXTENSIONS};
use crate::pipeline::metadata::extract_font_descriptor;
use crate::utils::{output, report};

use tabled::{Table, Tabled};

/// 执行 fonts 命令
pub fn execute(args: FontsArgs, config: FontConfig) -> Result<()> {
    let config = apply_args(&args, config);

    if args.dry_run {
        return print_descriptors(&config);
    }

    let reporter = ConsoleReporter::default();
    let result = run_fonts(&config, BatchRunner::new(args.jobs), &reporter)?;

    if !result.run.results.is_empty() {
        println!("{}", report::summary_table(&result.run.results));
    }

    if let Some(path) = &args.report {
        report::write_csv_report(&result.run.results, path)?;
        output::print_success(&format!("Report saved to '{}'", path.display()));
    }

    Ok(())
}

/// 命令行参数覆盖配置
fn apply_args(args: &FontsArgs, mut config: FontConfig) -> FontConfig {
    if let Some(input) = &args.input {
        config.source_dir = input.clone();
    }
    if let Some(output) = &args.output {
        config.target_dir = output.clone();
    }
    if let Some(manifest) = &args.manifest {
        config.manifest_path = manifest.clone();
    }
    if let Some(prefix) = &args.url_prefix {
        config.url_prefix = prefix.clone();
    }
    config
}

#[derive(Tabled)]
struct DescriptorRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Family")]
    family: String,
    #[tabled(rename = "Weight")]
    weight: u16,
    #[tabled(rename = "Style")]
    style: String,
}

/// 只打印文件名解析结果
fn print_descriptors(config: &FontConfig) -> Result<()> {
    output::print_header("Detected font descriptors");

    let files = FileCollector::new(&config.source_dir)
        .with_extensions(FONT_EXTENSIONS)
        .collect()?;

    if files.is_empty() {
        output::print_warning(&format!(
            "No .ttf files under {}",
            config.source_dir.display()
        ));
        return Ok(());
    }

    let rows: Vec<DescriptorRow> = files
        .iter()
        .map(|f| {
            let d = extract_font_descriptor(&f.file_name);
            DescriptorRow {
                file: f.file_name.clone(),
                family: d.family,
                weight: d.weight,
                style: d.style.to_string(),
            }
        })
        .collect();

    println!("{}", Table::new(&rows));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_args_override_config() {
        let args = FontsArgs {
            input: Some(PathBuf::from("raw")),
            manifest: Some(PathBuf::from("styles/_fonts.scss")),
            url_prefix: Some("/fonts".to_string()),
            ..FontsArgs::default()
        };

        let config = apply_args(&args, FontConfig::default());
        assert_eq!(config.source_dir, PathBuf::from("raw"));
        assert_eq!(config.target_dir, PathBuf::from("scr/assets/fonts"));
        assert_eq!(config.manifest_path, PathBuf::from("styles/_fonts.scss"));
        assert_eq!(config.url_prefix, "/fonts");
    }
}
