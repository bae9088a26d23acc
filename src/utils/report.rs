//! # 运行报告
//!
//! 批处理结束后的汇总表格与 CSV 报告。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `tabled` 渲染表格，`csv` 写出报告

use crate::batch::ProcessResult;
use crate::error::{AssetError, Result};

use std::path::Path;
use tabled::{Table, Tabled};

/// 汇总表的一行
#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Outputs")]
    outputs: String,
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn output_names<M>(result: &ProcessResult<M>) -> Vec<String> {
    result.outputs().iter().map(|p| file_name(p)).collect()
}

/// 渲染结果表格
pub fn summary_table<M>(results: &[ProcessResult<M>]) -> String {
    let rows: Vec<SummaryRow> = results
        .iter()
        .map(|r| SummaryRow {
            file: file_name(r.input()),
            status: r.status(),
            outputs: output_names(r).join(", "),
        })
        .collect();

    Table::new(&rows).to_string()
}

/// 写出 CSV 报告：input,status,outputs,error
pub fn write_csv_report<M>(results: &[ProcessResult<M>], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path).map_err(AssetError::CsvError)?;

    wtr.write_record(["input", "status", "outputs", "error"])
        .map_err(AssetError::CsvError)?;

    for result in results {
        wtr.write_record([
            result.input().display().to_string(),
            result.status().to_string(),
            output_names(result).join(";"),
            result.error_message(),
        ])
        .map_err(AssetError::CsvError)?;
    }

    wtr.flush().map_err(|e| AssetError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
