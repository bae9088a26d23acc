//! # 统一错误处理模块
//!
//! 定义 assetkit 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 错误等级
//! - 中止型：输入目录缺失/不可读、配置错误、清单写入失败
//! - 单文件型：读取、编解码、写入失败，仅记录并继续处理下一个文件
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// assetkit 统一错误类型
#[derive(Error, Debug)]
pub enum AssetError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("Failed to list directory: {path}\nReason: {reason}")]
    ListingError { path: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 格式与转换错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid font file: {reason}")]
    InvalidFont { reason: String },

    #[error("Conversion failed: {from} -> {to}\nReason: {reason}")]
    ConversionError {
        from: String,
        to: String,
        reason: String,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    // ─────────────────────────────────────────────────────────────
    // 配置与参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid configuration in {path}\nReason: {reason}")]
    ConfigError { path: String, reason: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

impl AssetError {
    /// 构造编解码错误
    pub fn conversion(from: &str, to: &str, reason: impl std::fmt::Display) -> Self {
        AssetError::ConversionError {
            from: from.to_string(),
            to: to.to_string(),
            reason: reason.to_string(),
        }
    }

    /// 单行错误描述（用于日志与 CSV 报告）
    pub fn one_line(&self) -> String {
        use std::error::Error as _;

        let mut msg = self.to_string().replace('\n', " ");
        let mut source = self.source();
        while let Some(cause) = source {
            msg.push_str(": ");
            msg.push_str(&cause.to_string());
            source = cause.source();
        }
        msg
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, AssetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_line_includes_source() {
        let err = AssetError::FileReadError {
            path: "fonts/a.ttf".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.one_line(), "Failed to read file: fonts/a.ttf: gone");
    }

    #[test]
    fn test_one_line_flattens_newlines() {
        let err = AssetError::conversion("ttf", "woff2", "bad table");
        assert_eq!(
            err.one_line(),
            "Conversion failed: ttf -> woff2 Reason: bad table"
        );
    }
}
