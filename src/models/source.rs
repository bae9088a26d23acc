//! # 源文件模型
//!
//! 描述待处理的单个输入文件。
//!
//! ## 依赖关系
//! - 被 `batch/collector.rs` 创建
//! - 被 `pipeline/` 消费

use std::path::{Path, PathBuf};

/// 待处理的源文件（只读一次）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// 完整路径
    pub path: PathBuf,
    /// 文件名（含扩展名，保持原始大小写）
    pub file_name: String,
    /// 不含扩展名的文件名
    pub stem: String,
    /// 小写扩展名（不含点）
    pub extension: String,
}

impl SourceFile {
    /// 从路径构建；没有文件名或扩展名时返回 `None`
    pub fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?.to_string();
        let stem = path.file_stem()?.to_str()?.to_string();
        let extension = path.extension()?.to_str()?.to_lowercase();

        Some(SourceFile {
            path: path.to_path_buf(),
            file_name,
            stem,
            extension,
        })
    }

    /// 以指定扩展名生成同名输出文件名
    pub fn with_extension(&self, ext: &str) -> String {
        format!("{}.{}", self.stem, ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        let src = SourceFile::from_path(Path::new("in/Roboto-Bold.TTF")).unwrap();
        assert_eq!(src.file_name, "Roboto-Bold.TTF");
        assert_eq!(src.stem, "Roboto-Bold");
        assert_eq!(src.extension, "ttf");
        assert_eq!(src.with_extension("woff2"), "Roboto-Bold.woff2");
    }

    #[test]
    fn test_without_extension() {
        assert!(SourceFile::from_path(Path::new("in/README")).is_none());
    }
}
