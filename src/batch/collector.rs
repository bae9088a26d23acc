//! # 文件收集器
//!
//! 列出输入目录中扩展名匹配的文件。
//!
//! ## 功能
//! - 扩展名白名单，大小写不敏感
//! - 只扫描目录本层（不递归）
//! - 按文件名排序，保证枚举顺序稳定
//!
//! ## 依赖关系
//! - 被 `pipeline/mod.rs` 和 `commands/fonts.rs` 调用
//! - 使用 `walkdir` 遍历目录

use crate::error::{AssetError, Result};
use crate::models::SourceFile;

use std::path::PathBuf;
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    /// 输入目录
    input: PathBuf,
    /// 允许的扩展名（小写，不含点）
    extensions: Vec<String>,
}

impl FileCollector {
    /// 创建新的文件收集器
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            extensions: Vec::new(),
        }
    }

    /// 设置扩展名白名单（`"ttf"` 与 `".TTF"` 等价）
    pub fn with_extensions(mut self, extensions: &[&str]) -> Self {
        self.extensions = extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        self
    }

    /// 收集所有匹配的文件
    ///
    /// 目录不存在返回 `DirectoryNotFound`；无法读取返回 `ListingError`。
    /// 目录存在但没有匹配文件时返回空列表。
    pub fn collect(&self) -> Result<Vec<SourceFile>> {
        if !self.input.exists() {
            return Err(AssetError::DirectoryNotFound {
                path: self.input.display().to_string(),
            });
        }

        if !self.input.is_dir() {
            return Err(AssetError::ListingError {
                path: self.input.display().to_string(),
                reason: "not a directory".to_string(),
            });
        }

        let walker = WalkDir::new(&self.input)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| AssetError::ListingError {
                path: self.input.display().to_string(),
                reason: e.to_string(),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            if let Some(source) = SourceFile::from_path(entry.path()) {
                if self.matches(&source) {
                    files.push(source);
                }
            }
        }

        Ok(files)
    }

    /// 检查扩展名是否在白名单内
    fn matches(&self, source: &SourceFile) -> bool {
        self.extensions.iter().any(|ext| *ext == source.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn names(files: &[SourceFile]) -> Vec<&str> {
        files.iter().map(|f| f.file_name.as_str()).collect()
    }

    #[test]
    fn test_case_insensitive_extension_filter() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.ttf", "b.otf", "c.TTF"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        let files = FileCollector::new(dir.path())
            .with_extensions(&["ttf"])
            .collect()
            .unwrap();

        assert_eq!(names(&files), vec!["a.ttf", "c.TTF"]);
    }

    #[test]
    fn test_image_allow_list_skips_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["logo.svg", "photo.JPEG", "anim.gif", "notes.txt", "icon.png"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.png")).unwrap();
        fs::write(dir.path().join("nested.png").join("deep.png"), b"x").unwrap();

        let files = FileCollector::new(dir.path())
            .with_extensions(&[".jpg", ".jpeg", ".png", ".gif", ".svg"])
            .collect()
            .unwrap();

        assert_eq!(
            names(&files),
            vec!["anim.gif", "icon.png", "logo.svg", "photo.JPEG"]
        );
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileCollector::new(dir.path().join("missing"))
            .with_extensions(&["ttf"])
            .collect()
            .unwrap_err();
        assert!(matches!(err, AssetError::DirectoryNotFound { .. }));
    }

    #[test]
    fn test_file_instead_of_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("fonts");
        fs::write(&file, b"x").unwrap();

        let err = FileCollector::new(&file)
            .with_extensions(&["ttf"])
            .collect()
            .unwrap_err();
        assert!(matches!(err, AssetError::ListingError { .. }));
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("readme.md"), b"x").unwrap();

        let files = FileCollector::new(dir.path())
            .with_extensions(&["ttf"])
            .collect()
            .unwrap();
        assert!(files.is_empty());
    }
}
