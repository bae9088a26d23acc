//! # 输出写入器
//!
//! 确保目标目录存在，并把缓冲区写入目标文件（无条件覆盖）。
//! 不做临时文件 + rename，崩溃时可能留下截断的输出。
//!
//! ## 依赖关系
//! - 被 `pipeline/` 使用

use crate::error::{AssetError, Result};

use std::fs;
use std::path::{Path, PathBuf};

/// 输出写入器
#[derive(Debug, Clone)]
pub struct SinkWriter {
    /// 目标目录
    dir: PathBuf,
}

impl SinkWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 递归创建目标目录（已存在时无操作）
    pub fn ensure_dir(&self) -> Result<()> {
        ensure_dir(&self.dir)
    }

    /// 写入 `dir/file_name`，返回写入路径
    pub fn write(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        self.ensure_dir()?;
        let path = self.dir.join(file_name);
        write_file(&path, bytes)?;
        Ok(path)
    }
}

/// 递归创建目录
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| AssetError::FileWriteError {
        path: dir.display().to_string(),
        source: e,
    })
}

/// 写入文件，必要时创建父目录
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    fs::write(path, bytes).map_err(|e| AssetError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}
