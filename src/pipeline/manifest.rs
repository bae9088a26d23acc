//! # 字体样式表生成
//!
//! 把转换成功的字体汇总成 SCSS：每个描述一条 `@font-face`，
//! 每个字体族一个 `$font-<family>` 变量。
//!
//! ## 顺序
//! - 字体族按首次出现顺序
//! - 同一字体族内按枚举顺序（不排序）
//!
//! ## 依赖关系
//! - 被 `pipeline/font.rs` 调用
//! - 使用 `models/font.rs`

use crate::batch::sink;
use crate::error::Result;
use crate::models::{FontConfig, FontEntry};

use std::path::Path;

/// 样式表格式参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestStyle {
    /// 字体 URL 前缀，如 `/assets/fonts`
    pub url_prefix: String,
    /// 通用回退字体
    pub fallback: String,
    /// `font-display` 取值
    pub font_display: String,
}

impl Default for ManifestStyle {
    fn default() -> Self {
        Self::from(&FontConfig::default())
    }
}

impl From<&FontConfig> for ManifestStyle {
    fn from(config: &FontConfig) -> Self {
        ManifestStyle {
            url_prefix: config.url_prefix.trim_end_matches('/').to_string(),
            fallback: config.fallback.clone(),
            font_display: config.font_display.clone(),
        }
    }
}

/// 按字体族分组的清单
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontManifest {
    families: Vec<(String, Vec<FontEntry>)>,
}

impl FontManifest {
    /// 分组（保持首次出现顺序）
    pub fn from_entries(entries: impl IntoIterator<Item = FontEntry>) -> Self {
        let mut families: Vec<(String, Vec<FontEntry>)> = Vec::new();
        for entry in entries {
            let family = entry.descriptor.family.clone();
            match families.iter_mut().find(|(name, _)| *name == family) {
                Some((_, group)) => group.push(entry),
                None => families.push((family, vec![entry])),
            }
        }
        FontManifest { families }
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// `@font-face` 条目数
    pub fn len(&self) -> usize {
        self.families.iter().map(|(_, group)| group.len()).sum()
    }

    /// 字体族名（首次出现顺序）
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.families.iter().map(|(name, _)| name.as_str())
    }

    /// 渲染 SCSS
    pub fn render(&self, style: &ManifestStyle) -> String {
        let mut scss = String::from("// Generated by assetkit. Do not edit by hand.\n\n");

        for (family, group) in &self.families {
            for entry in group {
                scss.push_str(&font_face(family, entry, style));
            }
        }

        scss.push_str("// Font family variables\n");
        for family in self.families() {
            scss.push_str(&format!(
                "$font-{}: '{}', {};\n",
                family.to_lowercase(),
                family,
                style.fallback
            ));
        }

        scss
    }

    /// 写入样式表（覆盖），父目录不存在时创建
    pub fn write(&self, path: &Path, style: &ManifestStyle) -> Result<()> {
        sink::write_file(path, self.render(style).as_bytes())
    }
}

/// 单条 `@font-face`（含结尾空行）
fn font_face(family: &str, entry: &FontEntry, style: &ManifestStyle) -> String {
    let url = |ext: &str| format!("{}/{}.{}", style.url_prefix, entry.basename, ext);
    format!(
        concat!(
            "@font-face {{\n",
            "  font-family: '{}';\n",
            "  src: url('{}') format('woff2'),\n",
            "       url('{}') format('woff');\n",
            "  font-weight: {};\n",
            "  font-style: {};\n",
            "  font-display: {};\n",
            "}}\n\n",
        ),
        family,
        url("woff2"),
        url("woff"),
        entry.descriptor.weight,
        entry.descriptor.style,
        style.font_display
    )
}
