//! # 字体描述模型
//!
//! 由文件名推导出的字体族、字重、字形信息。
//!
//! ## 依赖关系
//! - 被 `pipeline/metadata.rs` 创建
//! - 被 `pipeline/manifest.rs` 渲染为 `@font-face`

/// 字形样式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl std::fmt::Display for FontStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FontStyle::Normal => write!(f, "normal"),
            FontStyle::Italic => write!(f, "italic"),
        }
    }
}

/// 字体描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontDescriptor {
    /// 字体族名（文件名第一个 `-` 之前的部分）
    pub family: String,
    /// 字重 (100..=900)
    pub weight: u16,
    /// 字形
    pub style: FontStyle,
}

impl FontDescriptor {
    /// 字重默认值 (Regular)
    pub const DEFAULT_WEIGHT: u16 = 400;

    pub fn new(family: impl Into<String>, weight: u16, style: FontStyle) -> Self {
        FontDescriptor {
            family: family.into(),
            weight,
            style,
        }
    }
}

/// 清单条目：描述 + 输出文件基名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontEntry {
    pub descriptor: FontDescriptor,
    /// 输出文件基名（不含扩展名），如 `Roboto-SemiBold`
    pub basename: String,
}
