//! # 字体文件名解析
//!
//! 从 `Family-Modifier.ttf` 形式的文件名推导字体族、字重和字形。
//! 纯函数，不访问文件系统，无错误路径。
//!
//! ## 匹配规则
//! - 按 `-` 切分，第一段为字体族，第二段（小写）为修饰词
//! - 字重按下表顺序做子串匹配，先命中者生效；组合词排在其后缀之前，
//!   因此 `extrabold` 不会被识别为 `bold`
//! - 修饰词中任意位置出现 `italic` 即为斜体，与字重无关
//!
//! ## 依赖关系
//! - 被 `pipeline/font.rs` 和 `commands/fonts.rs` 调用
//! - 使用 `models/font.rs`

use crate::models::{FontDescriptor, FontStyle};

/// 字重关键词表（顺序即优先级）
const WEIGHT_KEYWORDS: &[(&[&str], u16)] = &[
    (&["thin"], 100),
    (&["extralight", "ultralight"], 200),
    (&["light"], 300),
    (&["regular", "normal"], 400),
    (&["medium"], 500),
    (&["semibold", "demibold"], 600),
    (&["extrabold", "ultrabold"], 800),
    (&["bold"], 700),
    (&["black", "heavy"], 900),
];

/// 从文件名（可带 `.ttf` 扩展名）提取字体描述
pub fn extract_font_descriptor(file_name: &str) -> FontDescriptor {
    let basename = strip_ttf_extension(file_name);
    let mut parts = basename.split('-');

    let family = parts.next().unwrap_or_default().to_string();
    let modifier = parts.next().map(|m| m.to_lowercase());

    let (weight, style) = match modifier {
        Some(modifier) => (weight_of(&modifier), style_of(&modifier)),
        None => (FontDescriptor::DEFAULT_WEIGHT, FontStyle::Normal),
    };

    FontDescriptor::new(family, weight, style)
}

fn weight_of(modifier: &str) -> u16 {
    WEIGHT_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| modifier.contains(k)))
        .map(|(_, weight)| *weight)
        .unwrap_or(FontDescriptor::DEFAULT_WEIGHT)
}

fn style_of(modifier: &str) -> FontStyle {
    if modifier.contains("italic") {
        FontStyle::Italic
    } else {
        FontStyle::Normal
    }
}

fn strip_ttf_extension(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if ext.eq_ignore_ascii_case("ttf") => stem,
        _ => file_name,
    }
}
