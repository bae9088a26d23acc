//! # SVG 结构优化
//!
//! 逐事件重写 SVG 文档：
//! - 删除注释、XML 声明、处理指令、DOCTYPE
//! - 删除 `<metadata>` 与编辑器私有元素/属性（`inkscape:*`, `sodipodi:*`）
//! - 删除两个标签之间的纯空白文本（文字类元素内部、实体引用两侧保留）
//! - `viewBox` 原样保留
//! - 清理 id：删除未被引用的 id，被引用的 id 依次缩短为 `a`, `b`, ...，
//!   同步改写 `url(#..)` 与 `href="#.."`。文档含 `<style>`/`<script>` 时不改 id。
//!
//! ## 依赖关系
//! - 被 `pipeline/image.rs` 调用
//! - 使用 `quick-xml` 读写事件，`regex` 匹配 `url(#id)` 引用

use crate::error::{AssetError, Result};
use crate::models::config::SvgOptions;

use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use regex::{Captures, Regex};
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// 编辑器命名空间前缀
const EDITOR_PREFIXES: [&str; 2] = ["inkscape:", "sodipodi:"];
/// 只在元数据块中使用的命名空间声明
const DROPPED_XMLNS: [&str; 5] = [
    "xmlns:inkscape",
    "xmlns:sodipodi",
    "xmlns:rdf",
    "xmlns:dc",
    "xmlns:cc",
];
/// 内部空白有意义的元素
const TEXT_ELEMENTS: [&str; 4] = ["text", "tspan", "textPath", "title"];

fn url_ref_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"url\(\s*['"]?#([^'")\s]+)['"]?\s*\)"#).expect("valid url() pattern")
    })
}

/// 优化 SVG
pub fn optimize(input: &[u8], options: &SvgOptions) -> Result<Vec<u8>> {
    let text = std::str::from_utf8(input).map_err(|e| fail(format!("not UTF-8: {}", e)))?;

    let ids = if options.cleanup_ids {
        IdMap::scan(text)?
    } else {
        IdMap::keep_all()
    };

    rewrite(text, &ids)
}

/// id 改写表
struct IdMap {
    /// false 时 id 与引用都原样保留
    active: bool,
    renames: HashMap<String, String>,
}

impl IdMap {
    fn keep_all() -> Self {
        IdMap {
            active: false,
            renames: HashMap::new(),
        }
    }

    /// 第一遍：收集声明的 id 与引用
    fn scan(text: &str) -> Result<Self> {
        let mut reader = Reader::from_str(text);
        let mut declared = Vec::new();
        let mut referenced = HashSet::new();

        loop {
            match reader.read_event().map_err(|e| fail(e))? {
                Event::Start(e) | Event::Empty(e) => {
                    let name = e.name();
                    if matches!(name.as_ref(), b"style" | b"script") {
                        return Ok(Self::keep_all());
                    }
                    for attr in e.attributes() {
                        let attr = attr.map_err(|e| fail(e))?;
                        let key = attr.key.as_ref();
                        let value = String::from_utf8_lossy(&attr.value);
                        if key == b"id" {
                            declared.push(value.to_string());
                        } else if is_href(key) {
                            if let Some(target) = value.strip_prefix('#') {
                                referenced.insert(target.to_string());
                            }
                        }
                        for caps in url_ref_regex().captures_iter(&value) {
                            referenced.insert(caps[1].to_string());
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        let mut renames = HashMap::new();
        for id in declared {
            if referenced.contains(&id) && !renames.contains_key(&id) {
                let short = short_id(renames.len());
                renames.insert(id, short);
            }
        }

        Ok(IdMap {
            active: true,
            renames,
        })
    }

    fn rename_url_refs(&self, value: &str) -> String {
        url_ref_regex()
            .replace_all(value, |caps: &Captures| match self.renames.get(&caps[1]) {
                Some(short) => format!("url(#{})", short),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}

/// 0 -> a, 25 -> z, 26 -> A, 51 -> Z, 52 -> aa ...
fn short_id(mut index: usize) -> String {
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut name = Vec::new();
    loop {
        name.push(ALPHABET[index % ALPHABET.len()]);
        index /= ALPHABET.len();
        if index == 0 {
            break;
        }
        index -= 1;
    }
    name.reverse();
    String::from_utf8_lossy(&name).to_string()
}

fn is_href(key: &[u8]) -> bool {
    key == b"href" || key == b"xlink:href"
}

fn is_editor_name(name: &[u8]) -> bool {
    let name = String::from_utf8_lossy(name);
    EDITOR_PREFIXES.iter().any(|p| name.starts_with(p))
}

fn is_dropped_element(name: &[u8]) -> bool {
    name == b"metadata" || is_editor_name(name)
}

/// 第二遍：输出优化后的文档
fn rewrite(text: &str, ids: &IdMap) -> Result<Vec<u8>> {
    let mut reader = Reader::from_str(text);
    let mut writer = Writer::new(Vec::new());

    // 被删除元素的嵌套深度
    let mut skip_depth = 0usize;
    // 当前打开元素栈
    let mut stack: Vec<Vec<u8>> = Vec::new();
    // 上一个输出事件是否为标签
    let mut after_markup = true;
    // 标签之后的纯空白，下一个事件是标签时丢弃
    let mut pending: Option<BytesText<'static>> = None;

    loop {
        let event = reader.read_event().map_err(|e| fail(e))?;

        if skip_depth > 0 {
            match event {
                Event::Start(_) => skip_depth += 1,
                Event::End(_) => skip_depth -= 1,
                Event::Eof => break,
                _ => {}
            }
            continue;
        }

        let is_ws_text =
            matches!(&event, Event::Text(t) if t.iter().all(u8::is_ascii_whitespace));
        if let Some(ws) = pending.take() {
            let keeps_ws = match &event {
                Event::GeneralRef(_) | Event::CData(_) => true,
                Event::Text(_) => !is_ws_text,
                _ => false,
            };
            if keeps_ws {
                writer.write_event(Event::Text(ws)).map_err(|e| fail(e))?;
            }
        }

        match event {
            Event::Start(e) => {
                after_markup = true;
                if is_dropped_element(e.name().as_ref()) {
                    skip_depth = 1;
                    continue;
                }
                stack.push(e.name().as_ref().to_vec());
                let cleaned = clean_element(&e, ids)?;
                writer.write_event(Event::Start(cleaned)).map_err(|e| fail(e))?;
            }
            Event::Empty(e) => {
                after_markup = true;
                if is_dropped_element(e.name().as_ref()) {
                    continue;
                }
                let cleaned = clean_element(&e, ids)?;
                writer.write_event(Event::Empty(cleaned)).map_err(|e| fail(e))?;
            }
            Event::End(e) => {
                after_markup = true;
                stack.pop();
                writer.write_event(Event::End(e)).map_err(|e| fail(e))?;
            }
            Event::Text(t) => {
                let inside_text = stack
                    .last()
                    .map(|name| TEXT_ELEMENTS.iter().any(|t| t.as_bytes() == name.as_slice()))
                    .unwrap_or(false);
                if !inside_text && is_ws_text && after_markup {
                    pending = Some(t.into_owned());
                    continue;
                }
                after_markup = false;
                writer.write_event(Event::Text(t)).map_err(|e| fail(e))?;
            }
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Eof => break,
            other => {
                after_markup = false;
                writer.write_event(other).map_err(|e| fail(e))?;
            }
        }
    }

    Ok(writer.into_inner())
}

/// 重建元素：删除编辑器属性，改写 id 与引用
fn clean_element(element: &BytesStart<'_>, ids: &IdMap) -> Result<BytesStart<'static>> {
    let name = String::from_utf8_lossy(element.name().as_ref()).to_string();
    let mut cleaned = BytesStart::new(name);

    for attr in element.attributes() {
        let attr = attr.map_err(|e| fail(e))?;
        let key = attr.key.as_ref();
        let key_str = String::from_utf8_lossy(key);

        if is_editor_name(key) || DROPPED_XMLNS.contains(&key_str.as_ref()) {
            continue;
        }

        let value = String::from_utf8_lossy(&attr.value).to_string();
        if !ids.active {
            cleaned.push_attribute((key, value.as_bytes()));
            continue;
        }

        let value = if key == b"id" {
            match ids.renames.get(&value) {
                Some(short) => short.clone(),
                None => continue,
            }
        } else if is_href(key) {
            match value.strip_prefix('#').and_then(|id| ids.renames.get(id)) {
                Some(short) => format!("#{}", short),
                None => value,
            }
        } else {
            ids.rename_url_refs(&value)
        };

        cleaned.push_attribute((key, value.as_bytes()));
    }

    Ok(cleaned)
}

fn fail(reason: impl std::fmt::Display) -> AssetError {
    AssetError::conversion("svg", "svg", reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(svg: &str) -> String {
        String::from_utf8(optimize(svg.as_bytes(), &SvgOptions::default()).unwrap()).unwrap()
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id(0), "a");
        assert_eq!(short_id(25), "z");
        assert_eq!(short_id(26), "A");
        assert_eq!(short_id(51), "Z");
        assert_eq!(short_id(52), "aa");
        assert_eq!(short_id(53), "ab");
    }

    #[test]
    fn test_strips_comments_metadata_and_editor_data() {
        let out = run(r##"<?xml version="1.0" encoding="UTF-8"?>
<!-- Created with Inkscape -->
<svg xmlns="http://www.w3.org/2000/svg" xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape" viewBox="0 0 24 24" inkscape:version="1.2">
  <metadata><rdf:RDF><cc:Work/></rdf:RDF></metadata>
  <sodipodi:namedview pagecolor="#fff"/>
  <path d="M0 0h24v24H0z"/>
</svg>"##);

        assert_eq!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><path d="M0 0h24v24H0z"/></svg>"#
        );
    }

    #[test]
    fn test_view_box_preserved() {
        let out = run(r#"<svg viewBox="0 0 100 50" width="100" height="50"><rect width="1" height="1"/></svg>"#);
        assert!(out.contains(r#"viewBox="0 0 100 50""#));
    }

    #[test]
    fn test_cleanup_ids() {
        let out = run(r##"<svg xmlns:xlink="http://www.w3.org/1999/xlink"><defs><linearGradient id="gradientLongName"><stop offset="0"/></linearGradient><path id="unusedPath" d="M0 0"/></defs><rect id="also-unused" fill="url(#gradientLongName)"/><use xlink:href="#gradientLongName"/></svg>"##);

        assert!(out.contains(r#"<linearGradient id="a">"#));
        assert!(out.contains(r##"fill="url(#a)""##));
        assert!(out.contains(r##"xlink:href="#a""##));
        assert!(!out.contains("unusedPath"));
        assert!(!out.contains("also-unused"));
    }

    #[test]
    fn test_ids_untouched_with_style_element() {
        let out = run(r#"<svg><style>#logo{fill:red}</style><path id="logo" d="M0 0"/></svg>"#);
        assert!(out.contains(r#"id="logo""#));
    }

    #[test]
    fn test_text_whitespace_kept() {
        let out = run("<svg>\n  <text x=\"0\"> Hello  world </text>\n</svg>");
        assert_eq!(out, "<svg><text x=\"0\"> Hello  world </text></svg>");
    }

    #[test]
    fn test_whitespace_between_entities_kept() {
        let out = run("<svg>\n  <desc>&lt; &gt; </desc>\n</svg>");
        assert_eq!(out, "<svg><desc>&lt; &gt; </desc></svg>");
    }

    #[test]
    fn test_cleanup_disabled() {
        let svg = r#"<svg><path id="keep-me" d="M0 0"/></svg>"#;
        let out = optimize(svg.as_bytes(), &SvgOptions { cleanup_ids: false }).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), svg);
    }

    #[test]
    fn test_malformed_svg() {
        let err = optimize(b"<svg><g></svg>", &SvgOptions::default()).unwrap_err();
        assert!(matches!(err, AssetError::ConversionError { .. }));
    }

    #[test]
    fn test_deterministic() {
        let svg = br##"<svg><defs><clipPath id="c1"/><mask id="m1"/></defs><g clip-path="url(#c1)" mask="url(#m1)"/></svg>"##;
        let first = optimize(svg, &SvgOptions::default()).unwrap();
        assert_eq!(first, optimize(svg, &SvgOptions::default()).unwrap());
        let text = String::from_utf8(first).unwrap();
        assert!(text.contains(r#"<clipPath id="a"/>"#));
        assert!(text.contains(r#"<mask id="b"/>"#));
    }
}
