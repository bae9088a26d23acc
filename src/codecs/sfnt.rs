//! # sfnt 表目录读取
//!
//! 用 `ttf-parser` 读取 TrueType/OpenType 表目录，供 WOFF/WOFF2 封装使用。
//! 表目录之外还要求字体能被完整解析（`head`/`hhea`/`maxp` 有效），
//! 只有表目录像字体的文件不会进入转换。
//!
//! ## 依赖关系
//! - 被 `codecs/woff.rs`, `codecs/woff2.rs` 使用
//! - 使用 `ttf-parser`

use crate::error::{AssetError, Result};

use ttf_parser::{Face, RawFace};

/// TrueType 轮廓
pub const FLAVOR_TRUETYPE: u32 = 0x0001_0000;
/// CFF 轮廓
pub const FLAVOR_CFF: u32 = u32::from_be_bytes(*b"OTTO");

const OFFSET_TABLE_LEN: usize = 12;
const TABLE_RECORD_LEN: usize = 16;

/// 一张字体表
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SfntTable<'a> {
    pub tag: [u8; 4],
    pub checksum: u32,
    pub data: &'a [u8],
}

impl SfntTable<'_> {
    pub fn tag_str(&self) -> String {
        String::from_utf8_lossy(&self.tag).to_string()
    }
}

/// 解析后的 sfnt 字体（借用原始字节）
#[derive(Debug, Clone)]
pub struct SfntFont<'a> {
    pub flavor: u32,
    /// 按 tag 升序排列
    pub tables: Vec<SfntTable<'a>>,
}

impl<'a> SfntFont<'a> {
    /// 解析 sfnt 数据
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let flavor = data
            .get(..4)
            .map(|b| u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
            .ok_or_else(|| invalid("file is too short for an sfnt header"))?;
        if !matches!(flavor, FLAVOR_TRUETYPE | FLAVOR_CFF) {
            return Err(invalid(format!("unsupported sfnt version 0x{:08X}", flavor)));
        }

        let raw = RawFace::parse(data, 0).map_err(|e| invalid(e.to_string()))?;
        if raw.table_records.is_empty() {
            return Err(invalid("font has no tables"));
        }

        let mut tables = Vec::with_capacity(usize::from(raw.table_records.len()));
        for record in raw.table_records {
            let tag = record.tag.to_bytes();
            let offset = record.offset as usize;
            let end = offset
                .checked_add(record.length as usize)
                .filter(|&end| end <= data.len())
                .ok_or_else(|| {
                    invalid(format!(
                        "table '{}' points outside the file",
                        String::from_utf8_lossy(&tag)
                    ))
                })?;

            tables.push(SfntTable {
                tag,
                checksum: record.check_sum,
                data: &data[offset..end],
            });
        }

        tables.sort_by(|a, b| a.tag.cmp(&b.tag));
        if tables.windows(2).any(|w| w[0].tag == w[1].tag) {
            return Err(invalid("duplicate table tag"));
        }

        Face::parse(data, 0).map_err(|e| invalid(e.to_string()))?;

        Ok(SfntFont { flavor, tables })
    }

    /// 重建 sfnt 文件时的总大小（表数据按 4 字节对齐）
    pub fn total_sfnt_size(&self) -> u32 {
        let tables: usize = self.tables.iter().map(|t| pad4(t.data.len())).sum();
        (OFFSET_TABLE_LEN + TABLE_RECORD_LEN * self.tables.len() + tables) as u32
    }
}

/// 计算表校验和（`head` 表跳过 checkSumAdjustment）
pub fn table_checksum(tag: &[u8; 4], data: &[u8]) -> u32 {
    let mut sum = 0u32;
    for (i, chunk) in data.chunks(4).enumerate() {
        if tag == b"head" && i == 2 {
            continue;
        }
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum = sum.wrapping_add(u32::from_be_bytes(word));
    }
    sum
}

/// 向上对齐到 4 字节
pub fn pad4(len: usize) -> usize {
    (len + 3) & !3
}

fn invalid(reason: impl Into<String>) -> AssetError {
    AssetError::InvalidFont {
        reason: reason.into(),
    }
}

/// 测试用的最小 sfnt 构造器
#[cfg(test)]
pub mod testing {
    use super::*;

    /// 按给定顺序构造 sfnt 文件（目录顺序 = 参数顺序）
    pub fn build_sfnt(flavor: u32, tables: &[(&[u8; 4], Vec<u8>)]) -> Vec<u8> {
        let num_tables = tables.len();
        let mut out = Vec::new();
        out.extend_from_slice(&flavor.to_be_bytes());
        out.extend_from_slice(&(num_tables as u16).to_be_bytes());
        out.extend_from_slice(&[0u8; 6]);

        let mut offset = OFFSET_TABLE_LEN + TABLE_RECORD_LEN * num_tables;
        let mut records = Vec::new();
        let mut body = Vec::new();
        for (tag, data) in tables {
            records.extend_from_slice(*tag);
            records.extend_from_slice(&table_checksum(tag, data).to_be_bytes());
            records.extend_from_slice(&(offset as u32).to_be_bytes());
            records.extend_from_slice(&(data.len() as u32).to_be_bytes());
            body.extend_from_slice(data);
            body.resize(pad4(body.len()), 0);
            offset = OFFSET_TABLE_LEN + TABLE_RECORD_LEN * num_tables + body.len();
        }

        out.extend_from_slice(&records);
        out.extend_from_slice(&body);
        out
    }

    /// 最小可解析的 `head` 表
    pub fn head_table(revision: u8) -> Vec<u8> {
        let mut head = vec![0u8; 54];
        head[0..4].copy_from_slice(&0x0001_0000u32.to_be_bytes());
        head[4..8].copy_from_slice(&u32::from(revision).to_be_bytes());
        head[12..16].copy_from_slice(&0x5F0F_3CF5u32.to_be_bytes());
        head[18..20].copy_from_slice(&1000u16.to_be_bytes());
        head
    }

    /// 最小可解析的 `hhea` 表
    pub fn hhea_table() -> Vec<u8> {
        let mut hhea = vec![0u8; 36];
        hhea[0..4].copy_from_slice(&0x0001_0000u32.to_be_bytes());
        hhea[4..6].copy_from_slice(&800i16.to_be_bytes());
        hhea[6..8].copy_from_slice(&(-200i16).to_be_bytes());
        hhea[34..36].copy_from_slice(&1u16.to_be_bytes());
        hhea
    }

    /// 0.5 版 `maxp` 表
    pub fn maxp_table(num_glyphs: u16) -> Vec<u8> {
        let mut maxp = 0x0000_5000u32.to_be_bytes().to_vec();
        maxp.extend_from_slice(&num_glyphs.to_be_bytes());
        maxp
    }

    /// 一个包含必需表、轮廓表和一张未知表的样例 TrueType 字体
    pub fn sample_font(seed: u8) -> Vec<u8> {
        let glyf: Vec<u8> = (0..200u32).map(|i| (i as u8).wrapping_mul(seed)).collect();
        build_sfnt(
            FLAVOR_TRUETYPE,
            &[
                (b"head", head_table(seed)),
                (b"hhea", hhea_table()),
                (b"maxp", maxp_table(2)),
                (b"cmap", b"cmap-data-cmap-data-cmap-data".to_vec()),
                (b"glyf", glyf),
                (b"loca", vec![0, 0, 0, 50, 0, 100]),
                (b"zzzz", vec![1, 2, 3]),
            ],
        )
    }
}
