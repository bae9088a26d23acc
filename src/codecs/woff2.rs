//! # WOFF2 编码器
//!
//! TTF -> WOFF2：紧凑表目录 + 单一 Brotli 流。
//! 所有表使用空变换（glyf/loca 变换版本 3），表数据按目录顺序首尾相接。
//!
//! ## 文件布局
//! ```text
//! WOFF2Header (48 字节)
//! TableDirectory（flags + 可选 tag + UIntBase128 长度）
//! CompressedFontData（Brotli，font 模式）
//! 填充到 4 字节
//! ```
//!
//! ## 依赖关系
//! - 被 `pipeline/font.rs` 调用
//! - 使用 `codecs/sfnt.rs` 读取表目录
//! - 使用 `brotli` 压缩

use super::sfnt::SfntFont;
use crate::error::{AssetError, Result};

use brotli::enc::backward_references::BrotliEncoderMode;
use brotli::enc::BrotliEncoderParams;

const SIGNATURE: u32 = u32::from_be_bytes(*b"wOF2");
const HEADER_LEN: usize = 48;

/// flags 低 6 位为 63 时表示后面跟随显式 tag
const ARBITRARY_TAG: u8 = 0x3F;
/// glyf/loca 的空变换版本
const NULL_TRANSFORM_GLYF: u8 = 3;

const BROTLI_QUALITY: i32 = 11;
const BROTLI_WINDOW: i32 = 22;

/// WOFF2 已知表 tag（下标即 flags 中的编号）
const KNOWN_TAGS: [&[u8; 4]; 63] = [
    b"cmap", b"head", b"hhea", b"hmtx", b"maxp", b"name", b"OS/2", b"post", b"cvt ", b"fpgm",
    b"glyf", b"loca", b"prep", b"CFF ", b"VORG", b"EBDT", b"EBLC", b"gasp", b"hdmx", b"kern",
    b"LTSH", b"PCLT", b"VDMX", b"vhea", b"vmtx", b"BASE", b"GDEF", b"GPOS", b"GSUB", b"EBSC",
    b"JSTF", b"MATH", b"CBDT", b"CBLC", b"COLR", b"CPAL", b"SVG ", b"sbix", b"acnt", b"avar",
    b"bdat", b"bloc", b"bsln", b"cvar", b"fdsc", b"feat", b"fmtx", b"fvar", b"gvar", b"hsty",
    b"just", b"lcar", b"mort", b"morx", b"opbd", b"prop", b"trak", b"Zapf", b"Silf", b"Glat",
    b"Gloc", b"Feat", b"Sill",
];

/// 把 TTF 字节编码为 WOFF2
pub fn encode(ttf: &[u8]) -> Result<Vec<u8>> {
    let font = SfntFont::parse(ttf)?;

    let mut directory = Vec::new();
    let mut stream = Vec::new();
    for table in &font.tables {
        let known = KNOWN_TAGS.iter().position(|t| **t == table.tag);
        let mut flags = known.map(|i| i as u8).unwrap_or(ARBITRARY_TAG);
        if &table.tag == b"glyf" || &table.tag == b"loca" {
            flags |= NULL_TRANSFORM_GLYF << 6;
        }

        directory.push(flags);
        if known.is_none() {
            directory.extend_from_slice(&table.tag);
        }
        push_base128(&mut directory, table.data.len() as u32);

        stream.extend_from_slice(table.data);
    }

    let compressed = brotli_compress(&stream)?;

    let unpadded = HEADER_LEN + directory.len() + compressed.len();
    let total_len = (unpadded + 3) & !3;

    let mut out = Vec::with_capacity(total_len);
    out.extend_from_slice(&SIGNATURE.to_be_bytes());
    out.extend_from_slice(&font.flavor.to_be_bytes());
    out.extend_from_slice(&(total_len as u32).to_be_bytes());
    out.extend_from_slice(&(font.tables.len() as u16).to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes()); // reserved
    out.extend_from_slice(&font.total_sfnt_size().to_be_bytes());
    out.extend_from_slice(&(compressed.len() as u32).to_be_bytes());
    out.extend_from_slice(&1u16.to_be_bytes()); // majorVersion
    out.extend_from_slice(&0u16.to_be_bytes()); // minorVersion
    out.extend_from_slice(&[0u8; 20]); // 无元数据块与私有数据块
    out.extend_from_slice(&directory);
    out.extend_from_slice(&compressed);
    out.resize(total_len, 0);

    Ok(out)
}

/// UIntBase128：大端 7 位分组，除最后一字节外最高位置 1，无前导零
fn push_base128(out: &mut Vec<u8>, mut value: u32) {
    let mut groups = [0u8; 5];
    let mut len = 0;
    loop {
        groups[len] = (value & 0x7F) as u8;
        len += 1;
        value >>= 7;
        if value == 0 {
            break;
        }
    }
    for i in (0..len).rev() {
        let continuation = if i > 0 { 0x80 } else { 0 };
        out.push(groups[i] | continuation);
    }
}

fn brotli_compress(data: &[u8]) -> Result<Vec<u8>> {
    let params = BrotliEncoderParams {
        quality: BROTLI_QUALITY,
        lgwin: BROTLI_WINDOW,
        mode: BrotliEncoderMode::BROTLI_MODE_FONT,
        size_hint: data.len(),
        ..Default::default()
    };

    let mut input = data;
    let mut out = Vec::new();
    brotli::BrotliCompress(&mut input, &mut out, &params)
        .map_err(|e| AssetError::conversion("ttf", "woff2", e))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codecs::sfnt::testing::sample_font;
    use std::io::Read;

    fn base128(value: u32) -> Vec<u8> {
        let mut out = Vec::new();
        push_base128(&mut out, value);
        out
    }

    fn read_base128(data: &[u8], pos: &mut usize) -> u32 {
        let mut value = 0u32;
        loop {
            let byte = data[*pos];
            *pos += 1;
            value = (value << 7) | (byte & 0x7F) as u32;
            if byte & 0x80 == 0 {
                return value;
            }
        }
    }

    #[test]
    fn test_base128() {
        assert_eq!(base128(0), vec![0x00]);
        assert_eq!(base128(127), vec![0x7F]);
        assert_eq!(base128(128), vec![0x81, 0x00]);
        assert_eq!(base128(16384), vec![0x81, 0x80, 0x00]);
        assert_eq!(base128(u32::MAX), vec![0x8F, 0xFF, 0xFF, 0xFF, 0x7F]);
    }

    #[test]
    fn test_known_tag_table_is_complete() {
        assert_eq!(KNOWN_TAGS[0], b"cmap");
        assert_eq!(KNOWN_TAGS[10], b"glyf");
        assert_eq!(KNOWN_TAGS[11], b"loca");
        assert_eq!(KNOWN_TAGS[62], b"Sill");
    }

    #[test]
    fn test_directory_and_stream_round_trip() {
        let ttf = sample_font(11);
        let font = SfntFont::parse(&ttf).unwrap();
        let woff2 = encode(&ttf).unwrap();

        assert_eq!(&woff2[0..4], b"wOF2");
        assert_eq!(
            u32::from_be_bytes(woff2[8..12].try_into().unwrap()) as usize,
            woff2.len()
        );
        assert_eq!(woff2.len() % 4, 0);
        assert_eq!(u16::from_be_bytes([woff2[12], woff2[13]]), font.tables.len() as u16);
        assert_eq!(
            u32::from_be_bytes(woff2[16..20].try_into().unwrap()) as usize,
            ttf.len()
        );
        let compressed_len = u32::from_be_bytes(woff2[20..24].try_into().unwrap()) as usize;

        // 解析目录
        let mut pos = HEADER_LEN;
        let mut expected_stream = Vec::new();
        for table in &font.tables {
            let flags = woff2[pos];
            pos += 1;
            let index = flags & 0x3F;
            let tag: [u8; 4] = if index == ARBITRARY_TAG {
                let tag = woff2[pos..pos + 4].try_into().unwrap();
                pos += 4;
                tag
            } else {
                *KNOWN_TAGS[index as usize]
            };
            assert_eq!(tag, table.tag);

            let version = flags >> 6;
            if &tag == b"glyf" || &tag == b"loca" {
                assert_eq!(version, NULL_TRANSFORM_GLYF);
            } else {
                assert_eq!(version, 0);
            }

            assert_eq!(read_base128(&woff2, &mut pos) as usize, table.data.len());
            expected_stream.extend_from_slice(table.data);
        }

        let mut decompressed = Vec::new();
        brotli::Decompressor::new(&woff2[pos..pos + compressed_len], 4096)
            .read_to_end(&mut decompressed)
            .unwrap();
        assert_eq!(decompressed, expected_stream);
    }

    #[test]
    fn test_deterministic() {
        let ttf = sample_font(2);
        assert_eq!(encode(&ttf).unwrap(), encode(&ttf).unwrap());
    }

    #[test]
    fn test_invalid_input() {
        assert!(encode(&[0u8; 64]).is_err());
    }
}
