//! # WOFF 1.0 编码器
//!
//! TTF -> WOFF：逐表 zlib 压缩（压缩后更小才采用），4 字节对齐。
//!
//! ## 文件布局
//! ```text
//! WOFFHeader (44 字节)
//! TableDirectoryEntry × numTables (每项 20 字节，按 tag 升序)
//! 表数据（压缩或原样，4 字节对齐）
//! ```
//!
//! ## 依赖关系
//! - 被 `pipeline/font.rs` 调用
//! - 使用 `codecs/sfnt.rs` 读取表目录
//! - 使用 `flate2` 压缩

use super::sfnt::{pad4, table_checksum, SfntFont};
use crate::error::{AssetError, Result};

use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::Write;

const SIGNATURE: u32 = u32::from_be_bytes(*b"wOFF");
const HEADER_LEN: usize = 44;
const DIR_ENTRY_LEN: usize = 20;

/// 把 TTF 字节编码为 WOFF
pub fn encode(ttf: &[u8]) -> Result<Vec<u8>> {
    let font = SfntFont::parse(ttf)?;

    let mut directory = Vec::with_capacity(font.tables.len() * DIR_ENTRY_LEN);
    let mut body = Vec::new();
    let mut offset = HEADER_LEN + DIR_ENTRY_LEN * font.tables.len();

    for table in &font.tables {
        let compressed = zlib(table.data)?;
        let stored: &[u8] = if compressed.len() < table.data.len() {
            &compressed
        } else {
            table.data
        };

        directory.extend_from_slice(&table.tag);
        directory.extend_from_slice(&(offset as u32).to_be_bytes());
        directory.extend_from_slice(&(stored.len() as u32).to_be_bytes());
        directory.extend_from_slice(&(table.data.len() as u32).to_be_bytes());
        directory.extend_from_slice(&table_checksum(&table.tag, table.data).to_be_bytes());

        body.extend_from_slice(stored);
        body.resize(pad4(body.len()), 0);
        offset = HEADER_LEN + DIR_ENTRY_LEN * font.tables.len() + body.len();
    }

    let total_len = HEADER_LEN + directory.len() + body.len();

    let mut out = Vec::with_capacity(total_len);
    out.extend_from_slice(&SIGNATURE.to_be_bytes());
    out.extend_from_slice(&font.flavor.to_be_bytes());
    out.extend_from_slice(&(total_len as u32).to_be_bytes());
    out.extend_from_slice(&(font.tables.len() as u16).to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes()); // reserved
    out.extend_from_slice(&font.total_sfnt_size().to_be_bytes());
    out.extend_from_slice(&1u16.to_be_bytes()); // majorVersion
    out.extend_from_slice(&0u16.to_be_bytes()); // minorVersion
    out.extend_from_slice(&[0u8; 20]); // 无元数据块与私有数据块
    out.extend_from_slice(&directory);
    out.extend_from_slice(&body);

    Ok(out)
}

fn zlib(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder
        .write_all(data)
        .map_err(|e| AssetError::conversion("ttf", "woff", e))?;
    encoder
        .finish()
        .map_err(|e| AssetError::conversion("ttf", "woff", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codecs::sfnt::testing::sample_font;
    use flate2::read::ZlibDecoder;
    use std::io::Read;

    fn u32_at(data: &[u8], at: usize) -> u32 {
        u32::from_be_bytes(data[at..at + 4].try_into().unwrap())
    }

    #[test]
    fn test_header_fields() {
        let ttf = sample_font(7);
        let woff = encode(&ttf).unwrap();

        assert_eq!(&woff[0..4], b"wOFF");
        assert_eq!(u32_at(&woff, 4), 0x0001_0000);
        assert_eq!(u32_at(&woff, 8) as usize, woff.len());
        assert_eq!(u16::from_be_bytes([woff[12], woff[13]]), 7);
        assert_eq!(u32_at(&woff, 16) as usize, ttf.len());
        assert_eq!(woff.len() % 4, 0);
    }

    #[test]
    fn test_tables_round_trip() {
        let ttf = sample_font(5);
        let font = SfntFont::parse(&ttf).unwrap();
        let woff = encode(&ttf).unwrap();

        for (i, table) in font.tables.iter().enumerate() {
            let entry = HEADER_LEN + i * DIR_ENTRY_LEN;
            assert_eq!(&woff[entry..entry + 4], &table.tag);

            let offset = u32_at(&woff, entry + 4) as usize;
            let comp_len = u32_at(&woff, entry + 8) as usize;
            let orig_len = u32_at(&woff, entry + 12) as usize;
            assert_eq!(offset % 4, 0);
            assert_eq!(orig_len, table.data.len());
            assert_eq!(u32_at(&woff, entry + 16), table.checksum);

            let stored = &woff[offset..offset + comp_len];
            let restored = if comp_len < orig_len {
                let mut out = Vec::new();
                ZlibDecoder::new(stored).read_to_end(&mut out).unwrap();
                out
            } else {
                stored.to_vec()
            };
            assert_eq!(restored, table.data);
        }
    }

    #[test]
    fn test_deterministic() {
        let ttf = sample_font(9);
        assert_eq!(encode(&ttf).unwrap(), encode(&ttf).unwrap());
    }

    #[test]
    fn test_invalid_input() {
        let err = encode(b"definitely not a font").unwrap_err();
        assert!(matches!(err, AssetError::InvalidFont { .. }));
    }
}
