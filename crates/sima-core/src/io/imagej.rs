//! Decoder for the binary ImageJ metadata tag (IJMetadata).
//!
//! Layout: a 4-byte magic (`IJIJ` big-endian, `JIJI` little-endian), then
//! `(type, count)` u32 pairs, then the entry payloads. The companion
//! IJMetadataByteCounts tag gives the header length followed by the length of
//! every payload, in order. Only the `info` entry is decoded.

use std::io::Cursor;

use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt};
use tracing::debug;

const MAGIC_BE: &[u8; 4] = b"IJIJ";
const MAGIC_LE: &[u8; 4] = b"JIJI";
const INFO_TYPE: u32 = 0x696e_666f; // "info"

/// Extract the `info` string from an ImageJ metadata blob.
///
/// Returns `None` when the blob is malformed or has no `info` entry.
pub fn decode_info(data: &[u8], byte_counts: &[u32]) -> Option<String> {
    if data.len() < 4 || byte_counts.is_empty() {
        return None;
    }
    let big_endian = match &data[..4] {
        m if m == MAGIC_BE => true,
        m if m == MAGIC_LE => false,
        _ => {
            debug!("ImageJ metadata has no IJIJ/JIJI magic");
            return None;
        }
    };
    if big_endian {
        decode_info_with::<BigEndian>(data, byte_counts)
    } else {
        decode_info_with::<LittleEndian>(data, byte_counts)
    }
}

fn decode_info_with<B: ByteOrder>(data: &[u8], byte_counts: &[u32]) -> Option<String> {
    let header_len = byte_counts[0] as usize;
    if header_len < 4 || header_len > data.len() {
        return None;
    }
    let entry_types = (header_len - 4) / 8;

    let mut cursor = Cursor::new(&data[4..header_len]);
    let mut header = Vec::with_capacity(entry_types);
    for _ in 0..entry_types {
        let kind = cursor.read_u32::<B>().ok()?;
        let count = cursor.read_u32::<B>().ok()?;
        header.push((kind, count));
    }

    let mut pos = header_len;
    let mut counter = 0usize;
    for (kind, count) in header {
        for _ in 0..count {
            counter += 1;
            let len = *byte_counts.get(counter)? as usize;
            let end = pos.checked_add(len).filter(|&end| end <= data.len())?;
            if kind == INFO_TYPE {
                return Some(decode_utf16::<B>(&data[pos..end]));
            }
            pos = end;
        }
    }
    None
}

fn decode_utf16<B: ByteOrder>(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes.chunks_exact(2).map(B::read_u16).collect();
    String::from_utf16_lossy(&units)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_be(info: &str) -> (Vec<u8>, Vec<u32>) {
        let payload: Vec<u8> = info.encode_utf16().flat_map(|u| u.to_be_bytes()).collect();
        let mut data = MAGIC_BE.to_vec();
        data.extend_from_slice(&INFO_TYPE.to_be_bytes());
        data.extend_from_slice(&1u32.to_be_bytes());
        let header_len = data.len() as u32;
        data.extend_from_slice(&payload);
        (data, vec![header_len, payload.len() as u32])
    }

    #[test]
    fn test_decode_big_endian_info() {
        let (data, counts) = encode_be("Title=A5\n<OME/>");
        assert_eq!(decode_info(&data, &counts).as_deref(), Some("Title=A5\n<OME/>"));
    }

    #[test]
    fn test_decode_little_endian_info() {
        let info = "hello";
        let payload: Vec<u8> = info.encode_utf16().flat_map(|u| u.to_le_bytes()).collect();
        let mut data = MAGIC_LE.to_vec();
        data.extend_from_slice(&INFO_TYPE.to_le_bytes());
        data.extend_from_slice(&1u32.to_le_bytes());
        data.extend_from_slice(&payload);
        let counts = vec![12, payload.len() as u32];
        assert_eq!(decode_info(&data, &counts).as_deref(), Some("hello"));
    }

    #[test]
    fn test_bad_magic() {
        assert_eq!(decode_info(b"XXXX0000", &[4]), None);
    }

    #[test]
    fn test_truncated_payload() {
        let (data, mut counts) = encode_be("abc");
        counts[1] += 10;
        assert_eq!(decode_info(&data, &counts), None);
    }
}
