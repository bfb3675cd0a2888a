//! The single-entry container codec.
//!
//! On-disk format, little-endian framing:
//!
//! ```text
//! [4  bytes] magic "RLDC"
//! [4  bytes] format version (u32, = 1)
//! [4  bytes] entry-name length (u32)
//! [N  bytes] entry name
//! [4  bytes] payload length, uncompressed (u32)
//! [4  bytes] payload length, compressed (u32)
//! [4  bytes] CRC32 of the compressed payload (u32)
//! [M  bytes] zstd-compressed payload
//! [32 bytes] BLAKE3 checksum of all preceding bytes
//! ```

use crate::error::{BlobError, BlobResult};

/// Magic bytes at the start of every container.
pub const CONTAINER_MAGIC: &[u8; 4] = b"RLDC";

/// Current container format version.
pub const CONTAINER_VERSION: u32 = 1;

/// zstd compression level for payloads.
const ZSTD_LEVEL: i32 = 3;

/// BLAKE3 trailer length.
const TRAILER_LEN: usize = 32;

/// Fixed header bytes before the entry name: magic + version + name length.
const FIXED_HEADER_LEN: usize = 12;

/// Encode one logical entry into container bytes.
pub fn encode(entry_name: &str, payload: &[u8]) -> BlobResult<Vec<u8>> {
    let compressed = zstd::encode_all(payload, ZSTD_LEVEL)
        .map_err(|e| BlobError::Compression(e.to_string()))?;

    let mut out = Vec::with_capacity(FIXED_HEADER_LEN + entry_name.len() + 12 + compressed.len() + TRAILER_LEN);
    out.extend_from_slice(CONTAINER_MAGIC);
    out.extend_from_slice(&CONTAINER_VERSION.to_le_bytes());
    out.extend_from_slice(&(entry_name.len() as u32).to_le_bytes());
    out.extend_from_slice(entry_name.as_bytes());
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(&(compressed.len() as u32).to_le_bytes());
    out.extend_from_slice(&crc32fast::hash(&compressed).to_le_bytes());
    out.extend_from_slice(&compressed);

    let checksum = blake3::hash(&out);
    out.extend_from_slice(checksum.as_bytes());
    Ok(out)
}

/// Decode container bytes into `(entry name, payload)`.
///
/// Verifies the trailer checksum, magic, version, payload CRC, and both
/// length fields before returning.
pub fn decode(bytes: &[u8]) -> BlobResult<(String, Vec<u8>)> {
    if bytes.len() < FIXED_HEADER_LEN + 12 + TRAILER_LEN {
        return Err(BlobError::Corrupt {
            reason: "container too short".into(),
        });
    }

    let (body, trailer) = bytes.split_at(bytes.len() - TRAILER_LEN);
    if blake3::hash(body).as_bytes() != trailer {
        return Err(BlobError::ChecksumMismatch);
    }

    if &body[0..4] != CONTAINER_MAGIC {
        return Err(BlobError::InvalidMagic {
            actual: String::from_utf8_lossy(&body[0..4]).into_owned(),
        });
    }

    let version = read_u32(body, 4);
    if version != CONTAINER_VERSION {
        return Err(BlobError::UnsupportedVersion(version));
    }

    let name_len = read_u32(body, 8) as usize;
    let name_end = FIXED_HEADER_LEN + name_len;
    if body.len() < name_end + 12 {
        return Err(BlobError::Corrupt {
            reason: "entry name overruns container".into(),
        });
    }
    let entry_name = std::str::from_utf8(&body[FIXED_HEADER_LEN..name_end])
        .map_err(|_| BlobError::Corrupt {
            reason: "entry name is not UTF-8".into(),
        })?
        .to_string();

    let raw_len = read_u32(body, name_end) as usize;
    let compressed_len = read_u32(body, name_end + 4) as usize;
    let expected_crc = read_u32(body, name_end + 8);

    let payload_start = name_end + 12;
    if body.len() - payload_start != compressed_len {
        return Err(BlobError::Corrupt {
            reason: "compressed payload length mismatch".into(),
        });
    }
    let compressed = &body[payload_start..];

    if crc32fast::hash(compressed) != expected_crc {
        return Err(BlobError::CrcMismatch);
    }

    let payload =
        zstd::decode_all(compressed).map_err(|e| BlobError::Decompression(e.to_string()))?;
    if payload.len() != raw_len {
        return Err(BlobError::Corrupt {
            reason: "uncompressed payload length mismatch".into(),
        });
    }

    Ok((entry_name, payload))
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[offset..offset + 4]);
    u32::from_le_bytes(buf)
}
