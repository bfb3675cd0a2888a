//! Blob format detection and legacy EBCDIC text transcoding.

use rld_types::STRUCTURE_SENTINEL;

use crate::{DigestError, DigestResult};

/// The structure-header sentinel `S|` in the legacy EBCDIC (cp1047)
/// encoding. A blob starting with these two bytes is legacy structure text.
pub const LEGACY_MARKER: [u8; 2] = [0xE2, 0x4F];

/// The physical format of a structure blob, decided by its first two bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlobFormat {
    /// Superset-style structure text (starts with the ASCII `S|` sentinel).
    Text,
    /// Structure text in the legacy EBCDIC encoding.
    LegacyText,
    /// Anything else: an opaque binary structure blob.
    Binary,
}

impl BlobFormat {
    /// Detect the format by inspecting the first two bytes.
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.starts_with(STRUCTURE_SENTINEL.as_bytes()) {
            BlobFormat::Text
        } else if bytes.starts_with(&LEGACY_MARKER) {
            BlobFormat::LegacyText
        } else {
            BlobFormat::Binary
        }
    }

    /// `true` for both text variants.
    pub fn is_text(self) -> bool {
        !matches!(self, BlobFormat::Binary)
    }
}

/// Transcode legacy EBCDIC structure text to UTF-8.
///
/// Covers the text subset of cp1047: letters, digits, the punctuation that
/// occurs in structure definition text, and space/TAB/CR/LF. Offsets in
/// errors are relative to the input slice.
pub fn transcode_legacy(bytes: &[u8]) -> DigestResult<Vec<u8>> {
    let mut out = Vec::with_capacity(bytes.len());
    for (offset, &value) in bytes.iter().enumerate() {
        let ch = decode_byte(value).ok_or(DigestError::Unmappable { offset, value })?;
        // The table maps into ASCII only, so one input byte is one output byte.
        out.push(ch as u8);
    }
    Ok(out)
}

/// cp1047 text subset. Bytes outside the subset have no mapping.
fn decode_byte(b: u8) -> Option<char> {
    let ch = match b {
        0x05 => '\t',
        0x0D => '\r',
        0x15 => '\n',
        0x40 => ' ',
        0x4B => '.',
        0x4C => '<',
        0x4D => '(',
        0x4E => '+',
        0x4F => '|',
        0x50 => '&',
        0x5A => '!',
        0x5B => '$',
        0x5C => '*',
        0x5D => ')',
        0x5E => ';',
        0x5F => '^',
        0x60 => '-',
        0x61 => '/',
        0x6B => ',',
        0x6C => '%',
        0x6D => '_',
        0x6E => '>',
        0x6F => '?',
        0x79 => '`',
        0x7A => ':',
        0x7B => '#',
        0x7C => '@',
        0x7D => '\'',
        0x7E => '=',
        0x7F => '"',
        0x81..=0x89 => (b'a' + (b - 0x81)) as char,
        0x91..=0x99 => (b'j' + (b - 0x91)) as char,
        0xA1 => '~',
        0xA2..=0xA9 => (b's' + (b - 0xA2)) as char,
        0xAD => '[',
        0xBD => ']',
        0xC0 => '{',
        0xC1..=0xC9 => (b'A' + (b - 0xC1)) as char,
        0xD0 => '}',
        0xD1..=0xD9 => (b'J' + (b - 0xD1)) as char,
        0xE0 => '\\',
        0xE2..=0xE9 => (b'S' + (b - 0xE2)) as char,
        0xF0..=0xF9 => (b'0' + (b - 0xF0)) as char,
        _ => return None,
    };
    Some(ch)
}

/// Inverse of the decode table, for the characters tests use.
#[cfg(test)]
pub(crate) fn encode_legacy(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            (0u8..=255)
                .find(|&b| decode_byte(b) == Some(c))
                .unwrap_or_else(|| panic!("no legacy encoding for {c:?}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_is_the_legacy_sentinel() {
        assert_eq!(encode_legacy("S|"), LEGACY_MARKER.to_vec());
    }

    #[test]
    fn detect_text() {
        assert_eq!(BlobFormat::detect(b"S|J9JavaVM||\n"), BlobFormat::Text);
        assert!(BlobFormat::detect(b"S|").is_text());
    }

    #[test]
    fn detect_legacy_text() {
        let bytes = encode_legacy("S|J9JavaVM||\n");
        assert_eq!(BlobFormat::detect(&bytes), BlobFormat::LegacyText);
        assert!(BlobFormat::detect(&bytes).is_text());
    }

    #[test]
    fn detect_binary() {
        assert_eq!(BlobFormat::detect(&[0x00, 0x01, 0x02]), BlobFormat::Binary);
        assert_eq!(BlobFormat::detect(b"Sx"), BlobFormat::Binary);
        assert_eq!(BlobFormat::detect(b""), BlobFormat::Binary);
        assert!(!BlobFormat::detect(b"blob").is_text());
    }

    #[test]
    fn transcode_round_trips_structure_text() {
        let text = "S|J9JavaVM|J9JavaVMPointer|\nF|mainThread|J9VMThread*|struct J9VMThread*\nC|J9_FLAG_0\n";
        let legacy = encode_legacy(text);
        assert_eq!(transcode_legacy(&legacy).unwrap(), text.as_bytes());
    }

    #[test]
    fn transcode_covers_identifier_characters() {
        let text = "abcdefghijklmnopqrstuvwxyz ABCDEFGHIJKLMNOPQRSTUVWXYZ 0123456789 _[](){}<>*&:;,.+-/=#$%";
        let legacy = encode_legacy(text);
        assert_eq!(transcode_legacy(&legacy).unwrap(), text.as_bytes());
    }

    #[test]
    fn unmappable_byte_is_a_hard_error() {
        let mut bytes = encode_legacy("S|Foo");
        bytes.push(0xFF);
        let err = transcode_legacy(&bytes).unwrap_err();
        assert_eq!(
            err,
            DigestError::Unmappable {
                offset: bytes.len() - 1,
                value: 0xFF
            }
        );
    }
}
