//! The fingerprint computation and the stored-form normalization.

use std::borrow::Cow;

use rld_types::Fingerprint;

use crate::encoding::{transcode_legacy, BlobFormat, LEGACY_MARKER};
use crate::DigestResult;

/// Domain tag prepended to every fingerprint computation, so structure-blob
/// fingerprints can never collide with another hash use of the same bytes.
const DOMAIN: &str = "rld-structure-v1";

/// Compute the deterministic content fingerprint of a blob.
///
/// For a legacy-encoded text blob the hash input is the two marker bytes
/// untranscoded, followed by the transcoded remainder. The marker therefore
/// keeps legacy and modern encodings of the same logical text distinct,
/// which matches the historical behavior this store inherits.
pub fn fingerprint(bytes: &[u8]) -> DigestResult<Fingerprint> {
    let mut hasher = blake3::Hasher::new();
    hasher.update(DOMAIN.as_bytes());
    hasher.update(b":");

    match BlobFormat::detect(bytes) {
        BlobFormat::LegacyText => {
            let text = transcode_legacy(bytes)?;
            hasher.update(&bytes[..LEGACY_MARKER.len()]);
            hasher.update(&text[LEGACY_MARKER.len()..]);
        }
        _ => {
            hasher.update(bytes);
        }
    }

    Ok(Fingerprint::new(hex::encode(hasher.finalize().as_bytes())))
}

/// The form in which the blob is physically stored.
///
/// Legacy text is transcoded in full, marker included, so the stored text
/// begins with the plain ASCII sentinel and re-parses cleanly. Everything
/// else is stored verbatim.
pub fn normalize(bytes: &[u8]) -> DigestResult<Cow<'_, [u8]>> {
    match BlobFormat::detect(bytes) {
        BlobFormat::LegacyText => Ok(Cow::Owned(transcode_legacy(bytes)?)),
        _ => Ok(Cow::Borrowed(bytes)),
    }
}
