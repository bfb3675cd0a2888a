//! The external structure-parser seam.

use rld_digest::BlobFormat;
use rld_types::StructureDescriptor;
use thiserror::Error;

/// Failure reported by an external structure parser.
#[derive(Debug, Error)]
#[error("structure parse error: {0}")]
pub struct ParseError(pub String);

/// Turns raw blob bytes into structure descriptors.
///
/// The store hands over the blob in its stored (normalized) form together
/// with the format it detected from the blob's leading marker bytes, so a
/// parser can select its text or binary front end without re-sniffing.
pub trait StructureParser {
    fn parse(&self, bytes: &[u8], format: BlobFormat)
        -> Result<Vec<StructureDescriptor>, ParseError>;
}
