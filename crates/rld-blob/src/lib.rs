//! Physical blob storage for the Runtime Layout Database.
//!
//! The content store persists exactly one blob per distinct
//! `(platform, fingerprint)` address. Each blob lives in its own
//! single-entry container file `<platform>.<fingerprint>.pack` whose one
//! logical entry is named `<platform>.<fingerprint>.blob`. Containers are
//! write-once: the same address is never rewritten, and a second write
//! attempt is an error (the facade's insertion protocol makes it
//! unreachable in normal operation).
//!
//! The container format compresses the payload with zstd and guards it with
//! a CRC32 plus a whole-file BLAKE3 trailer; see [`container`].

pub mod container;
pub mod error;
pub mod store;

pub use error::{BlobError, BlobResult};
pub use store::{ContentStore, CONTAINER_EXT, PAYLOAD_EXT};
