//! The persisted key index for the Runtime Layout Database.
//!
//! [`KeyMap`] maps every recorded [`StructureKey`] to the [`Fingerprint`] of
//! its blob. The whole map lives in memory between loads and is rewritten in
//! full on every save, one line per entry in key order, so the file is
//! deterministic for a given set of entries.
//!
//! File format (`keymap.idx`):
//!
//! ```text
//! <platform>.<buildId> <fingerprint>
//! ```
//!
//! parsed by splitting each line at the first space, then the key at the
//! first dot.
//!
//! [`StructureKey`]: rld_types::StructureKey
//! [`Fingerprint`]: rld_types::Fingerprint

pub mod error;
pub mod keymap;

pub use error::{KeymapError, KeymapResult};
pub use keymap::{KeyMap, KEYMAP_FILE_NAME};
