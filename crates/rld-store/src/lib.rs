//! The Runtime Layout Database store.
//!
//! [`StructureStore`] composes the key index, the content store, the digest
//! layer, and the superset document behind one handle:
//!
//! - `add` records a structure blob under its `(platform, build id)` key,
//!   deduplicating identical content and refusing to let one key ever
//!   denote two different layouts.
//! - `get` / `remove` are the read and retire paths; a blob survives until
//!   the last key referencing it is removed.
//! - `update_superset` re-parses the blob most recently added and folds its
//!   structures into the persisted superset document.
//!
//! The handle owns all of its state; there are no process-wide caches.
//! Operations are synchronous and single-threaded: the store is
//! driven serially by one offline ingestion process, and multi-process
//! deployments need external mutual exclusion around the whole directory.
//!
//! # Example
//!
//! ```no_run
//! use rld_store::{StoreConfig, StructureStore, StructureParser, ParseError, AddOutcome};
//! use rld_digest::BlobFormat;
//! use rld_types::{StructureDescriptor, StructureKey};
//!
//! struct NullParser;
//!
//! impl StructureParser for NullParser {
//!     fn parse(&self, _: &[u8], _: BlobFormat) -> Result<Vec<StructureDescriptor>, ParseError> {
//!         Ok(Vec::new())
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StoreConfig::new("/var/lib/rld");
//! let mut store = StructureStore::open(
//!     config,
//!     Box::new(NullParser),
//!     Box::new(|raw: &str| raw.to_string()),
//! )?;
//!
//! let key = StructureKey::new("linux_x64", "b100")?;
//! let outcome = store.add(&key, &b"S|Heap||\n"[..], true)?;
//! assert_eq!(outcome, AddOutcome::Inserted);
//! store.update_superset()?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod store;
pub mod traits;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use store::{AddOutcome, StructureStore};
pub use traits::{ParseError, StructureParser};

// Re-exported so parser implementations need only this crate.
pub use rld_digest::BlobFormat;
