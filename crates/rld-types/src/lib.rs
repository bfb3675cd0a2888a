//! Foundation types for the Runtime Layout Database (RLD).
//!
//! RLD records, for a runtime whose internal memory layouts vary across
//! builds and hardware platforms, the exact binary layout of each internal
//! data structure. This crate provides the value types shared by every other
//! RLD crate.
//!
//! # Key Types
//!
//! - [`StructureKey`] — the `(platform, build id)` identity of one recorded
//!   layout, with its canonical `platform.buildId` text form
//! - [`Fingerprint`] — deterministic content-derived identifier used for
//!   blob deduplication
//! - [`StructureDescriptor`] / [`FieldDescriptor`] / [`ConstantDescriptor`]
//!   — the parsed representation of one structure's layout, as produced by
//!   an external structure parser

pub mod descriptor;
pub mod error;
pub mod fingerprint;
pub mod key;

pub use descriptor::{
    ConstantDescriptor, FieldDescriptor, StructureDescriptor, STRUCTURE_SENTINEL,
};
pub use error::TypeError;
pub use fingerprint::Fingerprint;
pub use key::StructureKey;
