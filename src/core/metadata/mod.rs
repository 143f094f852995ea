//! core::metadata
//!
//! Guard metadata for a guarded graph.
//!
//! # Modules
//!
//! - [`store`] - The append-only store of frozen and type-locked addresses
//!
//! # Architecture
//!
//! One [`MetadataStore`] exists per guarded root. It is created the first
//! time the root is guarded, attached to the root's container handle, and
//! shared through a [`MetadataRef`] by every view derived from that root.
//! Views never copy it.

pub mod store;

pub use store::{GuardKind, MetadataRef, MetadataStore};
