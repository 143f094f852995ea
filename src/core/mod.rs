//! core
//!
//! Core domain types and guard operations for Latchwork.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Key, Address
//! - [`value`] - The value graph: Value, ObjectRef, ArrayRef, Callable, TypeTag
//! - [`metadata`] - Per-root store of frozen and type-locked addresses
//! - [`ops`] - Guard operations and write enforcement
//! - [`config`] - Configuration schema and loading
//! - [`errors`] - Guard error taxonomy
//!
//! # Design Principles
//!
//! - Addresses are structured key sequences, never parsed strings
//! - Metadata is shared by reference from the root, never copied
//! - Enforcement is deterministic and order-independent

pub mod config;
pub mod errors;
pub mod metadata;
pub mod ops;
pub mod types;
pub mod value;
