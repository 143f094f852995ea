//! core::ops
//!
//! Guard operations and write enforcement.
//!
//! # Modules
//!
//! - [`guard`] - `freeze`, `lock`, and the prefix-matching lookups
//! - [`enforce`] - The check applied before every write
//!
//! # Architecture
//!
//! Every operation is a stateless function over an [`Address`] and the
//! root's shared metadata. Views call into this module; nothing here knows
//! about views.
//!
//! Every write through a view:
//! 1. Computes the child address
//! 2. Fails if any frozen marker is a prefix of it
//! 3. Fails if any type-lock marker is a prefix of it and the type tag would change
//! 4. Only then touches the graph
//!
//! [`Address`]: crate::core::types::Address

pub mod enforce;
pub mod guard;

pub use enforce::check_write;
pub use guard::{freeze, is_frozen, is_type_locked, lock};
