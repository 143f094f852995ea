//! Latchwork - selective freeze and type-lock guards over a value graph
//!
//! Latchwork wraps an in-memory graph of objects, arrays, primitives and
//! callables in a guarded view. Reads and writes through the view behave
//! like reads and writes on the graph itself, except that any address in the
//! graph can be marked:
//!
//! - **frozen** - no further writes at that address or anywhere below it
//! - **type-locked** - writes must keep the type of the value they replace
//!
//! Markers are placed from the view itself, at any depth, by calling
//! `freeze()` or `lock()` on the child you want to guard.
//!
//! # Architecture
//!
//! - [`core`] - Value model, addresses, guard metadata, guard operations,
//!   configuration, and errors
//! - [`view`] - The guarded views: nodes, leaves, and callables
//!
//! # Example
//!
//! ```
//! use latchwork::{guard, GuardError, Value};
//!
//! let root = Value::object([("a", Value::object([("b", Value::from(1))]))]);
//! let view = guard(root).unwrap();
//!
//! let a = view.get("a").unwrap().into_node().unwrap();
//! a.freeze().unwrap();
//!
//! assert!(matches!(a.set("b", 2), Err(GuardError::FrozenProperty { .. })));
//! assert!(view.set("c", 1).is_ok());
//! ```
//!
//! # Invariants
//!
//! 1. Guard markers are append-only; nothing unfreezes or unlocks an address
//! 2. The root itself can never be frozen or locked, only its properties
//! 3. Writes are check-then-write; a rejected write mutates nothing
//! 4. Guard metadata is never observable except through enforcement

pub mod core;
pub mod view;

pub use crate::core::config::GuardConfig;
pub use crate::core::errors::GuardError;
pub use crate::core::types::{Address, Key};
pub use crate::core::value::{ArrayRef, Callable, ObjectRef, TypeTag, Value};
pub use crate::view::{guard, guard_with, CallableView, Guarded, LeafView, NodeView};
