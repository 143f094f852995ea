//! core::errors
//!
//! Error types for guarded graph operations.
//!
//! # Design
//!
//! Every failure is local, synchronous, and a contract violation by the
//! caller; none is transient. A failed operation mutates neither the graph
//! nor the guard metadata.
//!
//! # Example
//!
//! ```
//! use latchwork::core::errors::GuardError;
//! use latchwork::core::types::Address;
//!
//! let err = GuardError::FrozenProperty {
//!     address: Address::from_keys(["a", "b"]),
//! };
//! assert_eq!(err.to_string(), "property 'a.b' is frozen");
//! ```

use thiserror::Error;

use crate::core::types::{Address, Key};
use crate::core::value::TypeTag;

/// Errors from guarded reads, writes, and guard operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GuardError {
    /// The value passed to `guard` is not an object or array.
    #[error("cannot guard a non-object root (found {found})")]
    NonObjectRoot { found: TypeTag },

    /// A reserved key was read or written directly.
    #[error("'{key}' is a reserved property")]
    ReservedProperty { key: String },

    /// `freeze` was called on the root view.
    #[error("the root cannot be frozen")]
    RootFreeze,

    /// `lock` was called on the root view.
    #[error("the root cannot be type-locked")]
    RootLock,

    /// A write hit an address covered by a freeze marker.
    #[error("property '{address}' is frozen")]
    FrozenProperty { address: Address },

    /// A write would change the type tag at a type-locked address.
    #[error("property '{address}' is type-locked to {expected}, got {found}")]
    TypeLocked {
        address: Address,
        expected: TypeTag,
        found: TypeTag,
    },

    /// The configuration passed to `guard_with` failed validation.
    #[error("invalid guard config: {message}")]
    InvalidConfig { message: String },

    /// An array was written with a key that is not an index, or with an
    /// index past its end.
    #[error("'{key}' is not a valid index for array '{address}'")]
    InvalidIndex { address: Address, key: Key },
}

impl GuardError {
    /// The address the failed write targeted, if the error is about one.
    pub fn address(&self) -> Option<&Address> {
        match self {
            GuardError::FrozenProperty { address }
            | GuardError::TypeLocked { address, .. }
            | GuardError::InvalidIndex { address, .. } => Some(address),
            _ => None,
        }
    }
}
