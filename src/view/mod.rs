//! view
//!
//! Guarded views over a value graph.
//!
//! # Modules
//!
//! - [`node`] - [`NodeView`], the intercepting view over an object or array
//! - [`leaf`] - [`LeafView`], a primitive that can still be frozen or locked
//! - [`callable`] - [`CallableView`], a callable that can still be frozen or locked
//!
//! # Architecture
//!
//! [`guard`] turns a root object or array into a [`NodeView`] at the root
//! address. Every read through a node view returns a fresh [`Guarded`]
//! value carrying the child's address and a handle to the root's metadata.
//! Views are never cached: two reads of the same key give two independent
//! views over the same underlying slot.
//!
//! # Example
//!
//! ```
//! use latchwork::{guard, GuardError, Value};
//!
//! let view = guard(Value::object([("x", "s")])).unwrap();
//!
//! view.get("x").unwrap().into_leaf().unwrap().lock().unwrap();
//!
//! assert!(view.set("x", "t").is_ok());
//! assert!(matches!(view.set("x", 5), Err(GuardError::TypeLocked { .. })));
//! ```

pub mod callable;
pub mod leaf;
pub mod node;

pub use callable::CallableView;
pub use leaf::LeafView;
pub use node::NodeView;

use crate::core::config::{ConfigError, GuardConfig};
use crate::core::errors::GuardError;
use crate::core::value::Value;

/// Guard a root object or array with the default configuration.
///
/// Guarding the same container handle twice returns views sharing one set
/// of guard metadata; markers placed through either are seen by both.
///
/// # Errors
///
/// Returns [`GuardError::NonObjectRoot`] if `root` is not an object or array.
///
/// # Example
///
/// ```
/// use latchwork::{guard, GuardError, TypeTag, Value};
///
/// assert_eq!(
///     guard(Value::from(5)).unwrap_err(),
///     GuardError::NonObjectRoot { found: TypeTag::Number }
/// );
/// ```
pub fn guard(root: Value) -> Result<NodeView, GuardError> {
    guard_with(root, GuardConfig::default())
}

/// Guard a root object or array with an explicit configuration.
///
/// The configuration is fixed when a root is first guarded. If `root`
/// already carries metadata from an earlier `guard`, that metadata and its
/// configuration are reused and `config` is ignored.
///
/// # Errors
///
/// - [`GuardError::InvalidConfig`] if `config` fails validation
/// - [`GuardError::NonObjectRoot`] if `root` is not an object or array
pub fn guard_with(root: Value, config: GuardConfig) -> Result<NodeView, GuardError> {
    config.validate().map_err(|e| GuardError::InvalidConfig {
        message: match e {
            ConfigError::InvalidValue(message) => message,
            other => other.to_string(),
        },
    })?;
    NodeView::root(root, config)
}

/// The result of reading a key through a [`NodeView`].
#[derive(Debug, Clone)]
pub enum Guarded {
    /// A nested object or array.
    Node(NodeView),
    /// A boolean, number, or string.
    Leaf(LeafView),
    /// A callable, when the graph guards callables.
    Callable(CallableView),
    /// A value returned without a view: `Null`, or a callable when the graph
    /// does not guard callables.
    Value(Value),
    /// The key is not present, or a reserved guard key was read.
    Absent,
}

impl Guarded {
    pub fn into_node(self) -> Option<NodeView> {
        match self {
            Guarded::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn into_leaf(self) -> Option<LeafView> {
        match self {
            Guarded::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    pub fn into_callable(self) -> Option<CallableView> {
        match self {
            Guarded::Callable(callable) => Some(callable),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Guarded::Absent)
    }

    /// The underlying value, without any view.
    ///
    /// Containers come back as handles to the same storage; writing through
    /// them bypasses every guard.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Guarded::Node(node) => Some(node.to_value()),
            Guarded::Leaf(leaf) => Some(leaf.into_value()),
            Guarded::Callable(callable) => Some(Value::Callable(callable.into_callable())),
            Guarded::Value(value) => Some(value),
            Guarded::Absent => None,
        }
    }
}
