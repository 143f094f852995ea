//! view::node
//!
//! The intercepting view over an object or array.
//!
//! # Reads
//!
//! `get(key)` first checks the reserved keys:
//! - the freeze key freezes this view's address
//! - the lock key type-locks this view's address
//! - the metadata key always fails with [`GuardError::ReservedProperty`]
//!
//! Any other key is read from the underlying container and wrapped by shape:
//! containers become [`NodeView`]s, primitives [`LeafView`]s, callables
//! [`CallableView`]s (when the graph guards callables). Null and missing keys
//! come back unwrapped.
//!
//! # Writes
//!
//! `set(key, value)` runs [`check_write`] on the child address before
//! touching the container. A rejected write leaves the graph as it was.
//!
//! # Borrowing
//!
//! The container's `RefCell` is only borrowed inside a single call and is
//! released before any view is returned, so views of the same graph can be
//! held and used in any order.

use std::fmt;

use super::{CallableView, Guarded, LeafView};
use crate::core::config::{GuardConfig, Reserved};
use crate::core::errors::GuardError;
use crate::core::metadata::{MetadataRef, MetadataStore};
use crate::core::ops::{self, check_write};
use crate::core::types::{Address, Key};
use crate::core::value::{ArrayRef, ObjectRef, Value};

/// The container behind a node view.
#[derive(Clone)]
enum Container {
    Object(ObjectRef),
    Array(ArrayRef),
}

impl Container {
    fn read(&self, key: &Key) -> Option<Value> {
        match self {
            Container::Object(map) => {
                let map = map.borrow();
                match key {
                    Key::Name(name) => map.get(name.as_str()).cloned(),
                    Key::Index(i) => map.get(i.to_string().as_str()).cloned(),
                }
            }
            Container::Array(items) => key
                .as_index()
                .and_then(|i| items.borrow().get(i).cloned()),
        }
    }
}

/// A guarded view over an object or array.
///
/// Cloning a view is cheap and shares the container and the metadata.
#[derive(Clone)]
pub struct NodeView {
    target: Container,
    address: Address,
    metadata: MetadataRef,
}

impl NodeView {
    /// Wrap a root container, attaching fresh metadata on first use.
    pub(crate) fn root(root: Value, config: GuardConfig) -> Result<Self, GuardError> {
        let target = match root {
            Value::Object(map) => Container::Object(map),
            Value::Array(items) => Container::Array(items),
            other => {
                return Err(GuardError::NonObjectRoot {
                    found: other.type_tag(),
                })
            }
        };

        let init = || MetadataStore::new(config);
        let (metadata, created) = match &target {
            Container::Object(map) => map.root_metadata_or_init(init),
            Container::Array(items) => items.root_metadata_or_init(init),
        };

        if created {
            tracing::debug!("guarding new root");
        } else {
            tracing::debug!("root already guarded, reusing its metadata");
        }

        Ok(Self {
            target,
            address: Address::root(),
            metadata,
        })
    }

    /// The address of this node. Empty for the root.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Check if this view is over an array.
    pub fn is_array(&self) -> bool {
        matches!(self.target, Container::Array(_))
    }

    /// Check if this view is over an object.
    pub fn is_object(&self) -> bool {
        matches!(self.target, Container::Object(_))
    }

    /// Read `key`, returning a guarded view of its value.
    ///
    /// Reading the freeze or lock key applies that guard to this node's
    /// address and yields [`Guarded::Absent`].
    ///
    /// # Errors
    ///
    /// - [`GuardError::ReservedProperty`] when reading the metadata key
    /// - [`GuardError::RootFreeze`] / [`GuardError::RootLock`] when reading
    ///   the freeze or lock key on the root view
    ///
    /// # Example
    ///
    /// ```
    /// use latchwork::{guard, Value};
    ///
    /// let view = guard(Value::object([("a", Value::object([("b", 1)]))])).unwrap();
    /// let a = view.get("a").unwrap().into_node().unwrap();
    /// assert_eq!(a.address().to_string(), "a");
    ///
    /// let b = a.get("b").unwrap().into_leaf().unwrap();
    /// assert_eq!(b, 1);
    /// assert_eq!(b.address().to_string(), "a.b");
    /// ```
    pub fn get(&self, key: impl Into<Key>) -> Result<Guarded, GuardError> {
        let key = key.into();

        if let Some(reserved) = self.reserved(&key) {
            return match reserved {
                Reserved::Freeze => self.freeze().map(|()| Guarded::Absent),
                Reserved::Lock => self.lock().map(|()| Guarded::Absent),
                Reserved::Meta => Err(GuardError::ReservedProperty {
                    key: key.to_name(),
                }),
            };
        }

        let address = self.address.child(key.clone());
        Ok(match self.target.read(&key) {
            Some(value) => self.wrap(value, address),
            None => Guarded::Absent,
        })
    }

    fn wrap(&self, value: Value, address: Address) -> Guarded {
        let metadata = MetadataRef::clone(&self.metadata);
        match value {
            Value::Object(map) => Guarded::Node(NodeView {
                target: Container::Object(map),
                address,
                metadata,
            }),
            Value::Array(items) => Guarded::Node(NodeView {
                target: Container::Array(items),
                address,
                metadata,
            }),
            leaf @ (Value::Bool(_) | Value::Number(_) | Value::Text(_)) => {
                Guarded::Leaf(LeafView::new(leaf, address, metadata))
            }
            Value::Callable(callable) if metadata.config().guard_callables => {
                Guarded::Callable(CallableView::new(callable, address, metadata))
            }
            other => Guarded::Value(other),
        }
    }

    /// Write `value` at `key`.
    ///
    /// On arrays, an index below the length replaces and an index equal to
    /// the length appends. Arrays never grow holes, so any larger index is
    /// rejected.
    ///
    /// # Errors
    ///
    /// - [`GuardError::ReservedProperty`] when writing a reserved key
    /// - [`GuardError::FrozenProperty`] when the child address is frozen
    /// - [`GuardError::TypeLocked`] when the child address is type-locked and
    ///   the value's type tag differs from the current one
    /// - [`GuardError::InvalidIndex`] when writing a non-index key to an
    ///   array, or an index past its end
    pub fn set(&self, key: impl Into<Key>, value: impl Into<Value>) -> Result<(), GuardError> {
        let key = key.into();
        let value = value.into();

        if self.reserved(&key).is_some() {
            return Err(GuardError::ReservedProperty {
                key: key.to_name(),
            });
        }

        let address = self.address.child(key.clone());

        match &self.target {
            Container::Object(map) => {
                let name = key.to_name();
                check_write(&address, map.borrow().get(&name), &value, &self.metadata)?;
                map.borrow_mut().insert(name, value);
            }
            Container::Array(items) => {
                let index = key.as_index();
                {
                    let current = items.borrow();
                    let slot = index.and_then(|i| current.get(i));
                    check_write(&address, slot, &value, &self.metadata)?;
                }
                let mut items = items.borrow_mut();
                match index {
                    Some(i) if i < items.len() => items[i] = value,
                    Some(i) if i == items.len() => items.push(value),
                    _ => {
                        return Err(GuardError::InvalidIndex {
                            address: self.address.clone(),
                            key,
                        })
                    }
                }
            }
        }

        tracing::trace!(%address, "write accepted");
        Ok(())
    }

    /// Append to an array through the guards.
    ///
    /// Same as `set(len, value)`.
    ///
    /// # Errors
    ///
    /// As [`NodeView::set`]; on an object view this always fails with
    /// [`GuardError::InvalidIndex`].
    pub fn push(&self, value: impl Into<Value>) -> Result<(), GuardError> {
        match &self.target {
            Container::Array(items) => {
                let len = items.borrow().len();
                self.set(Key::Index(len), value)
            }
            Container::Object(map) => Err(GuardError::InvalidIndex {
                address: self.address.clone(),
                key: Key::Index(map.borrow().len()),
            }),
        }
    }

    /// Freeze this node and everything below it.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::RootFreeze`] on the root view.
    pub fn freeze(&self) -> Result<(), GuardError> {
        ops::freeze(&self.address, &self.metadata)
    }

    /// Type-lock this node and everything below it.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::RootLock`] on the root view.
    pub fn lock(&self) -> Result<(), GuardError> {
        ops::lock(&self.address, &self.metadata)
    }

    /// The keys of the container, in order. Arrays yield their indices.
    pub fn keys(&self) -> Vec<Key> {
        match &self.target {
            Container::Object(map) => map.borrow().keys().map(Key::from).collect(),
            Container::Array(items) => (0..items.borrow().len()).map(Key::Index).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match &self.target {
            Container::Object(map) => map.borrow().len(),
            Container::Array(items) => items.borrow().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check whether `key` holds a value. Reserved keys are never present.
    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        let key = key.into();
        self.reserved(&key).is_none() && self.target.read(&key).is_some()
    }

    /// The underlying container as a value.
    ///
    /// The result is a handle to the same storage, not a copy. Writes made
    /// through it are not guarded.
    pub fn to_value(&self) -> Value {
        match &self.target {
            Container::Object(map) => Value::Object(map.clone()),
            Container::Array(items) => Value::Array(items.clone()),
        }
    }

    fn reserved(&self, key: &Key) -> Option<Reserved> {
        match key {
            Key::Name(name) => self.metadata.config().reserved.classify(name),
            Key::Index(_) => None,
        }
    }
}

impl fmt::Debug for NodeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.target {
            Container::Object(_) => "object",
            Container::Array(_) => "array",
        };
        f.debug_struct("NodeView")
            .field("kind", &kind)
            .field("address", &self.address.to_string())
            .finish_non_exhaustive()
    }
}
