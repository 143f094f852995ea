//! view::leaf
//!
//! Guardable primitives.
//!
//! A [`LeafView`] is what a node view hands back for a boolean, number, or
//! string. It dereferences to the [`Value`] it holds and compares equal to
//! plain Rust primitives, so it can be used wherever the primitive would be,
//! while still offering `freeze()` and `lock()` for its own address.
//!
//! A leaf view is a snapshot of the value at read time. It does not follow
//! later writes; read the key again to see them.

use std::fmt;
use std::ops::{Add, Deref};

use crate::core::errors::GuardError;
use crate::core::metadata::MetadataRef;
use crate::core::ops;
use crate::core::types::Address;
use crate::core::value::Value;

/// A primitive value read through a guarded view.
///
/// # Example
///
/// ```
/// use latchwork::{guard, Value};
///
/// let view = guard(Value::object([("n", 2), ("s", 0)])).unwrap();
/// let n = view.get("n").unwrap().into_leaf().unwrap();
///
/// assert_eq!(n, 2);
/// assert_eq!(&n + 3, Value::from(5));
/// assert_eq!(&n + " apples", Value::from("2 apples"));
/// assert!(n.truthy());
/// assert_eq!(n.as_f64(), Some(2.0));
/// ```
#[derive(Clone)]
pub struct LeafView {
    value: Value,
    address: Address,
    metadata: MetadataRef,
}

impl LeafView {
    pub(crate) fn new(value: Value, address: Address, metadata: MetadataRef) -> Self {
        Self {
            value,
            address,
            metadata,
        }
    }

    /// Freeze this leaf's address.
    pub fn freeze(&self) -> Result<(), GuardError> {
        ops::freeze(&self.address, &self.metadata)
    }

    /// Type-lock this leaf's address.
    pub fn lock(&self) -> Result<(), GuardError> {
        ops::lock(&self.address, &self.metadata)
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }
}

impl Deref for LeafView {
    type Target = Value;

    fn deref(&self) -> &Value {
        &self.value
    }
}

impl From<LeafView> for Value {
    fn from(leaf: LeafView) -> Self {
        leaf.value
    }
}

impl fmt::Display for LeafView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

impl fmt::Debug for LeafView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeafView")
            .field("value", &self.value)
            .field("address", &self.address.to_string())
            .finish_non_exhaustive()
    }
}

impl PartialEq for LeafView {
    /// Leaves compare by value only; their addresses are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl PartialEq<Value> for LeafView {
    fn eq(&self, other: &Value) -> bool {
        self.value == *other
    }
}

impl PartialEq<bool> for LeafView {
    fn eq(&self, other: &bool) -> bool {
        self.value.as_bool() == Some(*other)
    }
}

impl PartialEq<f64> for LeafView {
    fn eq(&self, other: &f64) -> bool {
        self.value.as_f64() == Some(*other)
    }
}

impl PartialEq<i32> for LeafView {
    fn eq(&self, other: &i32) -> bool {
        self.value.as_f64() == Some(f64::from(*other))
    }
}

impl PartialEq<str> for LeafView {
    fn eq(&self, other: &str) -> bool {
        self.value.as_str() == Some(other)
    }
}

impl PartialEq<&str> for LeafView {
    fn eq(&self, other: &&str) -> bool {
        self.value.as_str() == Some(*other)
    }
}

impl PartialEq<String> for LeafView {
    fn eq(&self, other: &String) -> bool {
        self.value.as_str() == Some(other.as_str())
    }
}

/// Addition as a dynamic language does it: numbers (and booleans, as 0/1)
/// add numerically; if either side is text, both sides are concatenated.
fn dynamic_add(lhs: &Value, rhs: &Value) -> Value {
    fn numeric(v: &Value) -> Option<f64> {
        match v {
            Value::Number(n) => Some(*n),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Null => Some(0.0),
            _ => None,
        }
    }

    match (numeric(lhs), numeric(rhs)) {
        (Some(a), Some(b)) => Value::Number(a + b),
        _ => Value::Text(format!("{}{}", lhs, rhs)),
    }
}

impl<T: Into<Value>> Add<T> for &LeafView {
    type Output = Value;

    fn add(self, rhs: T) -> Value {
        dynamic_add(&self.value, &rhs.into())
    }
}

impl<T: Into<Value>> Add<T> for LeafView {
    type Output = Value;

    fn add(self, rhs: T) -> Value {
        dynamic_add(&self.value, &rhs.into())
    }
}
