//! core::types
//!
//! Strong types for addressing locations in a value graph.
//!
//! # Types
//!
//! - [`Key`] - A single property key: a name or an array index
//! - [`Address`] - The ordered key sequence from the root to a node
//!
//! # Prefix Matching
//!
//! Guards placed on an address cover every address it is a prefix of.
//! Prefixes are compared key by key, never on the dot-joined rendering, so a
//! key that itself contains a `.` cannot alias a deeper path.
//!
//! # Examples
//!
//! ```
//! use latchwork::core::types::{Address, Key};
//!
//! let a = Address::root().child("a");
//! let b = a.child(Key::Index(0)).child("b");
//!
//! assert_eq!(b.to_string(), "a.0.b");
//! assert!(a.is_prefix_of(&b));
//! assert!(!b.is_prefix_of(&a));
//! assert!(Address::root().is_root());
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

/// A single property key.
///
/// Objects are keyed by name; arrays by index. Either form renders to the
/// same text (`"0"` and `Key::Index(0)` both render as `0`), which is the
/// form objects use for lookup.
///
/// Equality and hashing follow the rendered form too, so `Key::Index(0)`
/// equals `Key::Name("0")` and an address compares the same however its
/// array keys were spelled.
#[derive(Debug, Clone)]
pub enum Key {
    /// A named property.
    Name(String),
    /// An array position.
    Index(usize),
}

impl Key {
    /// Interpret the key as an array index.
    ///
    /// Names qualify only when they are a canonical decimal integer
    /// (`"3"` but not `"03"` or `"+3"`).
    ///
    /// # Example
    ///
    /// ```
    /// use latchwork::core::types::Key;
    ///
    /// assert_eq!(Key::Index(2).as_index(), Some(2));
    /// assert_eq!(Key::from("7").as_index(), Some(7));
    /// assert_eq!(Key::from("07").as_index(), None);
    /// assert_eq!(Key::from("len").as_index(), None);
    /// ```
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Key::Index(i) => Some(*i),
            Key::Name(name) => {
                if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                if name.len() > 1 && name.starts_with('0') {
                    return None;
                }
                name.parse().ok()
            }
        }
    }

    /// Get the key as a name, rendering indices in decimal.
    pub fn to_name(&self) -> String {
        match self {
            Key::Name(name) => name.clone(),
            Key::Index(i) => i.to_string(),
        }
    }

    /// Check whether this key is the given name.
    pub fn is_name(&self, name: &str) -> bool {
        matches!(self, Key::Name(n) if n == name)
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Key::Name(x), Key::Name(y)) => x == y,
            (Key::Index(x), Key::Index(y)) => x == y,
            (Key::Name(name), Key::Index(i)) | (Key::Index(i), Key::Name(name)) => {
                *name == i.to_string()
            }
        }
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Key::Name(name) => name.as_str().hash(state),
            Key::Index(i) => i.to_string().as_str().hash(state),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

impl From<&String> for Key {
    fn from(name: &String) -> Self {
        Key::Name(name.clone())
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => write!(f, "{}", name),
            Key::Index(i) => write!(f, "{}", i),
        }
    }
}

/// The address of a node: the keys walked from the root to reach it.
///
/// The empty address is the root. Addresses are values; deriving a child
/// address never mutates the parent's.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Address(Vec<Key>);

impl Address {
    /// The root address (no keys).
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build an address from a key sequence.
    pub fn from_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        Self(keys.into_iter().map(Into::into).collect())
    }

    /// The address of `key` under this address.
    ///
    /// This is the whole of path tracking: every view computes its
    /// children's addresses by appending the accessed key to its own.
    pub fn child(&self, key: impl Into<Key>) -> Self {
        let mut keys = Vec::with_capacity(self.0.len() + 1);
        keys.extend(self.0.iter().cloned());
        keys.push(key.into());
        Self(keys)
    }

    /// Check if this is the root address.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of keys in the address.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Same as [`Address::is_root`].
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The keys of this address, root first.
    pub fn keys(&self) -> &[Key] {
        &self.0
    }

    /// The last key, or `None` for the root.
    pub fn last(&self) -> Option<&Key> {
        self.0.last()
    }

    /// Check if `self` is a prefix of `other`.
    ///
    /// Inclusive: every address is a prefix of itself. The root is a prefix
    /// of every address.
    ///
    /// Keys are compared by rendered form, so `Key::Index(0)` matches
    /// `Key::Name("0")`; both address the same slot.
    pub fn is_prefix_of(&self, other: &Address) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", key)?;
        }
        Ok(())
    }
}
