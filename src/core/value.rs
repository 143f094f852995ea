//! core::value
//!
//! The value graph that guarded views read and write.
//!
//! # Reference Semantics
//!
//! Objects and arrays are shared handles ([`ObjectRef`], [`ArrayRef`]).
//! Cloning a [`Value`] that holds one clones the handle, not the contents, so
//! a write made through any view is visible to every holder of the handle.
//! Container equality is handle identity; primitives compare by value.
//!
//! # Type Tags
//!
//! Type locks compare [`TypeTag`]s, a coarse classification with one tag per
//! primitive kind plus `object` (objects, arrays, null) and `function`.
//!
//! # Example
//!
//! ```
//! use latchwork::core::value::{TypeTag, Value};
//!
//! let inner = Value::array([Value::from(1), Value::from("two")]);
//! let root = Value::object([("list", inner.clone())]);
//!
//! // Both handles see the same array.
//! inner.as_array().unwrap().borrow_mut().push(Value::from(true));
//! let list = root.as_object().unwrap().borrow()["list"].clone();
//! assert_eq!(list.as_array().unwrap().borrow().len(), 3);
//!
//! assert_eq!(TypeTag::of(&Value::Null), TypeTag::Object);
//! assert_eq!(TypeTag::of(&Value::from(1.5)), TypeTag::Number);
//! ```

use std::cell::{OnceCell, Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::core::metadata::MetadataRef;

/// A shared, interior-mutable container handle.
///
/// Besides its contents, each handle has a write-once slot holding the guard
/// metadata of the graph it is the root of. Only roots ever fill it.
pub struct Shared<T> {
    inner: Rc<SharedInner<T>>,
}

struct SharedInner<T> {
    data: RefCell<T>,
    metadata: OnceCell<MetadataRef>,
}

/// Shared handle to an insertion-ordered object.
pub type ObjectRef = Shared<IndexMap<String, Value>>;

/// Shared handle to an array.
pub type ArrayRef = Shared<Vec<Value>>;

impl<T> Shared<T> {
    /// Create a new handle owning `data`.
    pub fn new(data: T) -> Self {
        Self {
            inner: Rc::new(SharedInner {
                data: RefCell::new(data),
                metadata: OnceCell::new(),
            }),
        }
    }

    /// Borrow the contents.
    ///
    /// # Panics
    ///
    /// Panics if the contents are currently mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, T> {
        self.inner.data.borrow()
    }

    /// Mutably borrow the contents.
    ///
    /// Writes made here bypass every guard. Use a view to get enforcement.
    ///
    /// # Panics
    ///
    /// Panics if the contents are currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.inner.data.borrow_mut()
    }

    /// Check whether two handles point at the same container.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Attach root metadata, or return the existing one.
    ///
    /// The boolean is `true` when `init` ran.
    pub(crate) fn root_metadata_or_init(
        &self,
        init: impl FnOnce() -> MetadataRef,
    ) -> (MetadataRef, bool) {
        if let Some(existing) = self.inner.metadata.get() {
            return (existing.clone(), false);
        }
        let created = self.inner.metadata.get_or_init(init);
        (created.clone(), true)
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

thread_local! {
    /// Handles currently being formatted on this thread, outermost first.
    static FORMATTING: RefCell<Vec<*const ()>> = const { RefCell::new(Vec::new()) };
}

impl<T: fmt::Debug> fmt::Debug for Shared<T> {
    /// Formats the contents. A handle met again inside its own contents
    /// prints as `<cycle>`, so self-referencing graphs format finitely.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = Rc::as_ptr(&self.inner) as *const ();
        let entered = FORMATTING.with(|stack| {
            let mut stack = stack.borrow_mut();
            if stack.contains(&id) {
                false
            } else {
                stack.push(id);
                true
            }
        });
        if !entered {
            return f.write_str("<cycle>");
        }

        let result = match self.inner.data.try_borrow() {
            Ok(data) => fmt::Debug::fmt(&*data, f),
            Err(_) => f.write_str("<borrowed>"),
        };

        FORMATTING.with(|stack| {
            stack.borrow_mut().pop();
        });
        result
    }
}

/// A callable value: a function of positional arguments.
#[derive(Clone)]
pub struct Callable(Rc<dyn Fn(&[Value]) -> Value>);

impl Callable {
    /// Wrap a closure.
    pub fn new(f: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke with the given arguments.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }

    /// Check whether two callables are the same function object.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<callable>")
    }
}

/// A node in the value graph.
#[derive(Clone)]
pub enum Value {
    /// The null value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number. All numbers share one type tag.
    Number(f64),
    /// A string.
    Text(String),
    /// A shared array.
    Array(ArrayRef),
    /// A shared object.
    Object(ObjectRef),
    /// A callable.
    Callable(Callable),
}

impl Value {
    /// Build an object from key/value pairs, keeping their order.
    pub fn object<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Object(Shared::new(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }

    /// Build an array from items.
    pub fn array<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Array(Shared::new(items.into_iter().map(Into::into).collect()))
    }

    /// Build a callable value from a closure.
    pub fn callable(f: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Value::Callable(Callable::new(f))
    }

    /// The type tag used by type locks.
    pub fn type_tag(&self) -> TypeTag {
        TypeTag::of(self)
    }

    /// Check if this is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this is an object or an array.
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Object(_) | Value::Array(_))
    }

    /// Check if this is a boolean, number, or string.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Value::Bool(_) | Value::Number(_) | Value::Text(_))
    }

    /// Get the boolean, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the number, if this is one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the string contents, if this is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the object handle, if this is an object.
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Get the array handle, if this is an array.
    pub fn as_array(&self) -> Option<&ArrayRef> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Get the callable, if this is one.
    pub fn as_callable(&self) -> Option<&Callable> {
        match self {
            Value::Callable(c) => Some(c),
            _ => None,
        }
    }

    /// Truthiness of the value in a boolean context.
    ///
    /// `Null`, `false`, `0`, `NaN`, and the empty string are falsy;
    /// everything else, including empty containers, is truthy.
    pub fn truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Text(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) | Value::Callable(_) => true,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Callable(a), Value::Callable(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{:?}", s),
            Value::Array(a) => fmt::Debug::fmt(a, f),
            Value::Object(o) => fmt::Debug::fmt(o, f),
            Value::Callable(c) => fmt::Debug::fmt(c, f),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            other => write!(f, "{:?}", other),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<ObjectRef> for Value {
    fn from(o: ObjectRef) -> Self {
        Value::Object(o)
    }
}

impl From<ArrayRef> for Value {
    fn from(a: ArrayRef) -> Self {
        Value::Array(a)
    }
}

impl From<Callable> for Value {
    fn from(c: Callable) -> Self {
        Value::Callable(c)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(Shared::new(items))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// The type classification compared by type locks.
///
/// `Undefined` is the tag of a missing key, so a type-locked slot that does
/// not exist yet cannot be created through a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Undefined,
    Boolean,
    Number,
    String,
    /// Objects, arrays, and null.
    Object,
    Function,
}

impl TypeTag {
    /// Classify a value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Bool(_) => TypeTag::Boolean,
            Value::Number(_) => TypeTag::Number,
            Value::Text(_) => TypeTag::String,
            Value::Null | Value::Array(_) | Value::Object(_) => TypeTag::Object,
            Value::Callable(_) => TypeTag::Function,
        }
    }

    /// Classify a slot that may be empty.
    pub fn of_slot(value: Option<&Value>) -> Self {
        value.map_or(TypeTag::Undefined, TypeTag::of)
    }

    /// The lowercase name of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Undefined => "undefined",
            TypeTag::Boolean => "boolean",
            TypeTag::Number => "number",
            TypeTag::String => "string",
            TypeTag::Object => "object",
            TypeTag::Function => "function",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
