//! view::callable
//!
//! Guardable callables.
//!
//! When the graph guards callables, reading a callable through a node view
//! yields a [`CallableView`]: still invocable, plus `freeze()` and `lock()`
//! for the address it was read from. The address is guarded like any other:
//! freezing forbids reassigning it, locking only admits another callable.

use std::fmt;

use crate::core::errors::GuardError;
use crate::core::metadata::MetadataRef;
use crate::core::ops;
use crate::core::types::Address;
use crate::core::value::{Callable, Value};

/// A callable read through a guarded view.
///
/// # Example
///
/// ```
/// use latchwork::{guard, GuardError, Value};
///
/// let view = guard(Value::object([(
///     "double",
///     Value::callable(|args| Value::from(args[0].as_f64().unwrap_or(0.0) * 2.0)),
/// )]))
/// .unwrap();
///
/// let double = view.get("double").unwrap().into_callable().unwrap();
/// assert_eq!(double.call(&[Value::from(4)]), Value::from(8));
///
/// double.lock().unwrap();
/// assert!(matches!(view.set("double", 1), Err(GuardError::TypeLocked { .. })));
/// assert!(view.set("double", Value::callable(|_| Value::Null)).is_ok());
/// ```
#[derive(Clone)]
pub struct CallableView {
    callable: Callable,
    address: Address,
    metadata: MetadataRef,
}

impl CallableView {
    pub(crate) fn new(callable: Callable, address: Address, metadata: MetadataRef) -> Self {
        Self {
            callable,
            address,
            metadata,
        }
    }

    /// Invoke the callable.
    pub fn call(&self, args: &[Value]) -> Value {
        self.callable.call(args)
    }

    /// Freeze the callable's address.
    pub fn freeze(&self) -> Result<(), GuardError> {
        ops::freeze(&self.address, &self.metadata)
    }

    /// Type-lock the callable's address.
    pub fn lock(&self) -> Result<(), GuardError> {
        ops::lock(&self.address, &self.metadata)
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn into_callable(self) -> Callable {
        self.callable
    }
}

impl fmt::Debug for CallableView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallableView")
            .field("address", &self.address.to_string())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GuardConfig;
    use crate::view::{guard, guard_with, Guarded};
    use std::cell::Cell;
    use std::rc::Rc;

    fn counter_graph() -> (Value, Rc<Cell<u32>>) {
        let hits = Rc::new(Cell::new(0));
        let seen = Rc::clone(&hits);
        let root = Value::object([(
            "tick",
            Value::callable(move |_| {
                seen.set(seen.get() + 1);
                Value::from(seen.get())
            }),
        )]);
        (root, hits)
    }

    #[test]
    fn guarded_callable_still_invocable() {
        let (root, hits) = counter_graph();
        let view = guard(root).unwrap();
        let tick = view.get("tick").unwrap().into_callable().unwrap();
        assert_eq!(tick.call(&[]), Value::from(1));
        assert_eq!(tick.call(&[]), Value::from(2));
        assert_eq!(hits.get(), 2);
        assert_eq!(tick.address(), &Address::from_keys(["tick"]));
    }

    #[test]
    fn frozen_callable_cannot_be_reassigned() {
        let (root, _) = counter_graph();
        let view = guard(root).unwrap();
        view.get("tick").unwrap().into_callable().unwrap().freeze().unwrap();

        let result = view.set("tick", Value::callable(|_| Value::Null));
        assert!(matches!(result, Err(GuardError::FrozenProperty { .. })));
    }

    #[test]
    fn unguarded_when_disabled() {
        let (root, _) = counter_graph();
        let config = GuardConfig {
            guard_callables: false,
            ..GuardConfig::default()
        };
        let view = guard_with(root, config).unwrap();
        match view.get("tick").unwrap() {
            Guarded::Value(Value::Callable(f)) => assert_eq!(f.call(&[]), Value::from(1)),
            other => panic!("expected bare callable, got {:?}", other),
        }
    }

    #[test]
    fn into_callable_is_same_function() {
        let (root, _) = counter_graph();
        let original = root.as_object().unwrap().borrow()["tick"].clone();
        let view = guard(root).unwrap();
        let read = view.get("tick").unwrap().into_callable().unwrap().into_callable();
        assert_eq!(Value::Callable(read), original);
    }
}
