//! Integration tests for guarded graphs.
//!
//! These tests drive the public API end to end: guard a root, walk into it
//! through views, place freeze and type-lock markers, and check which writes
//! still reach the underlying graph.

use latchwork::core::config::GuardConfig;
use latchwork::{guard, guard_with, Address, GuardError, Guarded, Key, NodeView, TypeTag, Value};

// =============================================================================
// Test Helpers
// =============================================================================

fn empty_object() -> Value {
    Value::object(Vec::<(String, Value)>::new())
}

/// Walk a chain of container keys.
fn node(view: &NodeView, keys: &[&str]) -> NodeView {
    keys.iter().fold(view.clone(), |current, key| {
        current
            .get(*key)
            .expect("read failed")
            .into_node()
            .unwrap_or_else(|| panic!("'{}' is not a container", key))
    })
}

/// A small document with nested objects, an array, and every leaf kind.
fn document() -> Value {
    Value::object([
        (
            "user",
            Value::object([
                ("name", Value::from("ada")),
                ("age", Value::from(36)),
                ("admin", Value::from(false)),
                (
                    "address",
                    Value::object([("city", "london"), ("zip", "n1")]),
                ),
            ]),
        ),
        ("tags", Value::array(["a", "b"])),
        ("count", Value::from(0)),
    ])
}

// =============================================================================
// Documented behaviour
// =============================================================================

#[test]
fn freezing_a_branch_blocks_it_and_its_children_only() {
    let view = guard(Value::object([("a", Value::object([("b", 1)]))])).unwrap();

    node(&view, &["a"]).freeze().unwrap();

    assert!(matches!(
        node(&view, &["a"]).set("b", 2),
        Err(GuardError::FrozenProperty { .. })
    ));
    assert!(matches!(
        view.set("a", empty_object()),
        Err(GuardError::FrozenProperty { .. })
    ));
    assert!(view.set("c", 1).is_ok());
}

#[test]
fn type_lock_admits_same_type_only() {
    let view = guard(Value::object([("x", "s")])).unwrap();

    view.get("x").unwrap().into_leaf().unwrap().lock().unwrap();

    assert!(view.set("x", "t").is_ok());
    assert_eq!(
        view.set("x", 5),
        Err(GuardError::TypeLocked {
            address: Address::from_keys(["x"]),
            expected: TypeTag::String,
            found: TypeTag::Number,
        })
    );
}

#[test]
fn reserved_key_reads_guard_like_method_calls() {
    let view = guard(Value::object([("a", Value::object([("b", 1)]))])).unwrap();

    assert!(node(&view, &["a"]).get("$freeze").unwrap().is_absent());

    assert!(matches!(
        node(&view, &["a"]).set("b", 2),
        Err(GuardError::FrozenProperty { .. })
    ));
}

// =============================================================================
// Root handling
// =============================================================================

#[test]
fn non_object_root_rejected() {
    assert_eq!(
        guard(Value::from(5)).unwrap_err(),
        GuardError::NonObjectRoot {
            found: TypeTag::Number
        }
    );
}

#[test]
fn root_view_cannot_be_guarded() {
    let view = guard(document()).unwrap();
    assert_eq!(view.freeze(), Err(GuardError::RootFreeze));
    assert_eq!(view.lock(), Err(GuardError::RootLock));
}

#[test]
fn reguarding_a_root_keeps_its_markers() {
    let root = document();
    let first = guard(root.clone()).unwrap();
    node(&first, &["user"]).freeze().unwrap();

    let second = guard(root).unwrap();
    assert!(matches!(
        node(&second, &["user"]).set("name", "grace"),
        Err(GuardError::FrozenProperty { .. })
    ));
}

#[test]
fn nested_node_guarded_separately_has_own_metadata() {
    let user = Value::object([("name", "ada")]);
    let root = Value::object([("user", user.clone())]);

    let outer = guard(root).unwrap();
    node(&outer, &["user"]).freeze().unwrap();

    // Guarding the nested object directly starts a fresh graph; `name` is a
    // top-level key there and nothing covers it.
    let inner = guard(user).unwrap();
    assert!(inner.set("name", "grace").is_ok());
    assert!(matches!(
        node(&outer, &["user"]).set("name", "linus"),
        Err(GuardError::FrozenProperty { .. })
    ));
}

#[test]
fn config_fixed_on_first_guard() {
    let root = Value::object([("f", Value::callable(|_| Value::Null))]);

    let first = guard_with(
        root.clone(),
        GuardConfig {
            guard_callables: false,
            ..GuardConfig::default()
        },
    )
    .unwrap();
    let second = guard(root).unwrap();

    assert!(matches!(first.get("f").unwrap(), Guarded::Value(_)));
    assert!(matches!(second.get("f").unwrap(), Guarded::Value(_)));
}

#[test]
fn invalid_config_rejected_before_guarding() {
    let root = document();
    let mut config = GuardConfig::default();
    config.reserved.meta = config.reserved.freeze.clone();

    assert!(matches!(
        guard_with(root.clone(), config),
        Err(GuardError::InvalidConfig { .. })
    ));

    // Nothing was attached, so a later guard still gets the defaults.
    let view = guard(root).unwrap();
    assert!(matches!(
        view.get("$meta"),
        Err(GuardError::ReservedProperty { .. })
    ));
}

#[test]
fn empty_reserved_name_rejected() {
    let mut config = GuardConfig::default();
    config.reserved.lock = String::new();
    assert_eq!(
        guard_with(document(), config).unwrap_err(),
        GuardError::InvalidConfig {
            message: "reserved.lock cannot be empty".to_string()
        }
    );
}

// =============================================================================
// Enforcement
// =============================================================================

#[test]
fn metadata_is_unreachable_at_every_depth() {
    let view = guard(document()).unwrap();
    for path in [&[][..], &["user"][..], &["user", "address"][..], &["tags"][..]] {
        let target = node(&view, path);
        assert_eq!(
            target.get("$meta").unwrap_err(),
            GuardError::ReservedProperty {
                key: "$meta".to_string()
            }
        );
    }
}

#[test]
fn freeze_covers_deep_descendants() {
    let view = guard(document()).unwrap();
    node(&view, &["user"]).freeze().unwrap();

    let address = node(&view, &["user", "address"]);
    assert_eq!(
        address.set("city", "paris"),
        Err(GuardError::FrozenProperty {
            address: Address::from_keys(["user", "address", "city"]),
        })
    );
    assert!(view.set("count", 1).is_ok());
}

#[test]
fn freeze_covers_elements_added_later() {
    let view = guard(document()).unwrap();
    let tags = node(&view, &["tags"]);
    tags.freeze().unwrap();

    assert!(matches!(tags.push("c"), Err(GuardError::FrozenProperty { .. })));
    assert!(matches!(
        tags.set(Key::Index(10), "z"),
        Err(GuardError::FrozenProperty { .. })
    ));
    assert_eq!(tags.len(), 2);
}

#[test]
fn freezing_twice_same_as_once() {
    let once = guard(document()).unwrap();
    let twice = guard(document()).unwrap();

    node(&once, &["user"]).freeze().unwrap();
    node(&twice, &["user"]).freeze().unwrap();
    node(&twice, &["user"]).freeze().unwrap();

    for view in [&once, &twice] {
        assert!(node(view, &["user"]).set("age", 37).is_err());
        assert!(view.set("count", 5).is_ok());
    }
}

#[test]
fn locked_object_accepts_same_typed_replacements() {
    let view = guard(document()).unwrap();
    let user = node(&view, &["user"]);
    user.lock().unwrap();

    assert!(user.set("age", 40).is_ok());
    assert!(user.set("admin", true).is_ok());
    assert!(matches!(
        user.set("age", "forty"),
        Err(GuardError::TypeLocked { .. })
    ));
    // A missing key has no type yet, so nothing can be added below a lock.
    assert!(matches!(
        user.set("email", "ada@example.com"),
        Err(GuardError::TypeLocked {
            expected: TypeTag::Undefined,
            ..
        })
    ));
    // Containers share a tag, so the object itself may be swapped for another.
    assert!(view.set("user", empty_object()).is_ok());
}

#[test]
fn freeze_and_lock_combine() {
    let view = guard(document()).unwrap();
    node(&view, &["user"]).lock().unwrap();
    node(&view, &["user", "address"]).freeze().unwrap();

    let user = node(&view, &["user"]);
    assert!(user.set("name", "grace").is_ok());
    assert!(matches!(
        node(&view, &["user", "address"]).set("city", "paris"),
        Err(GuardError::FrozenProperty { .. })
    ));
    assert!(matches!(user.set("name", 1), Err(GuardError::TypeLocked { .. })));
}

#[test]
fn rejected_writes_leave_graph_untouched() {
    let root = document();
    let view = guard(root.clone()).unwrap();
    view.get("count").unwrap().into_leaf().unwrap().lock().unwrap();

    assert!(view.set("count", "many").is_err());

    let map = root.as_object().unwrap().borrow();
    assert_eq!(map["count"], Value::from(0));
}

#[test]
fn sibling_views_share_metadata() {
    let view = guard(document()).unwrap();
    let user_a = node(&view, &["user"]);
    let user_b = node(&view, &["user"]);

    user_a.get("name").unwrap().into_leaf().unwrap().freeze().unwrap();

    assert!(matches!(
        user_b.set("name", "grace"),
        Err(GuardError::FrozenProperty { .. })
    ));
}

#[test]
fn custom_reserved_keys() {
    let config = GuardConfig::from_toml_str(
        r#"
        [reserved]
        freeze = "__freeze"
        lock = "__lock"
        meta = "__meta"
        "#,
    )
    .unwrap();
    let view = guard_with(document(), config).unwrap();

    // The defaults are ordinary keys now.
    assert!(view.get("$meta").unwrap().is_absent());
    assert!(view.set("$freeze", 1).is_ok());

    assert!(node(&view, &["user"]).get("__freeze").unwrap().is_absent());
    assert!(node(&view, &["user"]).set("age", 1).is_err());
    assert!(matches!(
        view.get("__meta"),
        Err(GuardError::ReservedProperty { .. })
    ));
}
