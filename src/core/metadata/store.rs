//! core::metadata::store
//!
//! Append-only storage of guard markers.
//!
//! # Architecture
//!
//! The store holds two ordered collections of addresses, one per
//! [`GuardKind`]. Markers are only ever appended; nothing removes one.
//! Duplicates are stored as-is and are harmless, since enforcement asks
//! "does any marker cover this address", not "how many".
//!
//! The store also carries the [`GuardConfig`] the root was guarded with, so
//! every derived view sees the same reserved keys and callable policy.
//!
//! # Sharing
//!
//! [`MetadataRef`] is an `Rc`. Cloning it shares the store; the store itself
//! is never cloned. Interior mutability is `RefCell`, which keeps a guarded
//! graph confined to one thread.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::core::config::GuardConfig;
use crate::core::types::Address;

/// Shared handle to a root's guard metadata.
pub type MetadataRef = Rc<MetadataStore>;

/// The kind of a guard marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuardKind {
    /// No writes at or below the address.
    Frozen,
    /// Writes at or below the address must keep the current type tag.
    TypeLocked,
}

impl fmt::Display for GuardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardKind::Frozen => f.write_str("frozen"),
            GuardKind::TypeLocked => f.write_str("type-locked"),
        }
    }
}

/// Guard metadata for one root graph.
pub struct MetadataStore {
    frozen: RefCell<Vec<Address>>,
    type_locked: RefCell<Vec<Address>>,
    config: GuardConfig,
}

impl MetadataStore {
    /// Create an empty store for a newly guarded root.
    pub(crate) fn new(config: GuardConfig) -> MetadataRef {
        Rc::new(Self {
            frozen: RefCell::new(Vec::new()),
            type_locked: RefCell::new(Vec::new()),
            config,
        })
    }

    /// The configuration the root was guarded with.
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    fn markers(&self, kind: GuardKind) -> &RefCell<Vec<Address>> {
        match kind {
            GuardKind::Frozen => &self.frozen,
            GuardKind::TypeLocked => &self.type_locked,
        }
    }

    /// Append a marker.
    ///
    /// Callers reject the root address before getting here.
    pub(crate) fn record(&self, kind: GuardKind, address: Address) {
        debug_assert!(!address.is_root(), "root address cannot be guarded");
        self.markers(kind).borrow_mut().push(address);
    }

    /// Check whether any marker of `kind` is a prefix of `address`.
    pub(crate) fn covers(&self, kind: GuardKind, address: &Address) -> bool {
        self.markers(kind)
            .borrow()
            .iter()
            .any(|marker| marker.is_prefix_of(address))
    }

    /// Number of stored markers of `kind`, duplicates included.
    #[cfg(test)]
    pub(crate) fn marker_count(&self, kind: GuardKind) -> usize {
        self.markers(kind).borrow().len()
    }
}

// Markers stay private even in debug output.
impl fmt::Debug for MetadataStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MetadataRef {
        MetadataStore::new(GuardConfig::default())
    }

    #[test]
    fn empty_store_covers_nothing() {
        let store = store();
        let addr = Address::from_keys(["a"]);
        assert!(!store.covers(GuardKind::Frozen, &addr));
        assert!(!store.covers(GuardKind::TypeLocked, &addr));
    }

    #[test]
    fn marker_covers_descendants() {
        let store = store();
        store.record(GuardKind::Frozen, Address::from_keys(["a"]));
        assert!(store.covers(GuardKind::Frozen, &Address::from_keys(["a"])));
        assert!(store.covers(GuardKind::Frozen, &Address::from_keys(["a", "b", "c"])));
        assert!(!store.covers(GuardKind::Frozen, &Address::from_keys(["b"])));
    }

    #[test]
    fn kinds_are_independent() {
        let store = store();
        store.record(GuardKind::TypeLocked, Address::from_keys(["a"]));
        assert!(store.covers(GuardKind::TypeLocked, &Address::from_keys(["a"])));
        assert!(!store.covers(GuardKind::Frozen, &Address::from_keys(["a"])));
    }

    #[test]
    fn duplicates_are_kept() {
        let store = store();
        store.record(GuardKind::Frozen, Address::from_keys(["a"]));
        store.record(GuardKind::Frozen, Address::from_keys(["a"]));
        assert_eq!(store.marker_count(GuardKind::Frozen), 2);
        assert_eq!(store.marker_count(GuardKind::TypeLocked), 0);
    }

    #[test]
    fn shared_handles_see_same_markers() {
        let store = store();
        let other = Rc::clone(&store);
        other.record(GuardKind::Frozen, Address::from_keys(["x"]));
        assert!(store.covers(GuardKind::Frozen, &Address::from_keys(["x", "y"])));
    }

    #[test]
    fn debug_hides_markers() {
        let store = store();
        store.record(GuardKind::Frozen, Address::from_keys(["secret"]));
        let rendered = format!("{:?}", store);
        assert!(!rendered.contains("secret"));
    }
}
