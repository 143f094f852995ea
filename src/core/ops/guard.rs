//! core::ops::guard
//!
//! Placing and looking up guard markers.
//!
//! # Invariants
//!
//! - The root address is never recorded; freezing or locking it fails
//! - Markers are append-only; a second `freeze` of the same address is a no-op
//!   for enforcement
//! - Lookups are prefix matches: a marker covers its address and everything
//!   below it, including keys created after the marker was placed

use crate::core::errors::GuardError;
use crate::core::metadata::{GuardKind, MetadataStore};
use crate::core::types::Address;

/// Freeze `address` and everything below it.
///
/// # Errors
///
/// Returns [`GuardError::RootFreeze`] if `address` is the root.
pub fn freeze(address: &Address, metadata: &MetadataStore) -> Result<(), GuardError> {
    if address.is_root() {
        return Err(GuardError::RootFreeze);
    }
    tracing::debug!(%address, "freezing");
    metadata.record(GuardKind::Frozen, address.clone());
    Ok(())
}

/// Type-lock `address` and everything below it.
///
/// # Errors
///
/// Returns [`GuardError::RootLock`] if `address` is the root.
pub fn lock(address: &Address, metadata: &MetadataStore) -> Result<(), GuardError> {
    if address.is_root() {
        return Err(GuardError::RootLock);
    }
    tracing::debug!(%address, "type-locking");
    metadata.record(GuardKind::TypeLocked, address.clone());
    Ok(())
}

/// Check whether `address` or any of its ancestors is frozen.
pub fn is_frozen(address: &Address, metadata: &MetadataStore) -> bool {
    metadata.covers(GuardKind::Frozen, address)
}

/// Check whether `address` or any of its ancestors is type-locked.
pub fn is_type_locked(address: &Address, metadata: &MetadataStore) -> bool {
    metadata.covers(GuardKind::TypeLocked, address)
}
