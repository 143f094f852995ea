//! core::ops::enforce
//!
//! The check run before every guarded write.

use super::guard::{is_frozen, is_type_locked};
use crate::core::errors::GuardError;
use crate::core::metadata::MetadataStore;
use crate::core::types::Address;
use crate::core::value::{TypeTag, Value};

/// Decide whether `incoming` may be written at `address`.
///
/// `current` is the value presently stored there, `None` if the slot is
/// empty. Freezing wins over type-locking: a frozen address reports
/// [`GuardError::FrozenProperty`] even when the type would also change.
///
/// Nothing is mutated here; callers write only after this returns `Ok`.
pub fn check_write(
    address: &Address,
    current: Option<&Value>,
    incoming: &Value,
    metadata: &MetadataStore,
) -> Result<(), GuardError> {
    if is_frozen(address, metadata) {
        return Err(GuardError::FrozenProperty {
            address: address.clone(),
        });
    }

    if is_type_locked(address, metadata) {
        let expected = TypeTag::of_slot(current);
        let found = TypeTag::of(incoming);
        if expected != found {
            return Err(GuardError::TypeLocked {
                address: address.clone(),
                expected,
                found,
            });
        }
    }

    Ok(())
}
