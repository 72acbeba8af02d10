//! Previous-value slot.

use std::cell::RefCell;

use usekit_core::{remember, remember_with_key};

/// Returns the value this call site saw on the previous composition pass
/// (`None` on the first) and records the current one. Slot-based; use
/// [`use_previous_with_key`] under conditional composition.
pub fn use_previous<T: Clone + 'static>(value: T) -> Option<T> {
    let slot = remember(|| RefCell::new(None::<T>));
    slot.borrow_mut().replace(value)
}

/// Key-based variant of [`use_previous`].
pub fn use_previous_with_key<T: Clone + 'static>(key: impl Into<String>, value: T) -> Option<T> {
    let slot = remember_with_key(key, || RefCell::new(None::<T>));
    slot.borrow_mut().replace(value)
}
