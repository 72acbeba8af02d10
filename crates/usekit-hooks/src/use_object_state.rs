//! Mutable object state with automatic re-render.
//!
//! There is no transparent write interception here: mutation goes through the
//! accessor's methods, which write through a [`Signal`] so every change
//! notifies subscribers. Mutating a copy obtained via `get` has no effect on
//! the stored state.

use std::rc::Rc;

use usekit_core::{Signal, remember_with_key, signal};

#[derive(Clone)]
pub struct ObjectState<T: Clone + 'static> {
    inner: Signal<T>,
}

impl<T: Clone + 'static> ObjectState<T> {
    pub fn new(default: T) -> Self {
        Self {
            inner: signal(default),
        }
    }

    pub fn get(&self) -> T {
        self.inner.get()
    }

    /// Reads a projection without cloning the whole value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.inner.with(f)
    }

    pub fn set(&self, value: T) {
        self.inner.set(value);
    }

    /// Mutates in place; subscribers are notified once.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.inner.update(f);
    }

    /// Replaces the value computed from the current one.
    pub fn set_with(&self, f: impl FnOnce(&T) -> T) {
        self.inner.update(|v| *v = f(v));
    }

    pub fn signal(&self) -> Signal<T> {
        self.inner.clone()
    }
}

pub fn use_object_state<T: Clone + 'static>(
    key: impl Into<String>,
    default: impl FnOnce() -> T,
) -> Rc<ObjectState<T>> {
    remember_with_key(key, || ObjectState::new(default()))
}
