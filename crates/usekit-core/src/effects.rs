use std::cell::RefCell;
use std::rc::Rc;

use crate::scope::current_scope;

/// At-most-once cleanup guard. Safe to run repeatedly.
#[derive(Clone)]
pub struct Dispose(Rc<RefCell<Option<Box<dyn FnOnce()>>>>);

impl Dispose {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(f)))))
    }

    /// Runs at most once (safe to call multiple times).
    pub fn run(&self) {
        if let Some(f) = self.0.borrow_mut().take() {
            f()
        }
    }
}

/// Runs `f()` immediately and returns its `Dispose`. The cleanup is also
/// registered with the current scope, if any.
pub fn effect<F>(f: F) -> Dispose
where
    F: FnOnce() -> Dispose + 'static,
{
    let d = f();

    if let Some(scope) = current_scope() {
        let d2 = d.clone();
        scope.add_disposer(move || d2.run());
    }

    d
}

/// Helper to register cleanup inside `effect`.
pub fn on_unmount(f: impl FnOnce() + 'static) -> Dispose {
    Dispose::new(f)
}

/// Handle returned by the observation and history registration APIs.
///
/// Idempotent: calling `unregister` more than once, or after teardown already
/// ran it, is a no-op.
#[derive(Clone)]
pub struct Unregister(Dispose);

impl Unregister {
    pub(crate) fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Dispose::new(f))
    }

    pub fn unregister(&self) {
        self.0.run();
    }

    /// Schedules `unregister` on the current scope's teardown. A no-op when
    /// called outside any scope.
    pub fn unregister_on_teardown(&self) {
        if let Some(scope) = current_scope() {
            let u = self.clone();
            scope.add_disposer(move || u.unregister());
        }
    }
}
