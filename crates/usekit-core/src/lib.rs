//! # Signals, remember slots, and host registries
//!
//! usekit's hooks sit on a deliberately small reactive core:
//!
//! - `Signal<T>` — observable, reactive value; writes notify subscribers.
//! - `remember*` — slot storage bound to composition passes.
//! - `Scope` / `effect` — teardown plumbing with at-most-once cleanup.
//! - `task` — single-threaded cooperative executor for hook futures.
//! - `observe` / `history` — host-driven registries (mutation/intersection
//!   observation, location stack) the adapter hooks plug into.
//!
//! ## Signals
//!
//! `Signal<T>` is a cloneable handle to a piece of state:
//!
//! ```rust
//! use usekit_core::*;
//!
//! let count = signal(0);
//! count.set(1);
//! count.update(|v| *v += 1);
//! assert_eq!(count.get(), 2);
//! ```
//!
//! Subscribers fire synchronously on every write; a host runtime uses this to
//! schedule re-renders of whatever read the signal.
//!
//! ## Remembered state
//!
//! Hook state lives in `remember*` slots rather than globals:
//!
//! ```rust
//! use usekit_core::*;
//!
//! let guard = ComposeGuard::begin();
//! let count = guard.scope().run(|| remember_state(|| 0));
//! *count.borrow_mut() += 1;
//! ```
//!
//! - `remember` / `remember_state` are order-based: the Nth call in a pass
//!   always refers to the Nth stored value.
//! - `remember_with_key` / `remember_state_with_key` are key-based and more
//!   stable across conditional composition.
//!
//! ## Teardown
//!
//! Registrations hand back an [`Unregister`]; calling it twice is a no-op,
//! and `unregister_on_teardown` ties it to the current [`Scope`]:
//!
//! ```rust
//! use usekit_core::*;
//!
//! let target = observe::new_target();
//! let scope = Scope::new();
//! scope.run(|| {
//!     let reg = observe::observe_intersection(
//!         target,
//!         observe::IntersectionOptions::default(),
//!         |_visible| {},
//!     );
//!     reg.unregister_on_teardown();
//! });
//! scope.dispose();
//! ```
//!
//! ## Tasks
//!
//! Futures spawned by hooks run on a per-thread pool that the host drives
//! between events:
//!
//! ```rust
//! use usekit_core::task;
//!
//! task::spawn_local(async { /* suspend, resume, mutate state */ });
//! task::run_until_stalled();
//! ```

pub mod effects;
pub mod history;
pub mod observe;
pub mod runtime;
pub mod scope;
pub mod signal;
pub mod task;
pub mod tests;

pub use effects::*;
pub use runtime::*;
pub use scope::*;
pub use signal::*;
