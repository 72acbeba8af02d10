//! # usekit hooks
//!
//! Reusable UI-state utilities on top of `usekit-core`:
//!
//! - [`use_async`] / [`UseAsync`] — async request lifecycle manager with
//!   `loading`/`data`/`error`/`params` state, last-call-wins concurrency,
//!   soft cancellation, and `on_before`/`on_success`/`on_error`/`on_finally`
//!   callbacks.
//! - [`use_url_search`] / [`UrlSearch`] — two-way sync between a parameter
//!   map and the location's query string, via the [`query`] codec.
//! - [`use_object_state`] / [`use_array_state`] — mutable state containers
//!   whose accessor methods re-render automatically.
//! - [`use_previous`] — the value from the previous composition pass.
//! - [`use_on_screen`] — visibility via intersection observation.
//! - [`use_scroll_status`] — per-axis scroll overflow via mutation
//!   observation.
//!
//! Each hook is a plain state struct plus a `use_*` wrapper that remembers it
//! per key and ties observer teardown to the current scope. The structs work
//! standalone outside composition too:
//!
//! ```rust
//! use usekit_hooks::ArrayState;
//!
//! let items = ArrayState::new(vec![1, 2, 3]);
//! let removed = items.splice(1, 1, [9, 9]);
//! assert_eq!(removed, vec![2]);
//! assert_eq!(items.get(), vec![1, 9, 9, 3]);
//! ```

pub mod query;
pub mod use_array_state;
pub mod use_async;
pub mod use_object_state;
pub mod use_on_screen;
pub mod use_previous;
pub mod use_scroll_status;
pub mod use_url_search;

pub use use_array_state::*;
pub use use_async::*;
pub use use_object_state::*;
pub use use_on_screen::*;
pub use use_previous::*;
pub use use_scroll_status::*;
pub use use_url_search::*;
