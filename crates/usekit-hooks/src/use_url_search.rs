//! URL query-parameter synchronization.
//!
//! [`UrlSearch`] keeps a parameter map in sync with the location's query
//! string, in both directions: `set_params` merges a patch, writes the URL
//! (push or replace), and re-renders; a pop-state (back navigation) replaces
//! the state from the URL.

use std::collections::BTreeMap;
use std::rc::Rc;

use usekit_core::history;
use usekit_core::{Signal, Unregister, remember_with_key, signal};

pub use usekit_core::history::HistoryMode;

use crate::query::{self, StringifyOptions};

#[derive(Clone, Copy, Debug)]
pub struct UrlSearchOptions {
    pub mode: HistoryMode,
    /// Write the merged initial parameters back to the URL on mount.
    pub init_params_to_url: bool,
}

impl Default for UrlSearchOptions {
    fn default() -> Self {
        Self {
            mode: HistoryMode::Push,
            init_params_to_url: true,
        }
    }
}

/// Merges `patch` over the current location search and writes the result
/// back (`None` values remove keys; empty strings are kept in the returned
/// state but skipped in the URL). Returns the merged map.
pub fn update_url_search(
    patch: impl IntoIterator<Item = (String, Option<String>)>,
    mode: HistoryMode,
) -> BTreeMap<String, String> {
    let mut merged = query::parse(&history::current_search());
    for (key, value) in patch {
        match value {
            Some(v) => {
                merged.insert(key, v);
            }
            None => {
                merged.remove(&key);
            }
        }
    }

    let pairs = merged.iter().map(|(k, v)| (k.clone(), Some(v.clone())));
    match query::stringify(
        pairs,
        StringifyOptions {
            skip_null: true,
            skip_empty_string: true,
        },
    ) {
        Ok(search) => history::apply_search(&search, mode),
        Err(err) => log::warn!("update_url_search: leaving URL untouched: {err}"),
    }

    merged
}

pub struct UrlSearch {
    params: Signal<BTreeMap<String, String>>,
    mode: HistoryMode,
    pop_listener: Unregister,
}

impl UrlSearch {
    /// State starts as `initial` merged under the current URL (URL wins on
    /// conflicts). Registers a pop-state listener; pair with
    /// [`UrlSearch::pop_listener`] or the `use_url_search` wrapper so it is
    /// removed on teardown.
    pub fn new(
        initial: impl IntoIterator<Item = (String, String)>,
        options: UrlSearchOptions,
    ) -> Self {
        let mut merged: BTreeMap<String, String> = initial.into_iter().collect();
        for (key, value) in query::parse(&history::current_search()) {
            merged.insert(key, value);
        }

        if options.init_params_to_url {
            update_url_search(
                merged.iter().map(|(k, v)| (k.clone(), Some(v.clone()))),
                options.mode,
            );
        }

        let params = signal(merged);
        let pop_listener = {
            let params = params.clone();
            history::on_pop_state(move |search| params.set(query::parse(search)))
        };

        Self {
            params,
            mode: options.mode,
            pop_listener,
        }
    }

    pub fn params(&self) -> BTreeMap<String, String> {
        self.params.get()
    }

    pub fn params_signal(&self) -> Signal<BTreeMap<String, String>> {
        self.params.clone()
    }

    /// Merges a patch into the state and the URL. `None` removes a key.
    pub fn set_params(&self, patch: impl IntoIterator<Item = (String, Option<String>)>) {
        let merged = update_url_search(patch, self.mode);
        self.params.set(merged);
    }

    pub fn pop_listener(&self) -> &Unregister {
        &self.pop_listener
    }
}

/// Composition wrapper: remembers one `UrlSearch` per key and removes its
/// pop-state listener on scope teardown.
pub fn use_url_search(
    key: impl Into<String>,
    initial: impl IntoIterator<Item = (String, String)>,
    options: UrlSearchOptions,
) -> Rc<UrlSearch> {
    remember_with_key(key, || {
        let search = UrlSearch::new(initial, options);
        search.pop_listener.unregister_on_teardown();
        search
    })
}
