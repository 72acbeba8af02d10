//! In-process location/history stack.
//!
//! Stands in for the browser history API: a stack of query strings with
//! `Push`/`Replace` writes and pop-state notification on [`back`]. The hooks
//! only ever read the current search and subscribe to pops; the host (or a
//! test) drives navigation.

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};

use crate::effects::Unregister;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HistoryMode {
    /// Append a new entry, like `history.pushState`.
    #[default]
    Push,
    /// Rewrite the current entry, like `history.replaceState`.
    Replace,
}

new_key_type! {
    struct ListenerKey;
}

struct HistoryState {
    /// Never empty; the bottom entry is the initial location.
    stack: Vec<String>,
    listeners: SlotMap<ListenerKey, Rc<dyn Fn(&str)>>,
}

thread_local! {
    static HISTORY: RefCell<HistoryState> = RefCell::new(HistoryState {
        stack: vec![String::new()],
        listeners: SlotMap::with_key(),
    });
}

fn normalize(search: &str) -> String {
    search.strip_prefix('?').unwrap_or(search).to_string()
}

/// Query string of the current entry, without the leading `?`.
pub fn current_search() -> String {
    HISTORY.with(|h| h.borrow().stack.last().cloned().unwrap_or_default())
}

pub fn depth() -> usize {
    HISTORY.with(|h| h.borrow().stack.len())
}

/// Writes a new search to the location. Neither mode fires pop-state
/// listeners; those only react to [`back`].
pub fn apply_search(search: &str, mode: HistoryMode) {
    let search = normalize(search);
    HISTORY.with(|h| {
        let mut h = h.borrow_mut();
        match mode {
            HistoryMode::Push => h.stack.push(search),
            HistoryMode::Replace => {
                if let Some(top) = h.stack.last_mut() {
                    *top = search;
                }
            }
        }
    });
}

/// Pops the current entry (the initial entry is never popped) and notifies
/// pop-state listeners with the newly exposed search.
pub fn back() {
    let notify = HISTORY.with(|h| {
        let mut h = h.borrow_mut();
        if h.stack.len() <= 1 {
            return None;
        }
        h.stack.pop();
        let search = h.stack.last().cloned().unwrap_or_default();
        let listeners: Vec<Rc<dyn Fn(&str)>> = h.listeners.values().cloned().collect();
        Some((search, listeners))
    });

    if let Some((search, listeners)) = notify {
        for listener in listeners {
            listener(&search);
        }
    }
}

pub fn on_pop_state(callback: impl Fn(&str) + 'static) -> Unregister {
    let key = HISTORY.with(|h| h.borrow_mut().listeners.insert(Rc::new(callback)));
    Unregister::new(move || {
        HISTORY.with(|h| {
            h.borrow_mut().listeners.remove(key);
        });
    })
}

/// Resets the stack to a single entry holding `search`. Listeners survive.
pub fn reset(search: &str) {
    HISTORY.with(|h| {
        h.borrow_mut().stack = vec![normalize(search)];
    });
}
