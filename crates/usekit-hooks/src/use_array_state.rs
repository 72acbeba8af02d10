//! Mutable array state with automatic re-render.
//!
//! Mirrors the in-place vector operations of a JS array (`push`, `pop`,
//! `shift`, `unshift`, `splice`, `reverse`, `sort`, `fill`, `copy_within`)
//! with their return contracts, each writing through a [`Signal`] and
//! notifying subscribers exactly once per call.

use std::cmp::Ordering;
use std::ops::{Bound, RangeBounds};
use std::rc::Rc;

use usekit_core::{Signal, remember_with_key, signal};

#[derive(Clone)]
pub struct ArrayState<T: Clone + 'static> {
    items: Signal<Vec<T>>,
}

fn resolve_range(range: impl RangeBounds<usize>, len: usize) -> (usize, usize) {
    let start = match range.start_bound() {
        Bound::Included(&s) => s,
        Bound::Excluded(&s) => s + 1,
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&e) => e + 1,
        Bound::Excluded(&e) => e,
        Bound::Unbounded => len,
    };
    let start = start.min(len);
    (start, end.clamp(start, len))
}

impl<T: Clone + 'static> ArrayState<T> {
    pub fn new(default: Vec<T>) -> Self {
        Self {
            items: signal(default),
        }
    }

    /// Appends `items`; returns the new length.
    pub fn push(&self, items: impl IntoIterator<Item = T>) -> usize {
        let mut len = 0;
        self.items.update(|v| {
            v.extend(items);
            len = v.len();
        });
        len
    }

    /// Removes and returns the last element.
    pub fn pop(&self) -> Option<T> {
        let mut out = None;
        self.items.update(|v| out = v.pop());
        out
    }

    /// Removes and returns the first element.
    pub fn shift(&self) -> Option<T> {
        let mut out = None;
        self.items.update(|v| {
            if !v.is_empty() {
                out = Some(v.remove(0));
            }
        });
        out
    }

    /// Prepends `items`; returns the new length.
    pub fn unshift(&self, items: impl IntoIterator<Item = T>) -> usize {
        let mut len = 0;
        self.items.update(|v| {
            let mut prepended: Vec<T> = items.into_iter().collect();
            prepended.append(v);
            *v = prepended;
            len = v.len();
        });
        len
    }

    /// Removes `delete_count` elements at `start` (both clamped) and inserts
    /// `items` in their place; returns the removed elements.
    pub fn splice(
        &self,
        start: usize,
        delete_count: usize,
        items: impl IntoIterator<Item = T>,
    ) -> Vec<T> {
        let mut removed = Vec::new();
        self.items.update(|v| {
            let start = start.min(v.len());
            let end = start.saturating_add(delete_count).min(v.len());
            removed = v.splice(start..end, items).collect();
        });
        removed
    }

    pub fn reverse(&self) {
        self.items.update(|v| v.reverse());
    }

    pub fn sort_by(&self, mut cmp: impl FnMut(&T, &T) -> Ordering) {
        self.items.update(|v| v.sort_by(&mut cmp));
    }

    /// Overwrites `range` (clamped) with clones of `value`.
    pub fn fill(&self, value: T, range: impl RangeBounds<usize>) {
        self.items.update(|v| {
            let (start, end) = resolve_range(range, v.len());
            for slot in &mut v[start..end] {
                *slot = value.clone();
            }
        });
    }

    /// Copies the elements in `src` (clamped) to `dest`, truncating at the
    /// end of the array.
    pub fn copy_within(&self, src: impl RangeBounds<usize>, dest: usize) {
        self.items.update(|v| {
            let (start, end) = resolve_range(src, v.len());
            let chunk: Vec<T> = v[start..end].to_vec();
            let dest = dest.min(v.len());
            for (i, item) in chunk.into_iter().enumerate() {
                let Some(slot) = v.get_mut(dest + i) else {
                    break;
                };
                *slot = item;
            }
        });
    }

    pub fn get(&self) -> Vec<T> {
        self.items.get()
    }

    pub fn len(&self) -> usize {
        self.items.with(|v| v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.items.with(|v| v.is_empty())
    }

    pub fn signal(&self) -> Signal<Vec<T>> {
        self.items.clone()
    }
}

pub fn use_array_state<T: Clone + 'static>(
    key: impl Into<String>,
    default: impl FnOnce() -> Vec<T>,
) -> Rc<ArrayState<T>> {
    remember_with_key(key, || ArrayState::new(default()))
}
