//! Scroll-overflow detection via mutation observation.
//!
//! An axis "scrolls" when the target's scroll extent exceeds its client
//! extent. Status is computed from [`observe::metrics`] once on mount and
//! again on every `childList`/`attributes` mutation of the target.

use std::rc::Rc;

use usekit_core::observe::{self, MutationMask, TargetId};
use usekit_core::{Signal, Unregister, remember_with_key, signal};

#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollStatusOptions {
    /// Assumed horizontal status until the first measurement.
    pub default_scroll_x: bool,
    /// Assumed vertical status until the first measurement.
    pub default_scroll_y: bool,
}

pub struct ScrollStatus {
    scroll_x: Signal<bool>,
    scroll_y: Signal<bool>,
    registration: Unregister,
}

fn measure(target: TargetId, scroll_x: &Signal<bool>, scroll_y: &Signal<bool>) {
    if let Some(m) = observe::metrics(target) {
        scroll_x.set(m.scroll_width > m.client_width);
        scroll_y.set(m.scroll_height > m.client_height);
    }
}

impl ScrollStatus {
    pub fn new(target: TargetId, options: ScrollStatusOptions) -> Self {
        let scroll_x = signal(options.default_scroll_x);
        let scroll_y = signal(options.default_scroll_y);

        let registration = {
            let scroll_x = scroll_x.clone();
            let scroll_y = scroll_y.clone();
            observe::observe_mutations(
                target,
                MutationMask::CHILD_LIST | MutationMask::ATTRIBUTES | MutationMask::SUBTREE,
                move |_records| measure(target, &scroll_x, &scroll_y),
            )
        };

        measure(target, &scroll_x, &scroll_y);

        Self {
            scroll_x,
            scroll_y,
            registration,
        }
    }

    pub fn scroll_x(&self) -> bool {
        self.scroll_x.get()
    }

    pub fn scroll_y(&self) -> bool {
        self.scroll_y.get()
    }

    pub fn scroll_x_signal(&self) -> Signal<bool> {
        self.scroll_x.clone()
    }

    pub fn scroll_y_signal(&self) -> Signal<bool> {
        self.scroll_y.clone()
    }

    pub fn registration(&self) -> &Unregister {
        &self.registration
    }
}

/// Composition wrapper: observes `target` and unregisters on scope teardown.
pub fn use_scroll_status(
    key: impl Into<String>,
    target: TargetId,
    options: ScrollStatusOptions,
) -> Rc<ScrollStatus> {
    remember_with_key(key, || {
        let status = ScrollStatus::new(target, options);
        status.registration.unregister_on_teardown();
        status
    })
}
