//! Element visibility via intersection observation.

use std::rc::Rc;

use usekit_core::observe::{self, IntersectionOptions, TargetId};
use usekit_core::{Signal, Unregister, remember_with_key, signal};

#[derive(Clone, Copy, Debug, Default)]
pub struct OnScreenOptions {
    /// Viewport to intersect against; `None` means the root viewport.
    pub root: Option<TargetId>,
    /// Margin (px) grown around the root before testing intersection.
    pub root_margin: f32,
}

pub struct OnScreen {
    visible: Signal<bool>,
    registration: Unregister,
}

impl OnScreen {
    pub fn new(target: TargetId, options: OnScreenOptions) -> Self {
        let visible = signal(false);
        let registration = {
            let visible = visible.clone();
            observe::observe_intersection(
                target,
                IntersectionOptions {
                    root: options.root,
                    root_margin: options.root_margin,
                },
                move |is_intersecting| visible.set(is_intersecting),
            )
        };
        Self {
            visible,
            registration,
        }
    }

    pub fn visible(&self) -> bool {
        self.visible.get()
    }

    pub fn visible_signal(&self) -> Signal<bool> {
        self.visible.clone()
    }

    pub fn registration(&self) -> &Unregister {
        &self.registration
    }
}

/// Composition wrapper: observes `target` and unregisters on scope teardown.
pub fn use_on_screen(
    key: impl Into<String>,
    target: TargetId,
    options: OnScreenOptions,
) -> Rc<OnScreen> {
    remember_with_key(key, || {
        let on_screen = OnScreen::new(target, options);
        on_screen.registration.unregister_on_teardown();
        on_screen
    })
}
