//! Host observation registration API.
//!
//! The hooks never poll the host; they register callbacks against opaque
//! element handles ([`TargetId`]) and the host pushes events in:
//!
//! - mutation events (`childList` / `attributes` / `characterData` records,
//!   selected by a [`MutationMask`]) via [`emit_mutations`];
//! - intersection events (visibility toggles) via [`emit_intersection`].
//!
//! Registration returns an [`Unregister`] that is idempotent and safe to call
//! during teardown. Per-target size metrics ([`ElementMetrics`]) are kept here
//! too so observers can re-measure on mutation without a layout dependency.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use bitflags::bitflags;
use slotmap::{SlotMap, new_key_type};

use crate::effects::Unregister;

/// Opaque element handle issued by [`new_target`].
pub type TargetId = u64;

bitflags! {
    /// Which mutation record kinds an observer wants delivered.
    /// `SUBTREE` widens observation to descendants; it never matches a record
    /// kind by itself.
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct MutationMask: u8 {
        const CHILD_LIST = 1 << 0;
        const ATTRIBUTES = 1 << 1;
        const CHARACTER_DATA = 1 << 2;
        const SUBTREE = 1 << 3;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationKind {
    ChildList,
    Attributes,
    CharacterData,
}

impl MutationKind {
    fn mask(self) -> MutationMask {
        match self {
            MutationKind::ChildList => MutationMask::CHILD_LIST,
            MutationKind::Attributes => MutationMask::ATTRIBUTES,
            MutationKind::CharacterData => MutationMask::CHARACTER_DATA,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct MutationRecord {
    pub kind: MutationKind,
}

/// Scroll vs. client extents of a target, as last reported by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElementMetrics {
    pub scroll_width: f32,
    pub scroll_height: f32,
    pub client_width: f32,
    pub client_height: f32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct IntersectionOptions {
    /// Viewport to intersect against; `None` means the root viewport.
    pub root: Option<TargetId>,
    /// Margin (px) grown around the root before testing intersection.
    pub root_margin: f32,
}

new_key_type! {
    struct MutationKey;
    struct IntersectionKey;
}

struct MutationObserver {
    target: TargetId,
    mask: MutationMask,
    callback: Rc<dyn Fn(&[MutationRecord])>,
}

struct IntersectionObserver {
    target: TargetId,
    #[allow(dead_code)]
    options: IntersectionOptions,
    callback: Rc<dyn Fn(bool)>,
}

#[derive(Default)]
struct Registry {
    next_target: TargetId,
    metrics: HashMap<TargetId, ElementMetrics>,
    mutations: SlotMap<MutationKey, MutationObserver>,
    intersections: SlotMap<IntersectionKey, IntersectionObserver>,
}

thread_local! {
    static REGISTRY: RefCell<Registry> = RefCell::new(Registry::default());
}

/// Issues a fresh element handle.
pub fn new_target() -> TargetId {
    REGISTRY.with(|r| {
        let mut r = r.borrow_mut();
        r.next_target += 1;
        r.next_target
    })
}

pub fn set_metrics(target: TargetId, metrics: ElementMetrics) {
    REGISTRY.with(|r| {
        r.borrow_mut().metrics.insert(target, metrics);
    });
}

pub fn metrics(target: TargetId) -> Option<ElementMetrics> {
    REGISTRY.with(|r| r.borrow().metrics.get(&target).copied())
}

/// Registers a mutation observer. Only records whose kind is in `mask` are
/// delivered; the callback never fires with an empty record set.
pub fn observe_mutations(
    target: TargetId,
    mask: MutationMask,
    callback: impl Fn(&[MutationRecord]) + 'static,
) -> Unregister {
    let key = REGISTRY.with(|r| {
        r.borrow_mut().mutations.insert(MutationObserver {
            target,
            mask,
            callback: Rc::new(callback),
        })
    });
    Unregister::new(move || {
        REGISTRY.with(|r| {
            r.borrow_mut().mutations.remove(key);
        });
    })
}

/// Registers an intersection observer for a target.
pub fn observe_intersection(
    target: TargetId,
    options: IntersectionOptions,
    callback: impl Fn(bool) + 'static,
) -> Unregister {
    let key = REGISTRY.with(|r| {
        r.borrow_mut().intersections.insert(IntersectionObserver {
            target,
            options,
            callback: Rc::new(callback),
        })
    });
    Unregister::new(move || {
        REGISTRY.with(|r| {
            r.borrow_mut().intersections.remove(key);
        });
    })
}

/// Host entry point: delivers mutation records for a target to every observer
/// whose mask matches at least one record.
pub fn emit_mutations(target: TargetId, records: &[MutationRecord]) {
    // Snapshot callbacks before dispatch; a callback may (un)register.
    let pending: Vec<(Rc<dyn Fn(&[MutationRecord])>, Vec<MutationRecord>)> = REGISTRY.with(|r| {
        r.borrow()
            .mutations
            .values()
            .filter(|obs| obs.target == target)
            .filter_map(|obs| {
                let matched: Vec<MutationRecord> = records
                    .iter()
                    .filter(|rec| obs.mask.contains(rec.kind.mask()))
                    .copied()
                    .collect();
                if matched.is_empty() {
                    None
                } else {
                    Some((obs.callback.clone(), matched))
                }
            })
            .collect()
    });

    for (callback, matched) in pending {
        callback(&matched);
    }
}

/// Host entry point: reports a target entering or leaving its root viewport.
pub fn emit_intersection(target: TargetId, is_intersecting: bool) {
    let pending: Vec<Rc<dyn Fn(bool)>> = REGISTRY.with(|r| {
        r.borrow()
            .intersections
            .values()
            .filter(|obs| obs.target == target)
            .map(|obs| obs.callback.clone())
            .collect()
    });

    for callback in pending {
        callback(is_intersecting);
    }
}
