use std::cell::RefCell;
use std::rc::Rc;

use smallvec::SmallVec;

pub type SubId = u64;

/// Observable, reactive value. Cloning the handle shares the same cell.
///
/// `set`/`update` notify every live subscriber synchronously; subscribers are
/// how a host runtime schedules re-renders of dependent consumers. There is no
/// transactional batching, writes are last-write-wins.
#[derive(Clone)]
pub struct Signal<T: 'static>(Rc<RefCell<Inner<T>>>);

struct Sub<T> {
    id: SubId,
    notify: Box<dyn Fn(&T)>,
}

struct Inner<T> {
    value: T,
    next_sub: SubId,
    subs: SmallVec<[Sub<T>; 2]>,
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            value,
            next_sub: 0,
            subs: SmallVec::new(),
        })))
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.borrow().value.clone()
    }

    /// Reads through a borrow without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow().value)
    }

    pub fn set(&self, value: T) {
        let mut inner = self.0.borrow_mut();
        inner.value = value;
        Self::notify(&inner);
    }

    pub fn update<F: FnOnce(&mut T)>(&self, f: F) {
        let mut inner = self.0.borrow_mut();
        f(&mut inner.value);
        Self::notify(&inner);
    }

    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubId {
        let mut inner = self.0.borrow_mut();
        let id = inner.next_sub;
        inner.next_sub += 1;
        inner.subs.push(Sub {
            id,
            notify: Box::new(f),
        });
        id
    }

    /// Safe to call with an id that was already removed.
    pub fn unsubscribe(&self, id: SubId) {
        self.0.borrow_mut().subs.retain(|s| s.id != id);
    }

    fn notify(inner: &Inner<T>) {
        for sub in &inner.subs {
            (sub.notify)(&inner.value);
        }
    }
}

pub fn signal<T>(value: T) -> Signal<T> {
    Signal::new(value)
}
