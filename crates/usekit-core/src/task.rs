//! Single-threaded cooperative task executor.
//!
//! All "concurrency" in usekit is interleaved suspension on one logical
//! thread: hooks spawn futures here, and the host drives the pool between
//! events with [`run_until_stalled`]. There is no parallelism and no locking;
//! a suspended task resumes exactly where the awaited future wakes it.

use std::cell::RefCell;
use std::future::Future;

use futures::executor::{LocalPool, LocalSpawner};
use futures::task::LocalSpawnExt;

thread_local! {
    static POOL: RefCell<LocalPool> = RefCell::new(LocalPool::new());
    static SPAWNER: RefCell<Option<LocalSpawner>> = const { RefCell::new(None) };
}

fn spawner() -> LocalSpawner {
    SPAWNER.with(|s| {
        if let Some(sp) = s.borrow().as_ref() {
            return sp.clone();
        }
        let sp = POOL.with(|p| p.borrow().spawner());
        *s.borrow_mut() = Some(sp.clone());
        sp
    })
}

/// Queues a future on the thread's pool. Safe to call from inside a running
/// task; the new task is picked up by the current or next [`run_until_stalled`].
pub fn spawn_local(fut: impl Future<Output = ()> + 'static) {
    if let Err(err) = spawner().spawn_local(fut) {
        log::error!("spawn_local: executor is shut down: {err}");
    }
}

/// Polls queued tasks until none can make further progress.
pub fn run_until_stalled() {
    POOL.with(|p| p.borrow_mut().run_until_stalled());
}
