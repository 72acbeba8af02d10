//! # Async request lifecycle
//!
//! [`UseAsync`] wraps one asynchronous operation (a factory of futures keyed
//! by parameters) with observable `loading` / `data` / `error` / `params`
//! state. It supports manual invocation (`run`), re-invocation with the last
//! parameters (`refresh`), soft cancellation (`cancel`), and direct data
//! overrides (`mutate`).
//!
//! Concurrent `run` calls are allowed; last call wins. Every `run` bumps a
//! per-manager generation counter and captures it; a settling invocation only
//! touches state if its captured generation is still current. A superseded
//! resolution is dropped silently: no state change, no callbacks. `cancel`
//! clears `loading` and bumps the generation, so the in-flight result is
//! dropped on arrival; the underlying operation itself is not aborted.
//!
//! ```rust
//! use futures::FutureExt;
//! use usekit_core::task;
//! use usekit_hooks::{AsyncOptions, UseAsync};
//!
//! let doubled = UseAsync::new(
//!     |n: Option<u32>| async move { anyhow::Ok(n.unwrap_or(0) * 2) }.boxed_local(),
//!     AsyncOptions::new().manual(true),
//! );
//!
//! let run = doubled.run(Some(21));
//! task::spawn_local(async move {
//!     run.await;
//! });
//! task::run_until_stalled();
//! assert_eq!(doubled.data(), Some(42));
//! ```

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use usekit_core::{Signal, remember_with_key, signal, task};

/// Cloneable settled-error handle: the operation's failure as reported by
/// [`UseAsync::error`] and `on_error`.
pub type AsyncError = Rc<anyhow::Error>;

type Service<T, P> = Rc<dyn Fn(Option<P>) -> LocalBoxFuture<'static, Result<T, AsyncError>>>;

type OnBefore<P> = Rc<dyn Fn(Option<&P>) -> bool>;
type OnSuccess<T, P> = Rc<dyn Fn(&T, Option<&P>)>;
type OnError<P> = Rc<dyn Fn(&AsyncError, Option<&P>)>;
type OnFinally<T, P> = Rc<dyn Fn(Option<&P>, Option<&T>, Option<&AsyncError>)>;

/// Configuration for [`UseAsync`]. All callbacks are optional and fire
/// synchronously inside the lifecycle transition, at most once per cycle:
/// `on_before` (may veto) → exactly one of `on_success` / `on_error` →
/// `on_finally`.
pub struct AsyncOptions<T, P> {
    manual: bool,
    default_params: Option<P>,
    on_before: Option<OnBefore<P>>,
    on_success: Option<OnSuccess<T, P>>,
    on_error: Option<OnError<P>>,
    on_finally: Option<OnFinally<T, P>>,
}

impl<T, P> Default for AsyncOptions<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P> AsyncOptions<T, P> {
    pub fn new() -> Self {
        Self {
            manual: false,
            default_params: None,
            on_before: None,
            on_success: None,
            on_error: None,
            on_finally: None,
        }
    }

    /// When true the manager starts idle and only runs when asked.
    pub fn manual(mut self, manual: bool) -> Self {
        self.manual = manual;
        self
    }

    /// Parameters for the automatic first run (and the initial `refresh`).
    pub fn default_params(mut self, params: P) -> Self {
        self.default_params = Some(params);
        self
    }

    /// Gate called before each invocation; returning false skips it entirely
    /// (no state change, parameters not recorded).
    pub fn on_before(mut self, f: impl Fn(Option<&P>) -> bool + 'static) -> Self {
        self.on_before = Some(Rc::new(f));
        self
    }

    pub fn on_success(mut self, f: impl Fn(&T, Option<&P>) + 'static) -> Self {
        self.on_success = Some(Rc::new(f));
        self
    }

    pub fn on_error(mut self, f: impl Fn(&AsyncError, Option<&P>) + 'static) -> Self {
        self.on_error = Some(Rc::new(f));
        self
    }

    /// Called after settling with `(params, data, error)`; exactly one of
    /// `data` / `error` is populated.
    pub fn on_finally(
        mut self,
        f: impl Fn(Option<&P>, Option<&T>, Option<&AsyncError>) + 'static,
    ) -> Self {
        self.on_finally = Some(Rc::new(f));
        self
    }
}

struct AsyncInner<T: Clone + 'static, P: Clone + 'static> {
    service: Service<T, P>,
    loading: Signal<bool>,
    data: Signal<Option<T>>,
    error: Signal<Option<AsyncError>>,
    params: RefCell<Option<P>>,
    /// Bumped on every accepted `run` and on `cancel`; an invocation only
    /// applies its result if its captured value is still current.
    generation: Cell<u64>,
    on_before: Option<OnBefore<P>>,
    on_success: Option<OnSuccess<T, P>>,
    on_error: Option<OnError<P>>,
    on_finally: Option<OnFinally<T, P>>,
}

/// Async request lifecycle manager. Cloning shares the same state.
pub struct UseAsync<T: Clone + 'static, P: Clone + 'static> {
    inner: Rc<AsyncInner<T, P>>,
}

impl<T: Clone + 'static, P: Clone + 'static> Clone for UseAsync<T, P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + 'static, P: Clone + 'static> UseAsync<T, P> {
    /// Wraps a factory of operations. Unless `manual` is set, one run with
    /// `default_params` is spawned on the local executor immediately.
    pub fn new(
        service: impl Fn(Option<P>) -> LocalBoxFuture<'static, anyhow::Result<T>> + 'static,
        options: AsyncOptions<T, P>,
    ) -> Self {
        Self::with_service(
            Rc::new(move |params: Option<P>| {
                let fut = service(params);
                async move { fut.await.map_err(Rc::new) }.boxed_local()
            }),
            options,
        )
    }

    /// Wraps a single already-built future. The future is shared, so repeated
    /// `run`/`refresh` calls re-observe the same settled value.
    pub fn from_future(
        fut: impl Future<Output = anyhow::Result<T>> + 'static,
        options: AsyncOptions<T, P>,
    ) -> Self {
        let shared = fut
            .map(|res| res.map_err(Rc::new))
            .boxed_local()
            .shared();
        Self::with_service(
            Rc::new(move |_params: Option<P>| shared.clone().boxed_local()),
            options,
        )
    }

    fn with_service(service: Service<T, P>, options: AsyncOptions<T, P>) -> Self {
        let manager = Self {
            inner: Rc::new(AsyncInner {
                service,
                loading: signal(!options.manual),
                data: signal(None),
                error: signal(None),
                params: RefCell::new(options.default_params.clone()),
                generation: Cell::new(0),
                on_before: options.on_before,
                on_success: options.on_success,
                on_error: options.on_error,
                on_finally: options.on_finally,
            }),
        };

        if !options.manual {
            let m = manager.clone();
            let params = options.default_params;
            task::spawn_local(async move {
                let _ = m.run(params).await;
            });
        }

        manager
    }

    /// Starts an invocation with `params`. Resolves to the success value, or
    /// `None` on failure, on an `on_before` veto, or when superseded by a
    /// later run. Never propagates the operation's error.
    pub fn run(&self, params: Option<P>) -> LocalBoxFuture<'static, Option<T>> {
        let inner = self.inner.clone();
        async move {
            if let Some(gate) = &inner.on_before
                && !gate(params.as_ref())
            {
                log::debug!("use_async: run vetoed by on_before");
                return None;
            }

            *inner.params.borrow_mut() = params.clone();
            let generation = inner.generation.get().wrapping_add(1);
            inner.generation.set(generation);
            inner.loading.set(true);

            let outcome = (inner.service)(params).await;

            // Liveness check: only the most recently issued invocation (and
            // not a cancelled one) may touch state.
            if inner.generation.get() != generation {
                log::debug!("use_async: dropping superseded resolution");
                return None;
            }

            let params = inner.params.borrow().clone();
            match outcome {
                Ok(value) => {
                    inner.data.set(Some(value.clone()));
                    inner.error.set(None);
                    if let Some(cb) = &inner.on_success {
                        cb(&value, params.as_ref());
                    }
                    inner.loading.set(false);
                    if let Some(cb) = &inner.on_finally {
                        cb(params.as_ref(), Some(&value), None);
                    }
                    Some(value)
                }
                Err(err) => {
                    inner.data.set(None);
                    inner.error.set(Some(err.clone()));
                    if let Some(cb) = &inner.on_error {
                        cb(&err, params.as_ref());
                    }
                    inner.loading.set(false);
                    if let Some(cb) = &inner.on_finally {
                        cb(params.as_ref(), None, Some(&err));
                    }
                    None
                }
            }
        }
        .boxed_local()
    }

    /// Re-runs with the most recently recorded parameters (`default_params`
    /// until a run has recorded something else).
    pub fn refresh(&self) -> LocalBoxFuture<'static, Option<T>> {
        let params = self.inner.params.borrow().clone();
        self.run(params)
    }

    /// Soft cancel: clears `loading` and forgets the current invocation so
    /// its eventual result is dropped. Settled `data`/`error` from a previous
    /// cycle are kept; the underlying operation is not aborted.
    pub fn cancel(&self) {
        self.inner.loading.set(false);
        self.inner
            .generation
            .set(self.inner.generation.get().wrapping_add(1));
    }

    /// Force-sets `data` without going through the operation.
    pub fn mutate(&self, data: Option<T>) {
        self.inner.data.set(data);
    }

    /// Force-updates `data` from its current value.
    pub fn mutate_with(&self, f: impl FnOnce(Option<&T>) -> Option<T>) {
        self.inner.data.update(|d| *d = f(d.as_ref()));
    }

    pub fn data(&self) -> Option<T> {
        self.inner.data.get()
    }

    pub fn loading(&self) -> bool {
        self.inner.loading.get()
    }

    pub fn error(&self) -> Option<AsyncError> {
        self.inner.error.get()
    }

    pub fn params(&self) -> Option<P> {
        self.inner.params.borrow().clone()
    }

    pub fn data_signal(&self) -> Signal<Option<T>> {
        self.inner.data.clone()
    }

    pub fn loading_signal(&self) -> Signal<bool> {
        self.inner.loading.clone()
    }

    pub fn error_signal(&self) -> Signal<Option<AsyncError>> {
        self.inner.error.clone()
    }
}

/// Composition wrapper: remembers one manager per key. Construction (and the
/// automatic first run, unless `manual`) happens only on the first pass.
pub fn use_async<T: Clone + 'static, P: Clone + 'static>(
    key: impl Into<String>,
    service: impl Fn(Option<P>) -> LocalBoxFuture<'static, anyhow::Result<T>> + 'static,
    options: AsyncOptions<T, P>,
) -> Rc<UseAsync<T, P>> {
    remember_with_key(key, || UseAsync::new(service, options))
}
