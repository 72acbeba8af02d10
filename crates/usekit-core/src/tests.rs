#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use futures::channel::oneshot;

    use crate::observe::{
        self, ElementMetrics, IntersectionOptions, MutationKind, MutationMask, MutationRecord,
    };
    use crate::runtime::COMPOSER;
    use crate::signal::signal;
    use crate::{ComposeGuard, Scope, history, remember, remember_with_key, task};

    #[test]
    fn signal_get_set_update() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
    }

    #[test]
    fn signal_subscription_and_unsubscribe() {
        let sig = signal(0);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen2 = seen.clone();
        let id = sig.subscribe(move |v| seen2.borrow_mut().push(*v));

        sig.set(1);
        sig.update(|v| *v = 2);
        assert_eq!(*seen.borrow(), vec![1, 2]);

        sig.unsubscribe(id);
        sig.unsubscribe(id); // second removal is a no-op
        sig.set(3);
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn scope_runs_disposers_on_dispose() {
        let cleaned = Rc::new(RefCell::new(false));

        let scope = Scope::new();
        let cleaned2 = cleaned.clone();
        scope.add_disposer(move || *cleaned2.borrow_mut() = true);

        assert!(!*cleaned.borrow());
        scope.dispose();
        assert!(*cleaned.borrow());
    }

    #[test]
    fn effect_cleanup_runs_on_scope_dispose() {
        let cleaned = Rc::new(RefCell::new(false));

        let scope = Scope::new();
        scope.run(|| {
            let cleaned2 = cleaned.clone();
            let _ = crate::effect(move || crate::on_unmount(move || *cleaned2.borrow_mut() = true));
        });

        assert!(!*cleaned.borrow());
        scope.dispose();
        assert!(*cleaned.borrow());
    }

    #[test]
    fn scoped_effect_cleanup_runs_once() {
        let count = Rc::new(RefCell::new(0));

        let scope = Scope::new();
        let c = count.clone();
        scope.run(|| crate::scoped_effect(move || Box::new(move || *c.borrow_mut() += 1)));

        scope.dispose();
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn remember_slots_survive_recomposition() {
        let counter = Rc::new(RefCell::new(0));

        let pass = |counter: Rc<RefCell<i32>>| {
            let guard = ComposeGuard::begin();
            guard.scope().run(|| {
                remember(move || {
                    *counter.borrow_mut() += 1;
                    "slot"
                })
            })
        };

        let a = pass(counter.clone());
        let b = pass(counter.clone());
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(*counter.borrow(), 1);
    }

    #[test]
    fn keyed_remember_returns_first_init() {
        COMPOSER.with(|c| c.borrow_mut().keyed_slots.clear());

        let val1 = remember_with_key("test", || 42);
        let val2 = remember_with_key("test", || 100);

        assert_eq!(*val1, 42);
        assert_eq!(*val2, 42);
    }

    #[test]
    fn task_pool_interleaves_suspended_futures() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let (tx_a, rx_a) = oneshot::channel::<()>();
        let (tx_b, rx_b) = oneshot::channel::<()>();

        let o = order.clone();
        task::spawn_local(async move {
            let _ = rx_a.await;
            o.borrow_mut().push("a");
        });
        let o = order.clone();
        task::spawn_local(async move {
            let _ = rx_b.await;
            o.borrow_mut().push("b");
        });

        task::run_until_stalled();
        assert!(order.borrow().is_empty());

        // Resumption order follows resolution order, not spawn order.
        let _ = tx_b.send(());
        task::run_until_stalled();
        let _ = tx_a.send(());
        task::run_until_stalled();
        assert_eq!(*order.borrow(), vec!["b", "a"]);
    }

    #[test]
    fn mutation_observer_filters_by_mask() {
        let target = observe::new_target();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen2 = seen.clone();
        let reg = observe::observe_mutations(
            target,
            MutationMask::CHILD_LIST | MutationMask::SUBTREE,
            move |records| {
                seen2.borrow_mut().extend(records.iter().map(|r| r.kind));
            },
        );

        observe::emit_mutations(
            target,
            &[
                MutationRecord {
                    kind: MutationKind::Attributes,
                },
                MutationRecord {
                    kind: MutationKind::ChildList,
                },
            ],
        );
        assert_eq!(*seen.borrow(), vec![MutationKind::ChildList]);

        // Attribute-only batch never reaches a child-list observer.
        observe::emit_mutations(
            target,
            &[MutationRecord {
                kind: MutationKind::Attributes,
            }],
        );
        assert_eq!(seen.borrow().len(), 1);

        reg.unregister();
        reg.unregister(); // idempotent
        observe::emit_mutations(
            target,
            &[MutationRecord {
                kind: MutationKind::ChildList,
            }],
        );
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn intersection_observer_delivery_stops_after_teardown() {
        let target = observe::new_target();
        let visible = signal(false);

        let scope = Scope::new();
        scope.run(|| {
            let v = visible.clone();
            let reg =
                observe::observe_intersection(target, IntersectionOptions::default(), move |on| {
                    v.set(on)
                });
            reg.unregister_on_teardown();
        });

        observe::emit_intersection(target, true);
        assert!(visible.get());

        scope.dispose();
        observe::emit_intersection(target, false);
        assert!(visible.get()); // no longer observed
    }

    #[test]
    fn element_metrics_round_trip() {
        let target = observe::new_target();
        assert_eq!(observe::metrics(target), None);

        let m = ElementMetrics {
            scroll_width: 800.0,
            scroll_height: 1200.0,
            client_width: 800.0,
            client_height: 600.0,
        };
        observe::set_metrics(target, m);
        assert_eq!(observe::metrics(target), Some(m));
    }

    #[test]
    fn history_push_replace_and_back() {
        history::reset("a=1");
        assert_eq!(history::current_search(), "a=1");
        assert_eq!(history::depth(), 1);

        history::apply_search("?a=2", history::HistoryMode::Push);
        assert_eq!(history::current_search(), "a=2");
        assert_eq!(history::depth(), 2);

        history::apply_search("a=3", history::HistoryMode::Replace);
        assert_eq!(history::current_search(), "a=3");
        assert_eq!(history::depth(), 2);

        let popped = Rc::new(RefCell::new(None));
        let popped2 = popped.clone();
        let reg = history::on_pop_state(move |s| *popped2.borrow_mut() = Some(s.to_string()));

        history::back();
        assert_eq!(history::current_search(), "a=1");
        assert_eq!(popped.borrow().as_deref(), Some("a=1"));

        // The initial entry is never popped.
        history::back();
        assert_eq!(history::depth(), 1);
        assert_eq!(history::current_search(), "a=1");

        reg.unregister();
    }
}
