#![forbid(unsafe_code)]

//! Observable value wrapper with change notification and version tracking.
//!
//! [`Observable<T>`] keeps a value in shared `Rc<RefCell<..>>` storage. When
//! the value changes (by `PartialEq`), every live subscriber is called in
//! registration order. [`Derived<T>`] chains a mapping onto a source so a
//! resolved layout or scale follows the viewport automatically.
//!
//! # Invariants
//!
//! 1. `version` increments by exactly 1 on each value-changing mutation.
//! 2. `set(v)` where `v == current` is a no-op.
//! 3. Subscribers are notified in registration order.
//! 4. A [`Derived`] cell only notifies when its mapped value changes.
//!
//! # Failure Modes
//!
//! - **Subscriber leak**: [`Subscription`] guards kept forever keep their
//!   callbacks alive. Dead weak references are pruned lazily on notify.
//! - Observables are `!Send`. Everything runs on the host's UI thread.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, debug_span};
use web_time::Instant;

use super::batch;

type CallbackRc<T> = Rc<dyn Fn(&T)>;
type CallbackWeak<T> = Weak<dyn Fn(&T)>;

struct ObservableInner<T> {
    value: T,
    version: u64,
    /// Pruned on notify.
    subscribers: Vec<CallbackWeak<T>>,
}

/// A shared, version-tracked value with change notification.
///
/// Cloning an `Observable` creates another handle to the same state.
pub struct Observable<T> {
    inner: Rc<RefCell<ObservableInner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create a new observable. The initial version is 0.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Borrow the current value without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the value, notifying subscribers if it changed.
    ///
    /// Safe to call from within a subscriber callback.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }

    /// Modify the value in place, notifying subscribers if it changed.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            let old = inner.value.clone();
            f(&mut inner.value);
            if inner.value != old {
                inner.version += 1;
                true
            } else {
                false
            }
        };
        if changed {
            self.notify();
        }
    }

    /// Register a change callback. Dropping the returned guard unsubscribes.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: CallbackRc<T> = Rc::new(callback);
        let weak = Rc::downgrade(&strong);
        self.inner.borrow_mut().subscribers.push(weak);
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// A cell holding `f(value)`, recomputed whenever this one changes.
    pub fn derive<U>(&self, f: impl Fn(&T) -> U + 'static) -> Derived<U>
    where
        U: Clone + PartialEq + 'static,
    {
        let target = Observable::new(self.with(&f));
        let sink = target.clone();
        let source = self.subscribe(move |value| sink.set(f(value)));
        Derived {
            value: target,
            _source: source,
        }
    }

    /// Increments by 1 on each value-changing mutation.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Registered subscribers, including dead ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// Notify live subscribers and prune dead ones. Deferred while a
    /// [`BatchScope`](super::BatchScope) is open.
    fn notify(&self) {
        let callbacks: Vec<CallbackRc<T>> = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|w| w.strong_count() > 0);
            inner
                .subscribers
                .iter()
                .filter_map(|w| w.upgrade())
                .collect()
        };

        if callbacks.is_empty() {
            return;
        }

        if batch::is_batching() {
            for cb in callbacks {
                let key = Rc::as_ptr(&cb) as *const () as usize;
                let source = self.clone();
                batch::defer_or_run_keyed(key, move || {
                    let latest = source.get();
                    cb(&latest);
                });
            }
            return;
        }

        let value = self.get();
        let subscribers = callbacks.len() as u64;
        let started = Instant::now();
        let _span = debug_span!(
            "waypoint.propagate",
            subscribers,
            duration_us = tracing::field::Empty
        )
        .entered();

        for cb in &callbacks {
            cb(&value);
        }

        let duration_us = started.elapsed().as_micros() as u64;
        tracing::Span::current().record("duration_us", duration_us);
        debug!(subscribers, duration_us, "observable change propagated");
    }
}

/// A read-only cell kept in sync with a source [`Observable`].
///
/// Dropping the `Derived` detaches it from its source.
pub struct Derived<T> {
    value: Observable<T>,
    _source: Subscription,
}

impl<T: Clone + PartialEq + 'static> Derived<T> {
    #[must_use]
    pub fn get(&self) -> T {
        self.value.get()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.value.with(f)
    }

    /// Register a callback for changes of the derived value.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.value.subscribe(callback)
    }

    /// Chain another mapping.
    pub fn derive<U>(&self, f: impl Fn(&T) -> U + 'static) -> Derived<U>
    where
        U: Clone + PartialEq + 'static,
    {
        self.value.derive(f)
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.value.version()
    }

    /// A handle to the underlying cell. Holders see updates only while this
    /// `Derived` is alive.
    #[must_use]
    pub fn observable(&self) -> Observable<T> {
        self.value.clone()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Derived<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Derived").field(&self.value).finish()
    }
}

/// RAII guard for a subscriber callback.
///
/// Dropping it drops the strong `Rc`, so the observable's `Weak` fails to
/// upgrade on the next notification.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
