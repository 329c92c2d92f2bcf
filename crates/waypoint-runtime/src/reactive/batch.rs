#![forbid(unsafe_code)]

//! Batch update coalescing for [`Observable`](super::Observable)
//! notifications.
//!
//! A tutorial transition touches several cells at once (active flag,
//! current step, open panels). Inside a [`BatchScope`] values change
//! immediately but notifications are queued, and each subscriber fires at
//! most once with the final value when the outermost scope drops.
//!
//! # Invariants
//!
//! 1. Nested batches are supported: only the outermost scope flushes.
//! 2. Within a batch, `Observable::get()` returns the latest value.
//! 3. Flush calls deferred callbacks in the order they were first enqueued.
//! 4. Notifications raised by callbacks during a flush run immediately.
//!
//! # Failure Modes
//!
//! - **Callback panics during flush**: remaining callbacks still run and the
//!   first panic is re-raised afterwards.

use std::cell::RefCell;

use tracing::{debug, debug_span};
use web_time::Instant;

type DeferredNotify = Box<dyn FnOnce()>;

struct DeferredEntry {
    key: Option<usize>,
    notify: DeferredNotify,
}

struct BatchContext {
    /// Flush when this reaches 0.
    depth: u32,
    deferred: Vec<DeferredEntry>,
}

thread_local! {
    static BATCH_CTX: RefCell<Option<BatchContext>> = const { RefCell::new(None) };
}

/// Whether a batch is open on this thread.
pub fn is_batching() -> bool {
    BATCH_CTX.with(|ctx| ctx.borrow().is_some())
}

/// Queue `f` until the current batch exits, or run it now if none is open.
///
/// Returns `true` if deferred.
pub fn defer_or_run(f: impl FnOnce() + 'static) -> bool {
    enqueue(None, Box::new(f))
}

/// Like [`defer_or_run`], but a second callback with the same `key` replaces
/// the queued one while keeping its original position.
pub fn defer_or_run_keyed(key: usize, f: impl FnOnce() + 'static) -> bool {
    enqueue(Some(key), Box::new(f))
}

fn enqueue(key: Option<usize>, notify: DeferredNotify) -> bool {
    let rejected = BATCH_CTX.with(|ctx| {
        let mut guard = ctx.borrow_mut();
        let Some(batch) = guard.as_mut() else {
            return Some(notify);
        };
        let existing = match key {
            Some(_) => batch.deferred.iter().position(|e| e.key == key),
            None => None,
        };
        match existing {
            Some(index) => batch.deferred[index].notify = notify,
            None => batch.deferred.push(DeferredEntry { key, notify }),
        }
        None
    });
    match rejected {
        Some(notify) => {
            notify();
            false
        }
        None => true,
    }
}

/// Run the deferred queue. The context is already cleared, so callbacks
/// that mutate other cells notify immediately.
fn flush(deferred: Vec<DeferredEntry>) {
    if deferred.is_empty() {
        return;
    }

    let callbacks = deferred.len() as u64;
    let started = Instant::now();
    let _span = debug_span!(
        "waypoint.batch_flush",
        callbacks,
        duration_us = tracing::field::Empty
    )
    .entered();

    let mut first_panic: Option<Box<dyn std::any::Any + Send>> = None;
    for entry in deferred {
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(entry.notify));
        if let Err(payload) = result
            && first_panic.is_none()
        {
            first_panic = Some(payload);
        }
    }

    let duration_us = started.elapsed().as_micros() as u64;
    tracing::Span::current().record("duration_us", duration_us);
    debug!(callbacks, duration_us, "batch flushed");

    if let Some(payload) = first_panic {
        std::panic::resume_unwind(payload);
    }
}

/// RAII guard that opens a batch scope.
pub struct BatchScope {
    is_root: bool,
}

impl BatchScope {
    /// Open a scope, or nest inside the current one.
    #[must_use]
    pub fn new() -> Self {
        let is_root = BATCH_CTX.with(|ctx| {
            let mut guard = ctx.borrow_mut();
            match guard.as_mut() {
                Some(batch) => {
                    batch.depth += 1;
                    false
                }
                None => {
                    *guard = Some(BatchContext {
                        depth: 1,
                        deferred: Vec::new(),
                    });
                    true
                }
            }
        });
        Self { is_root }
    }

    /// Notifications queued in the current batch.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        BATCH_CTX.with(|ctx| ctx.borrow().as_ref().map_or(0, |b| b.deferred.len()))
    }
}

impl Default for BatchScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BatchScope {
    fn drop(&mut self) {
        let finished = BATCH_CTX.with(|ctx| {
            let mut guard = ctx.borrow_mut();
            let done = match guard.as_mut() {
                Some(batch) => {
                    batch.depth -= 1;
                    batch.depth == 0
                }
                None => false,
            };
            if done { guard.take() } else { None }
        });

        if let Some(batch) = finished {
            flush(batch.deferred);
        }
    }
}

impl std::fmt::Debug for BatchScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchScope")
            .field("is_root", &self.is_root)
            .field("pending", &self.pending_count())
            .finish()
    }
}
