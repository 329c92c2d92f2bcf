#![forbid(unsafe_code)]

//! Reactive cells for viewport and tutorial state.
//!
//! - [`Observable<T>`]: a shared value with change notification.
//! - [`Derived<T>`]: a cell recomputed from a source whenever it changes.
//! - [`BatchScope`]: defers and coalesces notifications until it drops.

pub mod batch;
pub mod observable;

pub use batch::BatchScope;
pub use observable::{Derived, Observable, Subscription};
