#![forbid(unsafe_code)]

//! Reactive runtime for Waypoint.
//!
//! The host owns a [`Viewport`] and feeds it resize events. Layout and scale
//! consumers hold watches derived from it, and tutorial state lives in
//! [`Observable`] cells so view models re-read only what changed.
//!
//! Everything here is single-threaded (`Rc`-based) and must stay on the
//! thread that created it.

pub mod config;
pub mod reactive;
pub mod viewport;

pub use config::{
    ConfigError, DisplayConfig, HighlightConfig, MAX_AUTO_START_DELAY_MS, TutorialConfig,
    WaypointConfig,
};
pub use reactive::{BatchScope, Derived, Observable, Subscription};
pub use viewport::{AxisPolicy, LayoutQuery, ScaleQuery, Viewport, ViewportState};
