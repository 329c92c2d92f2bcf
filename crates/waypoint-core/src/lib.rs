#![forbid(unsafe_code)]

//! Core: screen geometry, host events, and dimension validation.
//!
//! # Role in Waypoint
//! `waypoint-core` is the input layer. It owns the value types that cross
//! the boundary with the host game client: viewport sizes, on-screen
//! rectangles, colours, and the [`event::Event`] stream the host pushes
//! (resizes and pointer presses).
//!
//! # How it fits in the system
//! `waypoint-layout` classifies a [`geometry::ScreenSize`] into a device
//! layout, `waypoint-runtime` re-runs that classification whenever an
//! [`event::Event::Resize`] arrives, and `waypoint-tutorial` uses
//! [`geometry::UiRect`] for highlight targets and pointer hit testing.

pub mod event;
pub mod geometry;

pub use event::Event;
pub use geometry::{GeometryError, Rgb, ScreenSize, UiRect};
