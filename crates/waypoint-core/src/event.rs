#![forbid(unsafe_code)]

//! Canonical host events.
//!
//! The host (game client) pushes these into the runtime. Only the two
//! signals the overlay consumes are modelled: viewport resizes and pointer
//! presses.

use crate::geometry::{GeometryError, ScreenSize};

/// Canonical host event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// The viewport was resized.
    Resize {
        /// New viewport width in pixels.
        width: f64,
        /// New viewport height in pixels.
        height: f64,
    },

    /// Primary pointer pressed at absolute coordinates.
    PointerDown {
        /// Horizontal position in pixels.
        x: f64,
        /// Vertical position in pixels.
        y: f64,
    },
}

impl Event {
    /// Build a resize event from a size.
    pub const fn resize(size: ScreenSize) -> Self {
        Self::Resize {
            width: size.width,
            height: size.height,
        }
    }

    /// The validated size carried by a resize event.
    ///
    /// Returns `None` for non-resize events.
    pub fn resize_size(&self) -> Option<Result<ScreenSize, GeometryError>> {
        match *self {
            Self::Resize { width, height } => Some(ScreenSize::try_new(width, height)),
            Self::PointerDown { .. } => None,
        }
    }
}
