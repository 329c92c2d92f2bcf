#![forbid(unsafe_code)]

//! Device layout detection, whitelist resolution, and UI scaling.
//!
//! A screen size is classified into one of six [`DeviceLayout`]s
//! (mobile/tablet/desktop × landscape/portrait) by fixed thresholds, then
//! optionally narrowed to the nearest layout a UI context supports. The
//! detected category also selects how UI pixels scale with the viewport.
//!
//! ```
//! use waypoint_core::ScreenSize;
//! use waypoint_layout::{DeviceLayout, classify, closest_layout};
//!
//! let detected = classify(ScreenSize::new(390.0, 844.0)).unwrap();
//! assert_eq!(detected, DeviceLayout::MobilePortrait);
//!
//! let whitelist = [DeviceLayout::TabletLandscape, DeviceLayout::DesktopPortrait];
//! assert_eq!(
//!     closest_layout(detected, &whitelist).unwrap(),
//!     DeviceLayout::TabletLandscape
//! );
//! ```
//!
//! Everything here is a pure function of its inputs; recomputation on
//! resize lives in `waypoint-runtime`.
//!
//! [`DeviceCategory::scaling_factor`] is not used by the scale computation.
//! It is exported for hosts that author separate assets per category.

pub mod classify;
pub mod device;
pub mod resolve;
pub mod scale;
pub mod switch;

pub use classify::{Classification, ClassificationRule, classify, explain};
pub use device::{DeviceCategory, DeviceLayout, Orientation};
pub use resolve::{
    OrientationLock, closest_landscape_layout, closest_layout, closest_portrait_layout, resolve,
};
pub use scale::{DEFAULT_BASE_RESOLUTION, Px, compute_scale, dominant_axis};
pub use switch::{CategorySwitch, LayoutSwitch};

pub use waypoint_core::{GeometryError, ScreenSize};

use thiserror::Error;

/// Errors from layout classification, resolution, and scaling.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Screen or base dimensions were zero, negative, NaN, or infinite.
    #[error(transparent)]
    InvalidDimensions(#[from] GeometryError),

    /// `closest_layout` was called with nothing to choose from.
    #[error("whitelist is empty")]
    EmptyWhitelist,

    /// Dominant axis outside `[0, 1]` or not finite.
    #[error("dominant axis must be within [0, 1], got {0}")]
    InvalidDominantAxis(f64),

    /// The viewport-to-base ratio is too extreme to represent as a scale.
    #[error("scale for {viewport} over base {base} is not representable")]
    ScaleOutOfRange {
        viewport: ScreenSize,
        base: ScreenSize,
    },

    /// A layout, category, or orientation name that does not parse.
    #[error("unknown {kind}: {name:?}")]
    UnknownName { kind: &'static str, name: String },
}
