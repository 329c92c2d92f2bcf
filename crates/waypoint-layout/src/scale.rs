#![forbid(unsafe_code)]

//! Viewport-relative UI scale.
//!
//! UI is authored against a base resolution. The scale applied on a given
//! viewport blends the width ratio and the height ratio in log space:
//!
//! ```text
//! w = log2(viewport.w / base.w)
//! h = log2(viewport.h / base.h)
//! scale = 2 ^ (w + (h - w) * axis)
//! ```
//!
//! `axis = 0` scales by width alone, `axis = 1` by height alone. Doubling
//! both viewport sides doubles the scale for every axis.

use waypoint_core::ScreenSize;

use crate::LayoutError;
use crate::device::{DeviceCategory, DeviceLayout};

/// Resolution UI is designed against unless configured otherwise.
pub const DEFAULT_BASE_RESOLUTION: ScreenSize = ScreenSize::new(1920.0, 1080.0);

/// Blend weight between width (0) and height (1) scaling for a layout.
///
/// Phones vary most in aspect ratio so they scale by height; tablets and
/// desktops lean towards height with some width influence.
pub const fn dominant_axis(layout: DeviceLayout) -> f64 {
    match layout.category() {
        DeviceCategory::Mobile => 1.0,
        DeviceCategory::Tablet => 0.7,
        DeviceCategory::Desktop => 0.8,
    }
}

/// Scale factor for `viewport` relative to `base`.
///
/// Fails on invalid sizes, an axis outside `[0, 1]`, or a ratio so extreme
/// that the scale would be zero, infinite, or NaN.
pub fn compute_scale(
    viewport: ScreenSize,
    base: ScreenSize,
    dominant_axis: f64,
) -> Result<f64, LayoutError> {
    let viewport = viewport.validate()?;
    let base = base.validate()?;
    if !(0.0..=1.0).contains(&dominant_axis) {
        return Err(LayoutError::InvalidDominantAxis(dominant_axis));
    }

    let width = (viewport.width / base.width).log2();
    let height = (viewport.height / base.height).log2();
    let scale = (width + (height - width) * dominant_axis).exp2();
    if !(width.is_finite() && height.is_finite() && scale.is_finite() && scale > 0.0) {
        return Err(LayoutError::ScaleOutOfRange { viewport, base });
    }
    Ok(scale)
}

/// A computed scale, applied to design-time pixel values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Px {
    scale: f64,
}

impl Px {
    /// Unit scale: pixels pass through unchanged.
    pub const IDENTITY: Self = Self { scale: 1.0 };

    /// Scale for `viewport` with a fixed dominant axis.
    pub fn new(
        viewport: ScreenSize,
        base: ScreenSize,
        dominant_axis: f64,
    ) -> Result<Self, LayoutError> {
        compute_scale(viewport, base, dominant_axis).map(|scale| Self { scale })
    }

    /// Scale for `viewport` with the axis chosen by the layout's category.
    pub fn adaptive(
        viewport: ScreenSize,
        base: ScreenSize,
        layout: DeviceLayout,
    ) -> Result<Self, LayoutError> {
        Self::new(viewport, base, dominant_axis(layout))
    }

    /// Wrap an already computed scale.
    pub const fn from_scale(scale: f64) -> Self {
        Self { scale }
    }

    #[inline]
    pub const fn scale(self) -> f64 {
        self.scale
    }

    /// Convert a design-time pixel value.
    #[inline]
    pub fn px(self, value: f64) -> f64 {
        value * self.scale
    }

    /// Convert a design-time size.
    #[inline]
    pub fn size(self, size: ScreenSize) -> ScreenSize {
        size.scaled(self.scale)
    }
}

impl Default for Px {
    fn default() -> Self {
        Self::IDENTITY
    }
}
