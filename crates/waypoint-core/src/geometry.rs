#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Sizes and rectangles are `f64` in host pixels: the game client reports
//! fractional viewport and element sizes.

use thiserror::Error;

/// Rejected geometry input.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    /// A width or height that is zero, negative, NaN, or infinite.
    #[error("invalid dimensions {width}x{height}: both sides must be positive and finite")]
    InvalidDimensions { width: f64, height: f64 },
}

/// A viewport or design resolution, width × height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScreenSize {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl ScreenSize {
    /// Create a size without validation.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Create a size, rejecting non-positive or non-finite sides.
    pub fn try_new(width: f64, height: f64) -> Result<Self, GeometryError> {
        Self::new(width, height).validate()
    }

    /// Return `self` if both sides are positive and finite.
    pub fn validate(self) -> Result<Self, GeometryError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(GeometryError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Both sides positive and finite.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Strictly wider than tall. A square is portrait.
    #[inline]
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }

    /// Width divided by height.
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// The shorter side.
    #[inline]
    pub fn smallest_dimension(&self) -> f64 {
        self.width.min(self.height)
    }

    /// Both sides multiplied by `factor`.
    #[inline]
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }

    /// Width and height exchanged.
    #[inline]
    pub fn transposed(&self) -> Self {
        Self::new(self.height, self.width)
    }
}

impl From<(f64, f64)> for ScreenSize {
    fn from((width, height): (f64, f64)) -> Self {
        Self::new(width, height)
    }
}

impl std::fmt::Display for ScreenSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// An on-screen rectangle in absolute pixels (origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UiRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl UiRect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle of `size` centred on the point `(cx, cy)`.
    pub fn centered(cx: f64, cy: f64, size: ScreenSize) -> Self {
        Self::new(
            cx - size.width / 2.0,
            cy - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Zero or negative area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Grow the rectangle by `amount` on every side.
    pub fn inflate(&self, amount: f64) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    /// Clip to `bounds`. Returns `None` if the rectangles don't overlap.
    pub fn intersection(&self, bounds: &UiRect) -> Option<UiRect> {
        let x = self.x.max(bounds.x);
        let y = self.y.max(bounds.y);
        let right = self.right().min(bounds.right());
        let bottom = self.bottom().min(bounds.bottom());

        if x < right && y < bottom {
            Some(UiRect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }
}

/// An opaque 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a colour from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
}
