#![forbid(unsafe_code)]

//! Device categories, orientations, and the six layouts they combine into.
//!
//! # Invariants
//!
//! 1. Every [`DeviceLayout`] decomposes into exactly one
//!    ([`DeviceCategory`], [`Orientation`]) pair, and
//!    [`DeviceLayout::new`] is its inverse.
//! 2. Categories are totally ordered Mobile < Tablet < Desktop.

use std::fmt;
use std::str::FromStr;

use crate::LayoutError;

/// Device size bucket, ordered smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceCategory {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceCategory {
    /// All categories in hierarchy order.
    pub const ALL: [Self; 3] = [Self::Mobile, Self::Tablet, Self::Desktop];

    /// Position in the hierarchy (0 = Mobile).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Categories strictly above `self`, nearest first.
    pub fn larger(self) -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().skip(self.index() + 1)
    }

    /// Categories strictly below `self`, nearest first.
    pub fn smaller(self) -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().take(self.index()).rev()
    }

    /// Design-time scaling factor of UI authored for this category.
    pub const fn scaling_factor(self) -> f64 {
        match self {
            Self::Desktop => 1.0,
            Self::Tablet => 1.40625,
            Self::Mobile => 2.7480916,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "Mobile",
            Self::Tablet => "Tablet",
            Self::Desktop => "Desktop",
        }
    }
}

impl fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceCategory {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| LayoutError::UnknownName {
                kind: "device category",
                name: s.to_string(),
            })
    }
}

/// Screen orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Landscape,
    Portrait,
}

impl Orientation {
    /// Landscape iff `is_landscape`.
    #[inline]
    pub const fn from_landscape(is_landscape: bool) -> Self {
        if is_landscape {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }

    /// The other orientation.
    #[inline]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Landscape => Self::Portrait,
            Self::Portrait => Self::Landscape,
        }
    }

    #[inline]
    pub const fn is_landscape(self) -> bool {
        matches!(self, Self::Landscape)
    }
}

/// One of the six device/orientation combinations used to pick UI variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceLayout {
    DesktopLandscape,
    TabletLandscape,
    MobileLandscape,
    DesktopPortrait,
    TabletPortrait,
    MobilePortrait,
}

/// `TABLE[category][orientation]`.
const TABLE: [[DeviceLayout; 2]; 3] = [
    [DeviceLayout::MobileLandscape, DeviceLayout::MobilePortrait],
    [DeviceLayout::TabletLandscape, DeviceLayout::TabletPortrait],
    [DeviceLayout::DesktopLandscape, DeviceLayout::DesktopPortrait],
];

impl DeviceLayout {
    /// All layouts, landscape first.
    pub const ALL: [Self; 6] = [
        Self::DesktopLandscape,
        Self::TabletLandscape,
        Self::MobileLandscape,
        Self::DesktopPortrait,
        Self::TabletPortrait,
        Self::MobilePortrait,
    ];

    /// Combine a category and an orientation.
    #[inline]
    pub const fn new(category: DeviceCategory, orientation: Orientation) -> Self {
        TABLE[category.index()][orientation as usize]
    }

    pub const fn category(self) -> DeviceCategory {
        match self {
            Self::MobileLandscape | Self::MobilePortrait => DeviceCategory::Mobile,
            Self::TabletLandscape | Self::TabletPortrait => DeviceCategory::Tablet,
            Self::DesktopLandscape | Self::DesktopPortrait => DeviceCategory::Desktop,
        }
    }

    pub const fn orientation(self) -> Orientation {
        match self {
            Self::DesktopLandscape | Self::TabletLandscape | Self::MobileLandscape => {
                Orientation::Landscape
            }
            Self::DesktopPortrait | Self::TabletPortrait | Self::MobilePortrait => {
                Orientation::Portrait
            }
        }
    }

    #[inline]
    pub const fn is_landscape(self) -> bool {
        self.orientation().is_landscape()
    }

    #[inline]
    pub const fn is_portrait(self) -> bool {
        !self.is_landscape()
    }

    /// Same category, given orientation.
    #[inline]
    pub const fn with_orientation(self, orientation: Orientation) -> Self {
        Self::new(self.category(), orientation)
    }

    /// Same category, opposite orientation.
    #[inline]
    pub const fn toggle_orientation(self) -> Self {
        self.with_orientation(self.orientation().flipped())
    }

    /// Stable name, e.g. `"TabletPortrait"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DesktopLandscape => "DesktopLandscape",
            Self::TabletLandscape => "TabletLandscape",
            Self::MobileLandscape => "MobileLandscape",
            Self::DesktopPortrait => "DesktopPortrait",
            Self::TabletPortrait => "TabletPortrait",
            Self::MobilePortrait => "MobilePortrait",
        }
    }

    /// Slot in per-layout tables.
    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DeviceLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceLayout {
    type Err = LayoutError;

    /// Accepts the stable names case-insensitively, with or without `-`/`_`
    /// separators (`tablet-portrait`, `TabletPortrait`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_' && !c.is_whitespace())
            .collect();
        Self::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(&compact))
            .ok_or_else(|| LayoutError::UnknownName {
                kind: "device layout",
                name: s.to_string(),
            })
    }
}
