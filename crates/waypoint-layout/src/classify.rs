#![forbid(unsafe_code)]

//! Screen size → device layout classification.
//!
//! Rules are evaluated in priority order and the first match decides the
//! category. Orientation always comes from `width > height`.
//!
//! | # | Rule                       | Condition                                                    | Category |
//! |---|----------------------------|--------------------------------------------------------------|----------|
//! | 1 | [`TabletFastPath`]         | shortest side ≥ 600 and (landscape ∧ ar ≤ 1.8 ∨ portrait ∧ ar ≥ 0.55) | Tablet |
//! | 2 | [`PhoneLandscape`]         | landscape, 1.9 ≤ ar ≤ 2.3, width < 900                        | Mobile   |
//! | 3 | [`PhonePortrait`]          | portrait, 0.4 ≤ ar ≤ 0.55, height < 900                       | Mobile   |
//! | 4 | [`MobileTabletBoundary`]   | \|width − 768\| ≤ 20                                          | Mobile if ar ≥ 1.7 or 0.55 < ar ≤ 0.6, else Tablet |
//! | 5 | [`TabletDesktopBoundary`]  | \|width − 1366\| ≤ 20                                         | Desktop if ar ≥ 1.7 or ar ≤ 0.6, else Tablet |
//! | 6 | [`WidthBucket`]            | otherwise                                                    | < 768 Mobile, < 1366 Tablet, else Desktop |
//!
//! The constants are exact. Changing any of them changes which layout
//! existing screens receive.
//!
//! [`TabletFastPath`]: ClassificationRule::TabletFastPath
//! [`PhoneLandscape`]: ClassificationRule::PhoneLandscape
//! [`PhonePortrait`]: ClassificationRule::PhonePortrait
//! [`MobileTabletBoundary`]: ClassificationRule::MobileTabletBoundary
//! [`TabletDesktopBoundary`]: ClassificationRule::TabletDesktopBoundary
//! [`WidthBucket`]: ClassificationRule::WidthBucket

use waypoint_core::ScreenSize;

use crate::LayoutError;
use crate::device::{DeviceCategory, DeviceLayout, Orientation};

/// Minimum shortest side for the tablet fast-path.
pub const TABLET_MIN_SMALLEST_DIMENSION: f64 = 600.0;
/// Widest landscape aspect ratio still treated as a tablet.
pub const TABLET_MAX_LANDSCAPE_ASPECT: f64 = 1.8;
/// Narrowest portrait aspect ratio still treated as a tablet.
pub const TABLET_MIN_PORTRAIT_ASPECT: f64 = 0.55;

/// Modern phone aspect band, landscape.
pub const PHONE_LANDSCAPE_ASPECT: (f64, f64) = (1.9, 2.3);
/// Modern phone aspect band, portrait.
pub const PHONE_PORTRAIT_ASPECT: (f64, f64) = (0.4, 0.55);
/// Phones are shorter than this along their long side.
pub const PHONE_MAX_LONG_SIDE: f64 = 900.0;

/// Width at which tablets begin.
pub const TABLET_MIN_WIDTH: f64 = 768.0;
/// Width at which desktops begin.
pub const DESKTOP_MIN_WIDTH: f64 = 1366.0;
/// Half-width of the tie-break window around each width threshold.
pub const BOUNDARY_BUFFER: f64 = 20.0;

/// Aspect ratio at or above which a boundary screen counts as the wider class.
pub const BOUNDARY_WIDE_ASPECT: f64 = 1.7;
/// Aspect ratio at or below which a boundary screen counts as a tall phone.
pub const BOUNDARY_TALL_ASPECT: f64 = 0.6;

/// Which rule decided the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassificationRule {
    TabletFastPath,
    PhoneLandscape,
    PhonePortrait,
    MobileTabletBoundary,
    TabletDesktopBoundary,
    WidthBucket,
}

impl ClassificationRule {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TabletFastPath => "tablet-fast-path",
            Self::PhoneLandscape => "phone-landscape",
            Self::PhonePortrait => "phone-portrait",
            Self::MobileTabletBoundary => "mobile-tablet-boundary",
            Self::TabletDesktopBoundary => "tablet-desktop-boundary",
            Self::WidthBucket => "width-bucket",
        }
    }
}

/// A classified layout and the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub layout: DeviceLayout,
    pub rule: ClassificationRule,
}

/// Classify a screen size into a device layout.
///
/// Fails with [`LayoutError::InvalidDimensions`] when either side is zero,
/// negative, NaN, or infinite.
pub fn classify(size: ScreenSize) -> Result<DeviceLayout, LayoutError> {
    explain(size).map(|c| c.layout)
}

/// Like [`classify`], also reporting which rule matched.
pub fn explain(size: ScreenSize) -> Result<Classification, LayoutError> {
    let size = size.validate()?;
    let orientation = Orientation::from_landscape(size.is_landscape());
    let (category, rule) = categorize(size);
    Ok(Classification {
        layout: DeviceLayout::new(category, orientation),
        rule,
    })
}

fn categorize(size: ScreenSize) -> (DeviceCategory, ClassificationRule) {
    let ScreenSize { width, height } = size;
    let is_landscape = size.is_landscape();
    let aspect = size.aspect_ratio();

    let tablet_shaped = if is_landscape {
        aspect <= TABLET_MAX_LANDSCAPE_ASPECT
    } else {
        aspect >= TABLET_MIN_PORTRAIT_ASPECT
    };
    if size.smallest_dimension() >= TABLET_MIN_SMALLEST_DIMENSION && tablet_shaped {
        return (DeviceCategory::Tablet, ClassificationRule::TabletFastPath);
    }

    let (lo, hi) = PHONE_LANDSCAPE_ASPECT;
    if is_landscape && (lo..=hi).contains(&aspect) && width < PHONE_MAX_LONG_SIDE {
        return (DeviceCategory::Mobile, ClassificationRule::PhoneLandscape);
    }

    let (lo, hi) = PHONE_PORTRAIT_ASPECT;
    if !is_landscape && (lo..=hi).contains(&aspect) && height < PHONE_MAX_LONG_SIDE {
        return (DeviceCategory::Mobile, ClassificationRule::PhonePortrait);
    }

    if (width - TABLET_MIN_WIDTH).abs() <= BOUNDARY_BUFFER {
        let phone_like = aspect >= BOUNDARY_WIDE_ASPECT
            || (aspect > TABLET_MIN_PORTRAIT_ASPECT && aspect <= BOUNDARY_TALL_ASPECT);
        let category = if phone_like {
            DeviceCategory::Mobile
        } else {
            DeviceCategory::Tablet
        };
        return (category, ClassificationRule::MobileTabletBoundary);
    }

    if (width - DESKTOP_MIN_WIDTH).abs() <= BOUNDARY_BUFFER {
        let category = if aspect >= BOUNDARY_WIDE_ASPECT || aspect <= BOUNDARY_TALL_ASPECT {
            DeviceCategory::Desktop
        } else {
            DeviceCategory::Tablet
        };
        return (category, ClassificationRule::TabletDesktopBoundary);
    }

    let category = if width < TABLET_MIN_WIDTH {
        DeviceCategory::Mobile
    } else if width < DESKTOP_MIN_WIDTH {
        DeviceCategory::Tablet
    } else {
        DeviceCategory::Desktop
    };
    (category, ClassificationRule::WidthBucket)
}
