#![forbid(unsafe_code)]

//! Nearest-layout resolution against a whitelist.
//!
//! A UI context declares which [`DeviceLayout`]s it has content for. When
//! the detected layout is not among them, the resolver picks the closest
//! supported one, preferring devices like the actual one and then larger
//! devices over smaller ones:
//!
//! 1. the detected layout itself;
//! 2. same category, same orientation;
//! 3. same category, any orientation;
//! 4. each larger category, nearest first (same orientation, then any);
//! 5. each smaller category, nearest first (same orientation, then any);
//! 6. the first whitelist entry.
//!
//! Within each pass the first match in whitelist order wins, so the
//! result depends on how the caller orders the whitelist.
//!
//! # Failure Modes
//!
//! - Empty whitelist: [`closest_layout`] and the forced-orientation variants
//!   return [`LayoutError::EmptyWhitelist`]. [`resolve`] treats it as
//!   "no restriction" instead.

use crate::LayoutError;
use crate::device::{DeviceCategory, DeviceLayout, Orientation};

/// Which orientation the caller wants, regardless of the physical one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OrientationLock {
    /// Keep the detected orientation.
    #[default]
    Any,
    /// Force landscape.
    Landscape,
    /// Force portrait.
    Portrait,
}

impl OrientationLock {
    /// The forced orientation, if any.
    pub const fn orientation(self) -> Option<Orientation> {
        match self {
            Self::Any => None,
            Self::Landscape => Some(Orientation::Landscape),
            Self::Portrait => Some(Orientation::Portrait),
        }
    }
}

impl std::str::FromStr for OrientationLock {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "any" => Ok(Self::Any),
            "landscape" => Ok(Self::Landscape),
            "portrait" => Ok(Self::Portrait),
            _ => Err(LayoutError::UnknownName {
                kind: "orientation lock",
                name: s.to_string(),
            }),
        }
    }
}

/// Find the whitelisted layout closest to `detected`.
pub fn closest_layout(
    detected: DeviceLayout,
    whitelist: &[DeviceLayout],
) -> Result<DeviceLayout, LayoutError> {
    let first = *whitelist.first().ok_or(LayoutError::EmptyWhitelist)?;
    if whitelist.contains(&detected) {
        return Ok(detected);
    }

    let orientation = detected.orientation();
    let category = detected.category();
    let in_category = |c: DeviceCategory| {
        find(whitelist, c, Some(orientation)).or_else(|| find(whitelist, c, None))
    };

    Ok(in_category(category)
        .or_else(|| category.larger().find_map(in_category))
        .or_else(|| category.smaller().find_map(in_category))
        .unwrap_or(first))
}

/// Resolve as a landscape layout.
///
/// `detected` is first flipped to landscape. Only landscape whitelist
/// entries are considered unless there are none, in which case the whole
/// whitelist is searched.
pub fn closest_landscape_layout(
    detected: DeviceLayout,
    whitelist: &[DeviceLayout],
) -> Result<DeviceLayout, LayoutError> {
    closest_with_orientation(detected, whitelist, Orientation::Landscape)
}

/// Resolve as a portrait layout. See [`closest_landscape_layout`].
pub fn closest_portrait_layout(
    detected: DeviceLayout,
    whitelist: &[DeviceLayout],
) -> Result<DeviceLayout, LayoutError> {
    closest_with_orientation(detected, whitelist, Orientation::Portrait)
}

/// Total resolution used by reactive consumers.
///
/// An absent or empty whitelist means "no restriction": the detected layout
/// is returned, flipped to the locked orientation if there is one.
pub fn resolve(
    detected: DeviceLayout,
    whitelist: Option<&[DeviceLayout]>,
    lock: OrientationLock,
) -> DeviceLayout {
    let normalized = match lock.orientation() {
        Some(orientation) => detected.with_orientation(orientation),
        None => detected,
    };
    let Some(whitelist) = whitelist.filter(|w| !w.is_empty()) else {
        return normalized;
    };
    let resolved = match lock {
        OrientationLock::Any => closest_layout(detected, whitelist),
        OrientationLock::Landscape => closest_landscape_layout(detected, whitelist),
        OrientationLock::Portrait => closest_portrait_layout(detected, whitelist),
    };
    // Non-empty by the filter above.
    resolved.unwrap_or(normalized)
}

fn closest_with_orientation(
    detected: DeviceLayout,
    whitelist: &[DeviceLayout],
    orientation: Orientation,
) -> Result<DeviceLayout, LayoutError> {
    let detected = detected.with_orientation(orientation);
    let filtered: Vec<DeviceLayout> = whitelist
        .iter()
        .copied()
        .filter(|l| l.orientation() == orientation)
        .collect();
    if filtered.is_empty() {
        closest_layout(detected, whitelist)
    } else {
        closest_layout(detected, &filtered)
    }
}

fn find(
    whitelist: &[DeviceLayout],
    category: DeviceCategory,
    orientation: Option<Orientation>,
) -> Option<DeviceLayout> {
    whitelist.iter().copied().find(|l| {
        l.category() == category && orientation.is_none_or(|o| l.orientation() == o)
    })
}
