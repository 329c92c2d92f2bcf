#![forbid(unsafe_code)]

//! Per-layout value selection.
//!
//! [`LayoutSwitch<T>`] maps each [`DeviceLayout`] to an optional value and
//! falls back to a default for layouts without one. [`CategorySwitch<T>`]
//! does the same per [`DeviceCategory`], optionally restricted to a set of
//! categories.
//!
//! ```
//! use waypoint_layout::{DeviceLayout, LayoutSwitch};
//!
//! let columns = LayoutSwitch::new(1)
//!     .at(DeviceLayout::DesktopLandscape, 4)
//!     .at(DeviceLayout::TabletLandscape, 2);
//!
//! assert_eq!(columns.pick(DeviceLayout::DesktopLandscape), &4);
//! assert_eq!(columns.pick(DeviceLayout::MobilePortrait), &1);
//! ```
//!
//! # Invariants
//!
//! 1. `pick()` never fails: a missing entry yields the default.
//! 2. There is no inheritance between layouts. An unset `TabletPortrait`
//!    does not borrow from `TabletLandscape`.

use std::fmt;

use crate::device::{DeviceCategory, DeviceLayout};

/// A value per [`DeviceLayout`] with a shared default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutSwitch<T> {
    default: T,
    /// Indexed by `DeviceLayout::index()`.
    values: [Option<T>; 6],
}

impl<T> LayoutSwitch<T> {
    /// A switch where every layout yields `default`.
    #[must_use]
    pub fn new(default: T) -> Self {
        Self {
            default,
            values: [None, None, None, None, None, None],
        }
    }

    /// Set the value for `layout` (builder pattern).
    #[must_use]
    pub fn at(mut self, layout: DeviceLayout, value: T) -> Self {
        self.set(layout, value);
        self
    }

    /// Set the value for `layout`.
    pub fn set(&mut self, layout: DeviceLayout, value: T) {
        self.values[layout.index()] = Some(value);
    }

    /// Remove the value for `layout`, reverting it to the default.
    pub fn clear(&mut self, layout: DeviceLayout) {
        self.values[layout.index()] = None;
    }

    /// The explicit value for `layout`, if any.
    #[must_use]
    pub fn get(&self, layout: DeviceLayout) -> Option<&T> {
        self.values[layout.index()].as_ref()
    }

    /// The value for `layout`, or the default.
    #[must_use]
    pub fn pick(&self, layout: DeviceLayout) -> &T {
        self.get(layout).unwrap_or(&self.default)
    }

    pub fn default_value(&self) -> &T {
        &self.default
    }

    /// Layouts with an explicit value, in [`DeviceLayout::ALL`] order.
    pub fn explicit_values(&self) -> impl Iterator<Item = (DeviceLayout, &T)> {
        DeviceLayout::ALL
            .into_iter()
            .filter_map(|layout| self.get(layout).map(|v| (layout, v)))
    }

    /// Map every value, including the default.
    #[must_use]
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> LayoutSwitch<U> {
        LayoutSwitch {
            default: f(&self.default),
            values: std::array::from_fn(|i| self.values[i].as_ref().map(&f)),
        }
    }
}

impl<T: Clone> LayoutSwitch<T> {
    #[must_use]
    pub fn pick_cloned(&self, layout: DeviceLayout) -> T {
        self.pick(layout).clone()
    }
}

impl<T: Default> Default for LayoutSwitch<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Display> fmt::Display for LayoutSwitch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LayoutSwitch(default={}", self.default)?;
        for (layout, value) in self.explicit_values() {
            write!(f, ", {layout}={value}")?;
        }
        write!(f, ")")
    }
}

/// A value per [`DeviceCategory`] with a shared default.
///
/// With a whitelist set, categories outside it always yield the default
/// even if a value was provided for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySwitch<T> {
    default: T,
    values: [Option<T>; 3],
    whitelist: Option<Vec<DeviceCategory>>,
}

impl<T> CategorySwitch<T> {
    #[must_use]
    pub fn new(default: T) -> Self {
        Self {
            default,
            values: [None, None, None],
            whitelist: None,
        }
    }

    /// Set the value for `category` (builder pattern).
    #[must_use]
    pub fn at(mut self, category: DeviceCategory, value: T) -> Self {
        self.values[category.index()] = Some(value);
        self
    }

    /// Restrict which categories may yield their own value.
    #[must_use]
    pub fn with_whitelist(mut self, categories: impl IntoIterator<Item = DeviceCategory>) -> Self {
        self.whitelist = Some(categories.into_iter().collect());
        self
    }

    /// Whether `category` is allowed by the whitelist (always true without one).
    pub fn allows(&self, category: DeviceCategory) -> bool {
        self.whitelist
            .as_ref()
            .is_none_or(|allowed| allowed.contains(&category))
    }

    /// The value for `category`, or the default when it is unset or not
    /// whitelisted.
    #[must_use]
    pub fn pick(&self, category: DeviceCategory) -> &T {
        if !self.allows(category) {
            return &self.default;
        }
        self.values[category.index()]
            .as_ref()
            .unwrap_or(&self.default)
    }

    /// Convenience for picking by a layout's category.
    #[must_use]
    pub fn pick_for(&self, layout: DeviceLayout) -> &T {
        self.pick(layout.category())
    }
}

impl<T: Default> Default for CategorySwitch<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
