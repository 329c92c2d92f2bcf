#![forbid(unsafe_code)]

//! Viewport adapter: host resize events in, recomputed layouts and scales out.
//!
//! [`Viewport`] holds the last accepted size and its classification in one
//! [`Observable`]. Watches derived from it ([`Viewport::watch_layout`],
//! [`Viewport::watch_scale`]) recompute on every accepted resize and notify
//! their own subscribers only when their result changes.
//!
//! # Failure Modes
//!
//! - Zero, negative, or non-finite sizes are rejected. The previous size is
//!   kept and a `warn` event is logged.

use tracing::{debug, warn};
use waypoint_core::{Event, ScreenSize};
use waypoint_layout::{
    DEFAULT_BASE_RESOLUTION, DeviceLayout, LayoutError, OrientationLock, Px, classify,
    compute_scale, dominant_axis, resolve,
};

use crate::reactive::{Derived, Observable};

/// Size and detected layout after the last accepted resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub size: ScreenSize,
    pub layout: DeviceLayout,
}

/// What a layout-dependent context supports.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutQuery {
    /// Supported layouts in preference order. `None` or empty means all.
    pub whitelist: Option<Vec<DeviceLayout>>,
    pub lock: OrientationLock,
}

impl LayoutQuery {
    /// No restriction.
    pub fn any() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_whitelist(mut self, whitelist: impl IntoIterator<Item = DeviceLayout>) -> Self {
        self.whitelist = Some(whitelist.into_iter().collect());
        self
    }

    #[must_use]
    pub fn with_lock(mut self, lock: OrientationLock) -> Self {
        self.lock = lock;
        self
    }

    /// Resolve a detected layout against this query.
    pub fn resolve(&self, detected: DeviceLayout) -> DeviceLayout {
        resolve(detected, self.whitelist.as_deref(), self.lock)
    }
}

/// How the dominant axis is chosen for a scale watch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum AxisPolicy {
    /// Use the detected layout's category.
    #[default]
    Adaptive,
    /// Always use this axis.
    Fixed(f64),
}

/// Parameters for a scale watch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleQuery {
    base: ScreenSize,
    axis: AxisPolicy,
}

impl ScaleQuery {
    /// Validates the base resolution and any fixed axis up front so the
    /// watch itself cannot fail.
    pub fn new(base: ScreenSize, axis: AxisPolicy) -> Result<Self, LayoutError> {
        let base = base.validate()?;
        if let AxisPolicy::Fixed(a) = axis {
            // Reuse the scale check for the axis range.
            compute_scale(base, base, a)?;
        }
        Ok(Self { base, axis })
    }

    pub fn base(&self) -> ScreenSize {
        self.base
    }

    pub fn axis(&self) -> AxisPolicy {
        self.axis
    }

    /// Scale for one viewport state.
    pub fn px(&self, state: &ViewportState) -> Px {
        let axis = match self.axis {
            AxisPolicy::Adaptive => dominant_axis(state.layout),
            AxisPolicy::Fixed(a) => a,
        };
        // Base and axis were validated in `new` and sizes on resize. Only an
        // unrepresentable ratio reaches the fallback.
        Px::new(state.size, self.base, axis).unwrap_or(Px::IDENTITY)
    }
}

impl Default for ScaleQuery {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE_RESOLUTION,
            axis: AxisPolicy::Adaptive,
        }
    }
}

/// Reactive viewport. Not `Send`: lives on the host's UI thread.
#[derive(Debug, Clone)]
pub struct Viewport {
    state: Observable<ViewportState>,
}

impl Viewport {
    /// Start from an initial size.
    pub fn new(initial: ScreenSize) -> Result<Self, LayoutError> {
        let state = Self::measure(initial)?;
        debug!(size = %state.size, layout = %state.layout, "viewport created");
        Ok(Self {
            state: Observable::new(state),
        })
    }

    fn measure(size: ScreenSize) -> Result<ViewportState, LayoutError> {
        let layout = classify(size)?;
        Ok(ViewportState { size, layout })
    }

    /// Apply a new size. Rejected sizes leave the viewport unchanged.
    pub fn resize(&self, size: ScreenSize) -> Result<(), LayoutError> {
        match Self::measure(size) {
            Ok(state) => {
                debug!(size = %state.size, layout = %state.layout, "viewport resized");
                self.state.set(state);
                Ok(())
            }
            Err(err) => {
                warn!(width = size.width, height = size.height, error = %err, "rejected resize");
                Err(err)
            }
        }
    }

    /// Feed a host event. Returns `true` if it changed the viewport size.
    pub fn handle_event(&self, event: &Event) -> bool {
        let Some(result) = event.resize_size() else {
            return false;
        };
        let before = self.state.version();
        match result {
            Ok(size) => self.resize(size).is_ok() && self.state.version() != before,
            Err(err) => {
                warn!(error = %err, "rejected resize event");
                false
            }
        }
    }

    pub fn size(&self) -> ScreenSize {
        self.state.with(|s| s.size)
    }

    /// Layout detected for the current size, without any whitelist.
    pub fn detected_layout(&self) -> DeviceLayout {
        self.state.with(|s| s.layout)
    }

    pub fn state(&self) -> ViewportState {
        self.state.get()
    }

    /// The underlying cell, for callers that need the raw size stream.
    pub fn observable(&self) -> Observable<ViewportState> {
        self.state.clone()
    }

    /// A layout resolved against `query`, kept current on resize.
    pub fn watch_layout(&self, query: LayoutQuery) -> Derived<DeviceLayout> {
        self.state.derive(move |state| {
            let resolved = query.resolve(state.layout);
            debug!(detected = %state.layout, resolved = %resolved, "layout recomputed");
            resolved
        })
    }

    /// A UI scale for `query`, kept current on resize.
    pub fn watch_scale(&self, query: ScaleQuery) -> Derived<Px> {
        self.state.derive(move |state| query.px(state))
    }
}
