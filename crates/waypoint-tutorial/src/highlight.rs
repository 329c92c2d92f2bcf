#![forbid(unsafe_code)]

//! Highlight registry: which element is spotlit and what clicks get through.
//!
//! The host reports where each step's target element is on screen. While a
//! tutorial runs, the [`Highlighter`] dims everything except a cutout around
//! the current step's target, and [`Highlighter::hit_test`] decides whether a
//! pointer press reaches the UI underneath.
//!
//! # Invariants
//!
//! 1. Inactive highlighter: every press passes through and there is no
//!    spotlight.
//! 2. Active highlighter: a press passes through only inside the cutout, and
//!    only when the effective style has `can_click_center`.
//! 3. The current step is always a member of the loaded sequence.

use tracing::debug;
use waypoint_core::{Rgb, UiRect};
use waypoint_runtime::HighlightConfig;

use crate::TutorialError;
use crate::steps::TutorialStep;

/// Dimmed-background styling for a highlighted step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightStyle {
    pub background: Rgb,
    /// 0 (clear) to 1 (opaque).
    pub transparency: f64,
    /// Whether presses inside the cutout reach the target.
    pub can_click_center: bool,
}

impl HighlightStyle {
    #[must_use]
    pub const fn new(background: Rgb, transparency: f64, can_click_center: bool) -> Self {
        Self {
            background,
            transparency,
            can_click_center,
        }
    }

    /// Same colour and click policy, different transparency.
    #[must_use]
    pub const fn with_transparency(mut self, transparency: f64) -> Self {
        self.transparency = transparency;
        self
    }

    #[must_use]
    pub const fn clickable(mut self, can_click_center: bool) -> Self {
        self.can_click_center = can_click_center;
        self
    }
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self::new(Rgb::new(7, 7, 7), 0.4, true)
    }
}

impl From<&HighlightConfig> for HighlightStyle {
    fn from(config: &HighlightConfig) -> Self {
        Self::new(
            config.background,
            config.transparency,
            config.can_click_center,
        )
    }
}

/// What happens to a pointer press while the overlay is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerDisposition {
    /// Deliver to the UI underneath.
    PassThrough,
    /// Swallowed by the dimmed background.
    Blocked,
}

/// The current step's cutout and effective style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spotlight {
    pub step: TutorialStep,
    /// Padded target rectangle. `None` when the step has no reported target.
    pub cutout: Option<UiRect>,
    pub style: HighlightStyle,
}

/// Headless highlight registry.
#[derive(Debug, Clone)]
pub struct Highlighter {
    global: HighlightStyle,
    padding: f64,
    step_styles: [Option<HighlightStyle>; 10],
    targets: [Option<UiRect>; 10],
    sequence: Vec<TutorialStep>,
    /// Index into `sequence` while active.
    position: Option<usize>,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(HighlightStyle::default(), 8.0)
    }
}

impl Highlighter {
    /// An empty registry with a global style and no per-step overrides.
    #[must_use]
    pub fn new(global: HighlightStyle, padding: f64) -> Self {
        Self {
            global,
            padding: padding.max(0.0),
            step_styles: [None; 10],
            targets: [None; 10],
            sequence: Vec::new(),
            position: None,
        }
    }

    /// A registry with the stock per-step styling.
    ///
    /// Bookend steps are not clickable so the player reads them; the three
    /// main-menu buttons get lighter or heavier dimming.
    #[must_use]
    pub fn with_default_styles(global: HighlightStyle, padding: f64) -> Self {
        let mut highlighter = Self::new(global, padding);
        let stock = [
            (TutorialStep::Welcome, 0.35, false),
            (TutorialStep::TutorialComplete, 0.3, false),
            (TutorialStep::ClickPlayButton, 0.3, true),
            (TutorialStep::OpenSettingsMenu, 0.35, true),
            (TutorialStep::OpenInventory, 0.35, true),
        ];
        for (step, transparency, clickable) in stock {
            highlighter.set_step_style(
                step,
                global.with_transparency(transparency).clickable(clickable),
            );
        }
        highlighter
    }

    /// Stock styling on top of a configured global style.
    #[must_use]
    pub fn from_config(config: &HighlightConfig) -> Self {
        Self::with_default_styles(config.into(), config.target_padding)
    }

    pub fn set_global_style(&mut self, style: HighlightStyle) {
        self.global = style;
    }

    pub fn global_style(&self) -> HighlightStyle {
        self.global
    }

    pub fn set_step_style(&mut self, step: TutorialStep, style: HighlightStyle) {
        self.step_styles[step.index()] = Some(style);
    }

    pub fn clear_step_style(&mut self, step: TutorialStep) {
        self.step_styles[step.index()] = None;
    }

    /// Per-step override, else the global style.
    pub fn style_for(&self, step: TutorialStep) -> HighlightStyle {
        self.step_styles[step.index()].unwrap_or(self.global)
    }

    /// Record where `step`'s target element currently is.
    pub fn report_target(&mut self, step: TutorialStep, rect: UiRect) {
        self.targets[step.index()] = Some(rect);
    }

    pub fn clear_target(&mut self, step: TutorialStep) {
        self.targets[step.index()] = None;
    }

    pub fn target(&self, step: TutorialStep) -> Option<UiRect> {
        self.targets[step.index()]
    }

    /// Load a sequence and start at its first step.
    pub fn set_tutorial(&mut self, sequence: &[TutorialStep]) -> Result<(), TutorialError> {
        if sequence.is_empty() {
            return Err(TutorialError::EmptySequence);
        }
        self.sequence = sequence.to_vec();
        self.position = Some(0);
        debug!(steps = sequence.len(), "highlight sequence loaded");
        Ok(())
    }

    /// Mark `step` done and move to the next one. Resolving a step that is
    /// not current is ignored and returns `false`. Resolving the last step
    /// deactivates the highlighter.
    pub fn resolve(&mut self, step: TutorialStep) -> bool {
        let Some(position) = self.position else {
            return false;
        };
        if self.sequence.get(position) != Some(&step) {
            debug!(%step, "ignoring resolve of non-current step");
            return false;
        }
        let next = position + 1;
        self.position = (next < self.sequence.len()).then_some(next);
        true
    }

    /// Deactivate without completing.
    pub fn stop(&mut self) {
        self.position = None;
    }

    pub fn is_active(&self) -> bool {
        self.position.is_some()
    }

    pub fn current_step(&self) -> Option<TutorialStep> {
        self.position.and_then(|p| self.sequence.get(p).copied())
    }

    /// `(index, count)` of the current step within the loaded sequence.
    pub fn progress(&self) -> Option<(usize, usize)> {
        self.position.map(|p| (p, self.sequence.len()))
    }

    pub fn sequence(&self) -> &[TutorialStep] {
        &self.sequence
    }

    pub fn spotlight(&self) -> Option<Spotlight> {
        let step = self.current_step()?;
        Some(Spotlight {
            step,
            cutout: self.target(step).map(|r| r.inflate(self.padding)),
            style: self.style_for(step),
        })
    }

    /// Route a pointer press at `(x, y)`.
    pub fn hit_test(&self, x: f64, y: f64) -> PointerDisposition {
        let Some(spotlight) = self.spotlight() else {
            return PointerDisposition::PassThrough;
        };
        let inside = spotlight.cutout.is_some_and(|c| c.contains(x, y));
        if inside && spotlight.style.can_click_center {
            PointerDisposition::PassThrough
        } else {
            PointerDisposition::Blocked
        }
    }
}
