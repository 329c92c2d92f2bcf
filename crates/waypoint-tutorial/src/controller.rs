#![forbid(unsafe_code)]

//! Tutorial controller: the single owner of tutorial and menu state.
//!
//! State lives in [`Observable`] cells so view models and the host can
//! subscribe to exactly what they render. Every operation that touches more
//! than one cell runs inside a [`BatchScope`], so subscribers never observe a
//! half-applied transition (for example `active == false` with a step still
//! set).
//!
//! The controller and the [`Highlighter`] agree on the current step at all
//! times: the highlighter walks the sequence and the controller mirrors it.
//!
//! # Invariants
//!
//! 1. `active() == current_step().is_some()`.
//! 2. `volume() <= 100`.
//! 3. [`TutorialController::advance_from`] only moves the tutorial when its
//!    step is the current one.

use std::cell::{Ref, RefCell};
use std::time::Duration;

use tracing::{debug, info};
use waypoint_core::UiRect;
use waypoint_runtime::{BatchScope, Observable, TutorialConfig};

use crate::TutorialError;
use crate::highlight::{Highlighter, PointerDisposition, Spotlight};
use crate::menus::ItemId;
use crate::steps::{DEFAULT_SEQUENCE, TutorialStep};

/// Volume at start-up, in percent.
pub const DEFAULT_VOLUME: u8 = 50;

/// A tutorial transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorialEvent {
    Started { first: TutorialStep },
    StepChanged { from: TutorialStep, to: TutorialStep },
    Completed { last: TutorialStep },
    Stopped { at: TutorialStep },
}

/// Owns tutorial progress, menu visibility, and player settings.
#[derive(Debug)]
pub struct TutorialController {
    active: Observable<bool>,
    current_step: Observable<Option<TutorialStep>>,
    menu_open: Observable<bool>,
    settings_open: Observable<bool>,
    inventory_open: Observable<bool>,
    selected_item: Observable<Option<ItemId>>,
    volume: Observable<u8>,
    sequence: Vec<TutorialStep>,
    highlighter: RefCell<Highlighter>,
}

impl Default for TutorialController {
    fn default() -> Self {
        Self::new(Highlighter::with_default_styles(Default::default(), 8.0))
    }
}

impl TutorialController {
    /// A stopped controller running the full default sequence.
    pub fn new(highlighter: Highlighter) -> Self {
        Self {
            active: Observable::new(false),
            current_step: Observable::new(None),
            menu_open: Observable::new(false),
            settings_open: Observable::new(false),
            inventory_open: Observable::new(false),
            selected_item: Observable::new(None),
            volume: Observable::new(DEFAULT_VOLUME),
            sequence: DEFAULT_SEQUENCE.to_vec(),
            highlighter: RefCell::new(highlighter),
        }
    }

    /// Run a custom sequence instead of the default one.
    pub fn with_sequence(
        highlighter: Highlighter,
        sequence: &[TutorialStep],
    ) -> Result<Self, TutorialError> {
        if sequence.is_empty() {
            return Err(TutorialError::EmptySequence);
        }
        let mut controller = Self::new(highlighter);
        controller.sequence = sequence.to_vec();
        Ok(controller)
    }

    // --- Tutorial lifecycle -------------------------------------------------

    /// Activate at the first step. Restarts if already running.
    pub fn start(&self) -> TutorialEvent {
        let _batch = BatchScope::new();
        let mut highlighter = self.highlighter.borrow_mut();
        // Non-empty by construction, so the highlighter always accepts it.
        if let Err(err) = highlighter.set_tutorial(&self.sequence) {
            debug!(error = %err, "highlighter rejected tutorial sequence");
        }
        let first = highlighter
            .current_step()
            .or_else(|| self.sequence.first().copied())
            .unwrap_or(TutorialStep::Welcome);
        drop(highlighter);

        self.active.set(true);
        self.current_step.set(Some(first));
        info!(step = %first, "tutorial started");
        TutorialEvent::Started { first }
    }

    /// Deactivate and clear the current step.
    pub fn stop(&self) -> Option<TutorialEvent> {
        let _batch = BatchScope::new();
        let at = self.current_step.get();
        self.highlighter.borrow_mut().stop();
        self.active.set(false);
        self.current_step.set(None);
        let at = at?;
        info!(step = %at, "tutorial stopped");
        Some(TutorialEvent::Stopped { at })
    }

    /// Complete the current step and move to the next one, or finish after
    /// the last. `None` when inactive.
    pub fn resolve_current_step(&self) -> Option<TutorialEvent> {
        let from = self.current_step.get()?;
        let _batch = BatchScope::new();
        let next = {
            let mut highlighter = self.highlighter.borrow_mut();
            highlighter.resolve(from);
            highlighter.current_step()
        };

        match next {
            Some(to) => {
                self.current_step.set(Some(to));
                info!(from = %from, to = %to, "tutorial step changed");
                Some(TutorialEvent::StepChanged { from, to })
            }
            None => {
                self.active.set(false);
                self.current_step.set(None);
                info!(last = %from, "tutorial completed");
                Some(TutorialEvent::Completed { last: from })
            }
        }
    }

    /// Resolve only if `step` is the current step.
    pub fn advance_from(&self, step: TutorialStep) -> Option<TutorialEvent> {
        if self.current_step.get() == Some(step) {
            self.resolve_current_step()
        } else {
            None
        }
    }

    // --- Queries ------------------------------------------------------------

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    pub fn current_step(&self) -> Option<TutorialStep> {
        self.current_step.get()
    }

    /// Instruction for the current step, empty when inactive.
    pub fn current_instruction(&self) -> &'static str {
        self.current_step
            .get()
            .map_or("", TutorialStep::instruction)
    }

    pub fn is_step_read_only(&self, step: TutorialStep) -> bool {
        step.is_read_only()
    }

    /// `(index, count)` of the current step.
    pub fn progress(&self) -> Option<(usize, usize)> {
        self.highlighter.borrow().progress()
    }

    pub fn sequence(&self) -> &[TutorialStep] {
        &self.sequence
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open.get()
    }

    pub fn settings_open(&self) -> bool {
        self.settings_open.get()
    }

    pub fn inventory_open(&self) -> bool {
        self.inventory_open.get()
    }

    pub fn selected_item(&self) -> Option<ItemId> {
        self.selected_item.get()
    }

    pub fn volume(&self) -> u8 {
        self.volume.get()
    }

    // --- Setters ------------------------------------------------------------

    pub fn set_menu_open(&self, open: bool) {
        self.menu_open.set(open);
    }

    /// Show or hide the settings panel. `menu_open` follows the panels.
    pub fn set_settings_open(&self, open: bool) {
        let _batch = BatchScope::new();
        self.settings_open.set(open);
        self.sync_menu_open();
    }

    /// Show or hide the inventory panel. `menu_open` follows the panels.
    pub fn set_inventory_open(&self, open: bool) {
        let _batch = BatchScope::new();
        self.inventory_open.set(open);
        self.sync_menu_open();
    }

    fn sync_menu_open(&self) {
        self.menu_open
            .set(self.settings_open.get() || self.inventory_open.get());
    }

    pub fn select_item(&self, item: Option<ItemId>) {
        self.selected_item.set(item);
    }

    /// Set volume in percent, clamped to 100.
    pub fn set_volume(&self, volume: u8) {
        self.volume.set(volume.min(100));
    }

    // --- Observable handles -------------------------------------------------

    pub fn active_cell(&self) -> Observable<bool> {
        self.active.clone()
    }

    pub fn current_step_cell(&self) -> Observable<Option<TutorialStep>> {
        self.current_step.clone()
    }

    pub fn volume_cell(&self) -> Observable<u8> {
        self.volume.clone()
    }

    pub fn selected_item_cell(&self) -> Observable<Option<ItemId>> {
        self.selected_item.clone()
    }

    // --- Highlight passthrough ----------------------------------------------

    pub fn highlighter(&self) -> Ref<'_, Highlighter> {
        self.highlighter.borrow()
    }

    /// Record where `step`'s target element is on screen.
    pub fn report_target(&self, step: TutorialStep, rect: UiRect) {
        self.highlighter.borrow_mut().report_target(step, rect);
    }

    pub fn spotlight(&self) -> Option<Spotlight> {
        self.highlighter.borrow().spotlight()
    }

    pub fn hit_test(&self, x: f64, y: f64) -> PointerDisposition {
        self.highlighter.borrow().hit_test(x, y)
    }
}

/// Starts the tutorial once after a delay, driven by host ticks.
#[derive(Debug, Clone)]
pub struct AutoStart {
    delay: Duration,
    elapsed: Duration,
    fired: bool,
}

impl AutoStart {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            elapsed: Duration::ZERO,
            fired: false,
        }
    }

    /// Disabled configs yield a timer that never fires.
    pub fn from_config(config: &TutorialConfig) -> Self {
        let mut timer = Self::new(config.auto_start_delay());
        timer.fired = !config.auto_start;
        timer
    }

    pub fn is_pending(&self) -> bool {
        !self.fired
    }

    /// Time left before the start, zero once fired.
    pub fn remaining(&self) -> Duration {
        if self.fired {
            Duration::ZERO
        } else {
            self.delay.saturating_sub(self.elapsed)
        }
    }

    /// Advance by `delta`; starts `controller` when the delay has elapsed.
    pub fn tick(
        &mut self,
        controller: &TutorialController,
        delta: Duration,
    ) -> Option<TutorialEvent> {
        if self.fired {
            return None;
        }
        self.elapsed = self.elapsed.saturating_add(delta);
        if self.elapsed < self.delay {
            return None;
        }
        self.fired = true;
        if controller.is_active() {
            return None;
        }
        Some(controller.start())
    }
}
