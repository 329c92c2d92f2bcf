#![forbid(unsafe_code)]

//! Tutorial overlay view model.
//!
//! While the tutorial runs, the overlay shows the current instruction in a
//! bar along the bottom of the viewport, spotlights the step's target, and
//! offers Next (read-only steps only) and Skip.

use waypoint_core::UiRect;

use crate::controller::{TutorialController, TutorialEvent};
use crate::highlight::Spotlight;
use crate::menus::{FrameContext, Menus, PressOutcome, panel_metrics};
use crate::steps::TutorialStep;

/// Hint shown on steps that need a UI interaction.
pub const FOLLOW_HINT: &str = "Follow the highlighted area to continue";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayButton {
    Next,
    Skip,
}

impl OverlayButton {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Next => "Next",
            Self::Skip => "Skip Tutorial",
        }
    }
}

/// What the host draws for the current step.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayState {
    pub step: TutorialStep,
    pub instruction: &'static str,
    /// `"Tutorial Step: <id>"`.
    pub step_label: String,
    /// Zero-based position and total.
    pub index: usize,
    pub count: usize,
    pub buttons: Vec<OverlayButton>,
    /// Present on interactive steps only.
    pub hint: Option<&'static str>,
    /// Cutout clipped to the viewport when a frame is known.
    pub spotlight: Option<Spotlight>,
}

/// Instruction bar geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayLayout {
    pub bar: UiRect,
    pub text: UiRect,
    pub next: Option<UiRect>,
    pub skip: UiRect,
}

/// Result of routing a press through the overlay and then the menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiPress {
    Overlay {
        button: OverlayButton,
        event: Option<TutorialEvent>,
    },
    Menu(PressOutcome),
}

#[derive(Debug, Clone, Copy)]
pub struct Overlay<'a> {
    controller: &'a TutorialController,
}

impl<'a> Overlay<'a> {
    pub fn new(controller: &'a TutorialController) -> Self {
        Self { controller }
    }

    pub fn is_visible(&self) -> bool {
        self.controller.is_active()
    }

    /// Buttons for the current step. Empty when inactive.
    pub fn buttons(&self) -> Vec<OverlayButton> {
        match self.controller.current_step() {
            Some(step) if step.is_read_only() => vec![OverlayButton::Next, OverlayButton::Skip],
            Some(_) => vec![OverlayButton::Skip],
            None => Vec::new(),
        }
    }

    /// Snapshot for rendering. `None` when inactive.
    pub fn state(&self, frame: Option<&FrameContext>) -> Option<OverlayState> {
        let step = self.controller.current_step()?;
        let (index, count) = self
            .controller
            .progress()
            .unwrap_or((0, self.controller.sequence().len()));
        let spotlight = self.controller.spotlight().map(|mut s| {
            if let Some(frame) = frame {
                s.cutout = s.cutout.and_then(|c| c.intersection(&frame.bounds()));
            }
            s
        });

        Some(OverlayState {
            step,
            instruction: step.instruction(),
            step_label: format!("Tutorial Step: {}", step.id()),
            index,
            count,
            buttons: self.buttons(),
            hint: (!step.is_read_only()).then_some(FOLLOW_HINT),
            spotlight,
        })
    }

    /// Advance a read-only step. Interactive steps ignore Next.
    pub fn next(&self) -> Option<TutorialEvent> {
        let step = self.controller.current_step()?;
        if step.is_read_only() {
            self.controller.resolve_current_step()
        } else {
            None
        }
    }

    /// Abandon the tutorial.
    pub fn skip(&self) -> Option<TutorialEvent> {
        self.controller.stop()
    }

    pub fn click(&self, button: OverlayButton) -> Option<TutorialEvent> {
        match button {
            OverlayButton::Next => self.next(),
            OverlayButton::Skip => self.skip(),
        }
    }

    /// Bar along the bottom edge: instruction row above a button row.
    pub fn layout(&self, frame: &FrameContext) -> OverlayLayout {
        let m = *panel_metrics().pick(frame.layout);
        let px = frame.px;
        let padding = px.px(m.padding);
        let gap = px.px(m.gap);
        let row = px.px(m.row_height);
        let width = (px.px(m.width) * 1.5)
            .min(frame.viewport.width - 2.0 * padding)
            .max(2.0 * padding + 1.0);
        let height = 2.0 * row + gap + 2.0 * padding;

        let bar = UiRect::new(
            (frame.viewport.width - width) / 2.0,
            frame.viewport.height - height - padding,
            width,
            height,
        );
        let inner_width = width - 2.0 * padding;
        let text = UiRect::new(bar.x + padding, bar.y + padding, inner_width, row);
        let button_y = text.bottom() + gap;
        let half = (inner_width - gap) / 2.0;
        let next = UiRect::new(text.x, button_y, half, row);
        let skip = UiRect::new(next.right() + gap, button_y, half, row);

        let show_next = self
            .controller
            .current_step()
            .is_some_and(TutorialStep::is_read_only);
        OverlayLayout {
            bar,
            text,
            next: show_next.then_some(next),
            skip,
        }
    }

    /// Overlay button under `(x, y)`, if the overlay is up.
    pub fn button_at(&self, frame: &FrameContext, x: f64, y: f64) -> Option<OverlayButton> {
        if !self.is_visible() {
            return None;
        }
        let layout = self.layout(frame);
        if layout.next.is_some_and(|r| r.contains(x, y)) {
            Some(OverlayButton::Next)
        } else if layout.skip.contains(x, y) {
            Some(OverlayButton::Skip)
        } else {
            None
        }
    }

    /// Route a press: overlay buttons sit above the highlight and the menus.
    pub fn press(&self, menus: &Menus<'_>, frame: &FrameContext, x: f64, y: f64) -> UiPress {
        match self.button_at(frame, x, y) {
            Some(button) => UiPress::Overlay {
                button,
                event: self.click(button),
            },
            None => UiPress::Menu(menus.press(frame, x, y)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TutorialStep::*;
    use waypoint_core::ScreenSize;
    use waypoint_layout::{DeviceLayout, Px};

    fn frame() -> FrameContext {
        FrameContext::new(
            ScreenSize::new(1920.0, 1080.0),
            DeviceLayout::DesktopLandscape,
            Px::IDENTITY,
        )
    }

    fn center(r: UiRect) -> (f64, f64) {
        (r.x + r.width / 2.0, r.y + r.height / 2.0)
    }

    #[test]
    fn hidden_when_inactive() {
        let c = TutorialController::default();
        let overlay = Overlay::new(&c);
        assert!(overlay.state(None).is_none());
        assert!(overlay.buttons().is_empty());
        assert_eq!(overlay.next(), None);
    }

    #[test]
    fn read_only_step_offers_next() {
        let c = TutorialController::default();
        c.start();
        let state = Overlay::new(&c).state(None).unwrap();
        assert_eq!(state.step, Welcome);
        assert_eq!(state.step_label, "Tutorial Step: welcome");
        assert_eq!(state.instruction, Welcome.instruction());
        assert_eq!(state.buttons, vec![OverlayButton::Next, OverlayButton::Skip]);
        assert_eq!(state.hint, None);
        assert_eq!((state.index, state.count), (0, 10));
    }

    #[test]
    fn interactive_step_shows_hint_and_ignores_next() {
        let c = TutorialController::default();
        c.start();
        let overlay = Overlay::new(&c);
        overlay.next();
        let state = overlay.state(None).unwrap();
        assert_eq!(state.step, ClickPlayButton);
        assert_eq!(state.hint, Some(FOLLOW_HINT));
        assert_eq!(state.buttons, vec![OverlayButton::Skip]);
        assert_eq!(overlay.next(), None);
        assert_eq!(c.current_step(), Some(ClickPlayButton));
    }

    #[test]
    fn skip_stops() {
        let c = TutorialController::default();
        c.start();
        assert_eq!(
            Overlay::new(&c).skip(),
            Some(TutorialEvent::Stopped { at: Welcome })
        );
        assert!(!c.is_active());
    }

    #[test]
    fn spotlight_clipped_to_viewport() {
        let c = TutorialController::default();
        c.start();
        c.report_target(Welcome, UiRect::new(-50.0, -50.0, 100.0, 100.0));
        let state = Overlay::new(&c).state(Some(&frame())).unwrap();
        let cutout = state.spotlight.unwrap().cutout.unwrap();
        assert_eq!(cutout.x, 0.0);
        assert_eq!(cutout.y, 0.0);
    }

    #[test]
    fn layout_sits_at_bottom_and_hides_next_on_interactive_steps() {
        let c = TutorialController::default();
        c.start();
        let overlay = Overlay::new(&c);
        let f = frame();
        let layout = overlay.layout(&f);
        assert!(layout.bar.bottom() <= 1080.0);
        assert!(layout.bar.y > 540.0);
        assert!(layout.next.is_some());

        c.resolve_current_step();
        assert!(overlay.layout(&f).next.is_none());
    }

    #[test]
    fn press_prefers_overlay_buttons() {
        let c = TutorialController::default();
        c.start();
        let overlay = Overlay::new(&c);
        let menus = Menus::new(&c);
        let f = frame();
        let next = overlay.layout(&f).next.unwrap();
        let (x, y) = center(next);
        assert_eq!(
            overlay.press(&menus, &f, x, y),
            UiPress::Overlay {
                button: OverlayButton::Next,
                event: Some(TutorialEvent::StepChanged {
                    from: Welcome,
                    to: ClickPlayButton
                })
            }
        );
        // Same spot now empty of overlay buttons and outside the spotlight.
        assert_eq!(
            overlay.press(&menus, &f, x, y),
            UiPress::Menu(PressOutcome::Blocked)
        );
    }
}
