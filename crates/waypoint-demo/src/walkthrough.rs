//! Scripted tutorial run against the headless menus.
//!
//! The script plays the part of a player. It skips the auto-start delay in
//! a single timer step, then for each step presses the overlay's Next
//! button or the centre of the highlighted target. A press the overlay or
//! highlight swallows falls back to clicking the step's control directly,
//! which is what a player would do after moving the pointer.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use tracing::{debug, info, warn};
use waypoint_core::{ScreenSize, UiRect};
use waypoint_runtime::{Viewport, WaypointConfig};
use waypoint_tutorial::{
    AutoStart, FrameContext, Highlighter, INVENTORY, InventoryControl, MainMenuButton, MenuControl,
    Menus, Overlay, OverlayState, PressOutcome, SettingsControl, TutorialControls,
    TutorialController, TutorialEvent, TutorialStep, UiPress,
};

use crate::error::{DemoError, Result};

#[derive(Debug, Clone, Args)]
pub struct WalkthroughArgs {
    /// TOML or JSON config file (`.json` selects JSON).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1920.0)]
    pub width: f64,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 1080.0)]
    pub height: f64,
}

impl Default for WalkthroughArgs {
    fn default() -> Self {
        Self {
            config: None,
            width: 1920.0,
            height: 1080.0,
        }
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkthroughSummary {
    pub events: Vec<TutorialEvent>,
    pub steps_visited: Vec<TutorialStep>,
    /// Presses that missed and needed a direct click.
    pub fallbacks: usize,
    pub final_volume: u8,
}

fn load_config(args: &WalkthroughArgs) -> Result<WaypointConfig> {
    match &args.config {
        Some(path) => Ok(WaypointConfig::load(path)?),
        None => Ok(WaypointConfig::default()),
    }
}

/// The menu control that completes an interactive step.
pub fn control_for(step: TutorialStep) -> Option<MenuControl> {
    use TutorialStep::*;
    let control = match step {
        Welcome | TutorialComplete => return None,
        ClickPlayButton => MenuControl::Main(MainMenuButton::Play),
        OpenSettingsMenu => MenuControl::Main(MainMenuButton::Settings),
        AdjustVolume => MenuControl::Settings(SettingsControl::VolumeSlider),
        CloseSettings => MenuControl::Settings(SettingsControl::Close),
        OpenInventory => MenuControl::Main(MainMenuButton::Inventory),
        SelectItem => MenuControl::Inventory(InventoryControl::Item(INVENTORY[0].id)),
        UseItem => MenuControl::Inventory(InventoryControl::UseItem),
        CloseInventory => MenuControl::Inventory(InventoryControl::Close),
    };
    Some(control)
}

fn center(rect: UiRect) -> (f64, f64) {
    (rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)
}

fn press_event(press: UiPress) -> Option<TutorialEvent> {
    match press {
        UiPress::Overlay { event, .. } => event,
        UiPress::Menu(PressOutcome::Hit { event, .. }) => event,
        UiPress::Menu(_) => None,
    }
}

fn print_state(out: &mut dyn Write, state: &OverlayState) -> Result<()> {
    writeln!(
        out,
        "[{}/{}] {}",
        state.index + 1,
        state.count,
        state.step_label
    )?;
    writeln!(out, "    {}", state.instruction)?;
    if let Some(hint) = state.hint {
        writeln!(out, "    ({hint})")?;
    }
    if let Some(cutout) = state.spotlight.and_then(|s| s.cutout) {
        writeln!(
            out,
            "    spotlight {:.0},{:.0} {:.0}x{:.0}",
            cutout.x, cutout.y, cutout.width, cutout.height
        )?;
    }
    let buttons: Vec<_> = state.buttons.iter().map(|b| b.label()).collect();
    writeln!(out, "    buttons: {}", buttons.join(", "))?;
    Ok(())
}

/// Perform the current step. Returns the resulting event and whether the
/// direct-click fallback was needed.
fn perform_step(
    controller: &TutorialController,
    frame: &FrameContext,
    step: TutorialStep,
) -> (Option<TutorialEvent>, bool) {
    let overlay = Overlay::new(controller);
    let menus = Menus::new(controller);
    menus.report_targets(frame);

    let point = if step.is_read_only() {
        overlay.layout(frame).next.map(center)
    } else {
        controller.highlighter().target(step).map(center)
    };
    if let Some((x, y)) = point {
        let press = overlay.press(&menus, frame, x, y);
        debug!(step = %step, x, y, ?press, "pressed");
        if let Some(event) = press_event(press) {
            return (Some(event), false);
        }
    }

    warn!(step = %step, "press did not advance, clicking directly");
    let event = match control_for(step) {
        Some(control) => menus.click(control),
        None => overlay.next(),
    };
    (event, true)
}

/// Run the tutorial to completion and describe each step on `out`.
pub fn walkthrough(args: &WalkthroughArgs, out: &mut dyn Write) -> Result<WalkthroughSummary> {
    let config = load_config(args)?;
    let size = ScreenSize::try_new(args.width, args.height)
        .map_err(|e| DemoError::invalid(e.to_string()))?;
    walkthrough_with(&config, size, out)
}

/// Like [`walkthrough`] with an already loaded config.
pub fn walkthrough_with(
    config: &WaypointConfig,
    size: ScreenSize,
    out: &mut dyn Write,
) -> Result<WalkthroughSummary> {
    let viewport = Viewport::new(size)?;
    let layout = viewport.watch_layout(config.display.layout_query());
    let scale = viewport.watch_scale(config.display.scale_query()?);
    let frame = FrameContext::new(viewport.size(), layout.get(), scale.get());
    writeln!(
        out,
        "viewport {} -> {} (scale {:.3})",
        frame.viewport,
        frame.layout,
        frame.px.scale()
    )?;

    let controller = TutorialController::new(Highlighter::from_config(&config.highlight));
    let mut events = Vec::new();

    let mut timer = AutoStart::from_config(&config.tutorial);
    let waited = timer.remaining();
    if let Some(event) = timer.tick(&controller, waited) {
        writeln!(out, "auto-started after {waited:?}")?;
        events.push(event);
    }
    if !controller.is_active() {
        // Auto-start disabled: use the restart button like a player would.
        let controls = TutorialControls::new(&controller);
        writeln!(out, "{}", controls.toggle_button().label)?;
        events.extend(controls.toggle());
    }

    let overlay = Overlay::new(&controller);
    let mut steps_visited = Vec::new();
    let mut fallbacks = 0;
    while let Some(state) = overlay.state(Some(&frame)) {
        print_state(out, &state)?;
        steps_visited.push(state.step);

        let (event, fell_back) = perform_step(&controller, &frame, state.step);
        fallbacks += usize::from(fell_back);
        match event {
            Some(event) => events.push(event),
            None => return Err(DemoError::Stalled { step: state.step }),
        }
    }

    let summary = WalkthroughSummary {
        events,
        steps_visited,
        fallbacks,
        final_volume: controller.volume(),
    };
    info!(
        steps = summary.steps_visited.len(),
        fallbacks = summary.fallbacks,
        "walkthrough finished"
    );
    writeln!(
        out,
        "tutorial complete: {} steps, volume {}%",
        summary.steps_visited.len(),
        summary.final_volume
    )?;
    Ok(summary)
}

pub fn run_walkthrough(args: WalkthroughArgs, out: &mut dyn Write) -> Result<()> {
    walkthrough(&args, out).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_tutorial::DEFAULT_SEQUENCE;

    #[test]
    fn every_interactive_step_has_a_control() {
        for step in DEFAULT_SEQUENCE {
            assert_eq!(control_for(step).is_none(), step.is_read_only(), "{step}");
        }
    }

    #[test]
    fn desktop_run_visits_every_step_by_pressing() {
        let mut out = Vec::new();
        let summary = walkthrough(&WalkthroughArgs::default(), &mut out).unwrap();
        assert_eq!(summary.steps_visited, DEFAULT_SEQUENCE.to_vec());
        assert_eq!(summary.fallbacks, 0);
        assert_eq!(summary.final_volume, 25);
        assert_eq!(
            summary.events.first(),
            Some(&TutorialEvent::Started {
                first: TutorialStep::Welcome
            })
        );
        assert_eq!(
            summary.events.last(),
            Some(&TutorialEvent::Completed {
                last: TutorialStep::TutorialComplete
            })
        );

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("auto-started after 1s"));
        assert!(text.contains("[1/10] Tutorial Step: welcome"));
        assert!(text.contains("[10/10] Tutorial Step: tutorial-complete"));
        assert!(text.contains("tutorial complete: 10 steps, volume 25%"));
    }

    #[test]
    fn huge_auto_start_delay_fires_in_one_step() {
        let mut config = WaypointConfig::default();
        config.tutorial.auto_start_delay_ms = u64::MAX;
        let mut out = Vec::new();
        let summary =
            walkthrough_with(&config, ScreenSize::new(1920.0, 1080.0), &mut out).unwrap();
        assert_eq!(summary.steps_visited.len(), 10);
        assert!(String::from_utf8(out).unwrap().contains("auto-started after"));
    }

    #[test]
    fn small_landscape_phone_still_completes() {
        let args = WalkthroughArgs {
            width: 844.0,
            height: 390.0,
            ..WalkthroughArgs::default()
        };
        let summary = walkthrough(&args, &mut Vec::new()).unwrap();
        assert_eq!(summary.steps_visited.len(), 10);
    }

    #[test]
    fn invalid_viewport_is_an_argument_error() {
        let args = WalkthroughArgs {
            width: -1.0,
            ..WalkthroughArgs::default()
        };
        let err = walkthrough(&args, &mut Vec::new()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
