//! End-to-end tutorial runs driven only by pointer presses.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use waypoint_core::{ScreenSize, UiRect};
use waypoint_runtime::{LayoutQuery, ScaleQuery, Viewport};
use waypoint_tutorial::{
    DEFAULT_SEQUENCE, FrameContext, Menus, Overlay, PressOutcome, TutorialController,
    TutorialEvent, TutorialStep, UiPress,
};

fn center(r: UiRect) -> (f64, f64) {
    (r.x + r.width / 2.0, r.y + r.height / 2.0)
}

fn frame_for(viewport: &Viewport) -> FrameContext {
    let layout = viewport.watch_layout(LayoutQuery::any()).get();
    let px = viewport.watch_scale(ScaleQuery::default()).get();
    FrameContext::new(viewport.size(), layout, px)
}

/// Press whatever the current step asks for. Returns the press result.
fn perform_step(controller: &TutorialController, frame: &FrameContext) -> UiPress {
    let overlay = Overlay::new(controller);
    let menus = Menus::new(controller);
    let step = controller.current_step().expect("tutorial running");

    let (x, y) = if step.is_read_only() {
        center(overlay.layout(frame).next.expect("next button on read-only step"))
    } else {
        menus.report_targets(frame);
        center(controller.highlighter().target(step).expect("target reported"))
    };
    overlay.press(&menus, frame, x, y)
}

fn run_to_completion(size: ScreenSize) -> Vec<TutorialEvent> {
    let viewport = Viewport::new(size).unwrap();
    let frame = frame_for(&viewport);
    let controller = TutorialController::default();
    let mut events = vec![controller.start()];

    for _ in 0..DEFAULT_SEQUENCE.len() {
        let event = match perform_step(&controller, &frame) {
            UiPress::Overlay { event, .. } => event,
            UiPress::Menu(PressOutcome::Hit { event, .. }) => event,
            other => panic!("press did not reach a control at {size}: {other:?}"),
        };
        events.push(event.expect("press advanced the tutorial"));
    }
    assert!(!controller.is_active());
    events
}

#[test]
fn full_walkthrough_on_desktop() {
    let events = run_to_completion(ScreenSize::new(1920.0, 1080.0));
    assert_eq!(events.len(), 11);
    assert_eq!(events[0], TutorialEvent::Started { first: TutorialStep::Welcome });
    for (i, pair) in DEFAULT_SEQUENCE.windows(2).enumerate() {
        assert_eq!(
            events[i + 1],
            TutorialEvent::StepChanged {
                from: pair[0],
                to: pair[1]
            }
        );
    }
    assert_eq!(
        events[10],
        TutorialEvent::Completed {
            last: TutorialStep::TutorialComplete
        }
    );
}

#[test]
fn walkthrough_leaves_expected_state() {
    let viewport = Viewport::new(ScreenSize::new(1024.0, 768.0)).unwrap();
    let frame = frame_for(&viewport);
    let controller = TutorialController::default();
    controller.start();
    while controller.is_active() {
        perform_step(&controller, &frame);
    }
    assert_eq!(controller.volume(), 25);
    assert!(!controller.settings_open());
    assert!(!controller.inventory_open());
    assert!(!controller.menu_open());
    assert_eq!(controller.selected_item(), None);
}

#[test]
fn step_changes_are_observable() {
    let controller = TutorialController::default();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = Rc::clone(&seen);
    let _sub = controller
        .current_step_cell()
        .subscribe(move |step| s.borrow_mut().push(*step));

    controller.start();
    let viewport = Viewport::new(ScreenSize::new(2560.0, 1080.0)).unwrap();
    let frame = frame_for(&viewport);
    while controller.is_active() {
        perform_step(&controller, &frame);
    }

    let mut expected: Vec<_> = DEFAULT_SEQUENCE.iter().copied().map(Some).collect();
    expected.push(None);
    assert_eq!(*seen.borrow(), expected);
}

#[test]
fn clicks_outside_spotlight_do_not_change_state() {
    let viewport = Viewport::new(ScreenSize::new(1920.0, 1080.0)).unwrap();
    let frame = frame_for(&viewport);
    let controller = TutorialController::default();
    controller.start();
    Overlay::new(&controller).next();

    // The Settings button is dimmed while the Play step is highlighted.
    let menus = Menus::new(&controller);
    let settings = menus.main.layout(&frame).rows[1];
    let (x, y) = center(settings);
    assert_eq!(menus.press(&frame, x, y), PressOutcome::Blocked);
    assert!(!controller.settings_open());
    assert_eq!(controller.current_step(), Some(TutorialStep::ClickPlayButton));
}

proptest! {
    #[test]
    fn any_press_keeps_controller_consistent(
        presses in prop::collection::vec((0.0f64..1920.0, 0.0f64..1080.0), 0..60),
    ) {
        let viewport = Viewport::new(ScreenSize::new(1920.0, 1080.0)).unwrap();
        let frame = frame_for(&viewport);
        let controller = TutorialController::default();
        controller.start();
        let overlay = Overlay::new(&controller);
        let menus = Menus::new(&controller);

        let mut last_index = 0;
        for (x, y) in presses {
            overlay.press(&menus, &frame, x, y);
            prop_assert_eq!(controller.is_active(), controller.current_step().is_some());
            prop_assert!(controller.volume() <= 100);
            if let Some(step) = controller.current_step() {
                // Steps only move forward.
                prop_assert!(step.index() >= last_index);
                last_index = step.index();
            }
        }
    }
}
