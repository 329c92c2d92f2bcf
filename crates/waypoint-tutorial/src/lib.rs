#![forbid(unsafe_code)]

//! In-game tutorial: step catalogue, highlight registry, controller, and
//! headless menus.
//!
//! ```
//! use waypoint_tutorial::{Overlay, TutorialController, TutorialStep};
//!
//! let controller = TutorialController::default();
//! controller.start();
//! let overlay = Overlay::new(&controller);
//! assert_eq!(overlay.state(None).unwrap().step, TutorialStep::Welcome);
//! overlay.next();
//! assert_eq!(controller.current_step(), Some(TutorialStep::ClickPlayButton));
//! ```
//!
//! The host reports element rectangles through the menus, routes pointer
//! presses through [`Overlay::press`], and renders [`OverlayState`] plus the
//! menu view models each frame.

pub mod controller;
pub mod highlight;
pub mod menus;
pub mod overlay;
pub mod steps;

pub use controller::{AutoStart, DEFAULT_VOLUME, TutorialController, TutorialEvent};
pub use highlight::{HighlightStyle, Highlighter, PointerDisposition, Spotlight};
pub use menus::{
    Button, FrameContext, INVENTORY, InventoryControl, InventoryMenu, Item, ItemId, MainMenu,
    MainMenuButton, MenuControl, Menus, PanelLayout, PanelMetrics, PressOutcome, SettingsControl,
    SettingsMenu, TutorialControls, min_row_height, panel_metrics,
};
pub use overlay::{FOLLOW_HINT, Overlay, OverlayButton, OverlayLayout, OverlayState, UiPress};
pub use steps::{DEFAULT_SEQUENCE, TutorialStep};

use thiserror::Error;

/// Errors from tutorial setup and parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TutorialError {
    /// A step sequence with no steps.
    #[error("tutorial sequence is empty")]
    EmptySequence,

    /// A step id that is not in the catalogue.
    #[error("unknown tutorial step: {0:?}")]
    UnknownStep(String),
}
