#![forbid(unsafe_code)]

//! The tutorial step catalogue.

use std::fmt;
use std::str::FromStr;

use crate::TutorialError;

/// One tutorial step, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TutorialStep {
    Welcome,
    ClickPlayButton,
    OpenSettingsMenu,
    AdjustVolume,
    CloseSettings,
    OpenInventory,
    SelectItem,
    UseItem,
    CloseInventory,
    TutorialComplete,
}

/// The full tutorial, first to last.
pub const DEFAULT_SEQUENCE: [TutorialStep; 10] = TutorialStep::ALL;

impl TutorialStep {
    pub const ALL: [Self; 10] = [
        Self::Welcome,
        Self::ClickPlayButton,
        Self::OpenSettingsMenu,
        Self::AdjustVolume,
        Self::CloseSettings,
        Self::OpenInventory,
        Self::SelectItem,
        Self::UseItem,
        Self::CloseInventory,
        Self::TutorialComplete,
    ];

    /// Slot in per-step tables.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stable kebab-case identifier.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::ClickPlayButton => "click-play-button",
            Self::OpenSettingsMenu => "open-settings-menu",
            Self::AdjustVolume => "adjust-volume",
            Self::CloseSettings => "close-settings",
            Self::OpenInventory => "open-inventory",
            Self::SelectItem => "select-item",
            Self::UseItem => "use-item",
            Self::CloseInventory => "close-inventory",
            Self::TutorialComplete => "tutorial-complete",
        }
    }

    /// Text shown in the overlay while this step is current.
    pub const fn instruction(self) -> &'static str {
        match self {
            Self::Welcome => {
                "Welcome to the tutorial! This will guide you through the basic features."
            }
            Self::ClickPlayButton => "Click the Play button to start your first game.",
            Self::OpenSettingsMenu => "Click the Settings button to customize your experience.",
            Self::AdjustVolume => "Try adjusting the volume slider to your preference.",
            Self::CloseSettings => "Click the Close button to return to the main menu.",
            Self::OpenInventory => "Now let's explore your inventory. Click the Inventory button.",
            Self::SelectItem => "Select an item from your inventory by clicking on it.",
            Self::UseItem => "Click the Use Item button to activate the selected item.",
            Self::CloseInventory => "Close the inventory to return to the main view.",
            Self::TutorialComplete => {
                "Congratulations! You've completed the tutorial. You're ready to play!"
            }
        }
    }

    /// Advanced with the overlay's Next button instead of by interacting
    /// with the UI.
    pub const fn is_read_only(self) -> bool {
        matches!(self, Self::Welcome | Self::TutorialComplete)
    }
}

impl fmt::Display for TutorialStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for TutorialStep {
    type Err = TutorialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|step| step.id() == s)
            .ok_or_else(|| TutorialError::UnknownStep(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_is_in_declaration_order() {
        for (i, step) in DEFAULT_SEQUENCE.iter().enumerate() {
            assert_eq!(step.index(), i);
        }
        assert_eq!(DEFAULT_SEQUENCE.first(), Some(&TutorialStep::Welcome));
        assert_eq!(DEFAULT_SEQUENCE.last(), Some(&TutorialStep::TutorialComplete));
    }

    #[test]
    fn only_bookends_are_read_only() {
        let read_only: Vec<_> = TutorialStep::ALL
            .into_iter()
            .filter(|s| s.is_read_only())
            .collect();
        assert_eq!(
            read_only,
            vec![TutorialStep::Welcome, TutorialStep::TutorialComplete]
        );
    }

    #[test]
    fn ids_round_trip() {
        for step in TutorialStep::ALL {
            assert_eq!(step.id().parse::<TutorialStep>().unwrap(), step);
            assert!(!step.instruction().is_empty());
        }
        assert_eq!(TutorialStep::ClickPlayButton.to_string(), "click-play-button");
        assert!("ClickPlayButton".parse::<TutorialStep>().is_err());
    }
}
