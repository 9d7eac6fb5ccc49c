//! User interface subsystem - menu state machine + serial console frames.
//!
//! The event loop owns one [`state::AppState`] and feeds it knob rotation
//! and release-edge clicks; [`console`] turns the state into
//! escape-coded text for the serial terminal.
//!
//! ## Screens
//!
//! - **Main**: horizontal menu, selection shown in reverse video
//! - **ShowProximity** / **ShowLux**: live sensor value on one line
//! - **SetThreshold**: knob edits the proximity threshold in place

pub mod console;
pub mod input_logic;
pub mod state;

/// Screens (views) the UI can be in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScreenId {
    /// Main menu - rotate to pick, click to enter.
    Main,
    /// Live proximity reading - click to go back.
    ShowProximity,
    /// Live ambient lux reading - click to go back.
    ShowLux,
    /// Threshold editor - rotate to change, click to save.
    SetThreshold,
}

/// One entry of the main menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuItem {
    /// Text shown on the main screen.
    pub label: &'static str,
    /// Screen entered when the item is clicked.
    pub action: ScreenId,
}

/// The main menu, in display order.
pub const MENU: [MenuItem; 3] = [
    MenuItem {
        label: "Show Proximity",
        action: ScreenId::ShowProximity,
    },
    MenuItem {
        label: "Show Lux",
        action: ScreenId::ShowLux,
    },
    MenuItem {
        label: "Set Threshold",
        action: ScreenId::SetThreshold,
    },
];

/// A screen change caused by a click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub from: ScreenId,
    pub to: ScreenId,
}
