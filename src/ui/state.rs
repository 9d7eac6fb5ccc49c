//! Menu state machine.
//!
//! A single [`AppState`] is created at startup and lives until power-off.
//! The event loop mutates it through [`AppState::click`] and
//! [`AppState::rotate`]; the console renderer reads it.

use super::input_logic::select_wrapped;
use super::{MenuItem, ScreenId, Transition, MENU};
use crate::config::{THRESHOLD_DEFAULT, THRESHOLD_MAX, THRESHOLD_MIN};

/// Proximity threshold, always within `THRESHOLD_MIN..=THRESHOLD_MAX`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Threshold(u16);

impl Threshold {
    /// Saturate `value` into the accepted range.
    pub fn new(value: u16) -> Self {
        Self(value.clamp(THRESHOLD_MIN, THRESHOLD_MAX))
    }

    pub fn get(self) -> u16 {
        self.0
    }

    /// Shift by a signed knob delta; out-of-range results saturate at the bound.
    pub fn offset(self, delta: i32) -> Self {
        let v = (self.0 as i64 + delta as i64).clamp(THRESHOLD_MIN as i64, THRESHOLD_MAX as i64);
        Self(v as u16)
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(THRESHOLD_DEFAULT)
    }
}

/// Live UI state owned by the event loop.
#[derive(Clone, Debug)]
pub struct AppState {
    screen: ScreenId,
    selection: usize,
    threshold: Threshold,
    needs_redraw: bool,
    fresh_line: bool,
}

impl AppState {
    pub fn menu(&self) -> &'static [MenuItem] {
        &MENU
    }

    pub fn screen(&self) -> ScreenId {
        self.screen
    }

    pub fn selection(&self) -> usize {
        self.selection
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    pub fn fresh_line(&self) -> bool {
        self.fresh_line
    }

    /// Force the next render to redraw the current screen from a new line.
    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
        self.fresh_line = true;
    }

    /// Called by the renderer once a frame has been written.
    pub fn mark_drawn(&mut self) {
        self.needs_redraw = false;
        self.fresh_line = false;
    }

    /// Handle a knob click (release edge).
    ///
    /// From `Main` this enters the selected item's screen; from any other
    /// screen it returns to `Main` with the selection untouched.
    pub fn click(&mut self) -> Transition {
        let from = self.screen;
        let to = match from {
            ScreenId::Main => MENU[self.selection].action,
            ScreenId::ShowProximity | ScreenId::ShowLux | ScreenId::SetThreshold => {
                ScreenId::Main
            }
        };
        self.screen = to;
        self.request_redraw();
        Transition { from, to }
    }

    /// Apply a knob rotation according to the current screen's rules.
    pub fn rotate(&mut self, delta: i32) {
        if delta == 0 {
            return;
        }
        match self.screen {
            ScreenId::Main => {
                let next = select_wrapped(self.selection, delta, MENU.len());
                if next != self.selection {
                    self.selection = next;
                    self.needs_redraw = true;
                }
            }
            ScreenId::SetThreshold => {
                let next = self.threshold.offset(delta);
                if next != self.threshold {
                    self.threshold = next;
                    self.needs_redraw = true;
                }
            }
            ScreenId::ShowProximity | ScreenId::ShowLux => {}
        }
    }
}

/// Power-up state: main menu, first item selected, default threshold.
impl Default for AppState {
    fn default() -> Self {
        Self {
            screen: ScreenId::Main,
            selection: 0,
            threshold: Threshold::default(),
            needs_redraw: true,
            fresh_line: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_up_defaults() {
        let state = AppState::default();
        assert_eq!(state.screen(), ScreenId::Main);
        assert_eq!(state.selection(), 0);
        assert_eq!(state.threshold().get(), 4);
        assert!(state.needs_redraw());
    }

    #[test]
    fn threshold_saturates_at_bounds() {
        assert_eq!(Threshold::new(2).offset(-5).get(), 2);
        assert_eq!(Threshold::new(58).offset(10).get(), 60);
        assert_eq!(Threshold::new(0).get(), 2);
        assert_eq!(Threshold::new(1000).get(), 60);
        assert_eq!(Threshold::new(30).offset(i32::MIN).get(), 2);
        assert_eq!(Threshold::new(30).offset(i32::MAX).get(), 60);
    }

    #[test]
    fn main_click_enters_selected_screen() {
        for (i, item) in MENU.iter().enumerate() {
            let mut state = AppState::default();
            state.rotate(i as i32);
            let t = state.click();
            assert_eq!(t.from, ScreenId::Main);
            assert_eq!(t.to, item.action);
            assert_eq!(state.screen(), item.action);
        }
    }

    #[test]
    fn sub_screen_click_returns_to_main_keeping_selection() {
        for sel in 0..MENU.len() {
            let mut state = AppState::default();
            state.rotate(sel as i32);
            state.click();
            let t = state.click();
            assert_eq!(t.to, ScreenId::Main);
            assert_eq!(state.selection(), sel);
        }
    }

    #[test]
    fn rotation_ignored_on_reading_screens() {
        let mut state = AppState::default();
        state.click(); // ShowProximity
        state.mark_drawn();
        state.rotate(5);
        assert_eq!(state.selection(), 0);
        assert_eq!(state.threshold().get(), 4);
        assert!(!state.needs_redraw());
    }

    #[test]
    fn rotation_on_threshold_screen_edits_threshold_only() {
        let mut state = AppState::default();
        state.rotate(2);
        state.click();
        assert_eq!(state.screen(), ScreenId::SetThreshold);
        state.rotate(-1);
        assert_eq!(state.threshold().get(), 3);
        state.rotate(100);
        assert_eq!(state.threshold().get(), 60);
        assert_eq!(state.selection(), 2);
    }

    #[test]
    fn saturated_rotation_does_not_mark_dirty() {
        let mut state = AppState::default();
        state.rotate(2);
        state.click();
        state.rotate(-10);
        state.mark_drawn();
        state.rotate(-1);
        assert!(!state.needs_redraw());
    }

    #[test]
    fn screen_change_requests_fresh_line() {
        let mut state = AppState::default();
        state.mark_drawn();
        state.rotate(1);
        assert!(state.needs_redraw());
        assert!(!state.fresh_line());
        state.click();
        assert!(state.fresh_line());
    }
}
