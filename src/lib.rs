//! Library interface for prox-menu.
//!
//! Holds everything that can be tested on the host (no embedded hardware
//! required): the menu state machine, console renderer, event-loop step
//! and the I²C drivers, which are generic over `embedded-hal` traits.
//!
//! Usage: `cargo test --lib` and `cargo test --test integration`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and adds the board bring-up and the USB serial console on top.

#![cfg_attr(not(test), no_std)]

pub mod app;
pub mod config;
pub mod error;
pub mod indicator;
pub mod sensors;
pub mod ui;

pub use app::App;
pub use error::Error;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests - event loop step
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::Indicator;
    use crate::sensors::{Encoder, EncoderReading, ProximitySensor};
    use crate::ui::ScreenId;
    use std::collections::VecDeque;

    struct ScriptedEncoder(VecDeque<EncoderReading>);

    impl Encoder for ScriptedEncoder {
        fn poll(&mut self) -> Result<EncoderReading, Error> {
            Ok(self.0.pop_front().unwrap_or_default())
        }
    }

    struct FixedSensor(u16);

    impl ProximitySensor for FixedSensor {
        fn read_proximity(&mut self) -> Result<u16, Error> {
            Ok(self.0)
        }

        fn read_lux(&mut self) -> Result<f32, Error> {
            Ok(42.0)
        }
    }

    #[derive(Default)]
    struct Led(Option<bool>);

    impl Indicator for Led {
        fn set(&mut self, on: bool) -> Result<(), Error> {
            self.0 = Some(on);
            Ok(())
        }
    }

    fn turn(delta: i32) -> EncoderReading {
        EncoderReading {
            delta,
            pressed: false,
        }
    }

    fn press() -> EncoderReading {
        EncoderReading {
            delta: 0,
            pressed: true,
        }
    }

    fn app(
        script: &[EncoderReading],
        proximity: u16,
    ) -> App<ScriptedEncoder, FixedSensor, Led, String> {
        App::new(
            ScriptedEncoder(script.iter().copied().collect()),
            FixedSensor(proximity),
            Led::default(),
            String::new(),
        )
    }

    #[test]
    fn first_step_draws_main_menu() {
        let mut a = app(&[], 0);
        a.step().unwrap();
        assert!(a.console().contains("Main: "));
        assert!(!a.state().needs_redraw());
    }

    #[test]
    fn idle_main_menu_is_not_redrawn() {
        let mut a = app(&[], 0);
        a.step().unwrap();
        let len = a.console().len();
        for _ in 0..10 {
            a.step().unwrap();
        }
        assert_eq!(a.console().len(), len);
    }

    #[test]
    fn held_click_dispatches_once_on_release() {
        let mut a = app(&[press(), press(), press(), turn(0), turn(0)], 0);
        let mut fired = 0;
        for _ in 0..5 {
            if a.step().unwrap().is_some() {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
        assert_eq!(a.state().screen(), ScreenId::ShowProximity);
    }

    #[test]
    fn rotation_in_click_poll_applies_to_new_screen() {
        let mut a = app(
            &[
                turn(2),
                press(),
                EncoderReading {
                    delta: 3,
                    pressed: false,
                },
            ],
            0,
        );
        a.step().unwrap();
        a.step().unwrap();
        let t = a.step().unwrap().unwrap();
        assert_eq!(t.to, ScreenId::SetThreshold);
        assert_eq!(a.state().threshold().get(), 7);
        assert_eq!(a.state().selection(), 2);
    }

    #[test]
    fn rotation_in_return_click_moves_selection() {
        let mut a = app(
            &[
                press(),
                turn(0),
                press(),
                EncoderReading {
                    delta: -1,
                    pressed: false,
                },
            ],
            0,
        );
        for _ in 0..4 {
            a.step().unwrap();
        }
        assert_eq!(a.state().screen(), ScreenId::Main);
        assert_eq!(a.state().selection(), 2);
    }

    /// Sink that records each write as one chunk.
    #[derive(Default)]
    struct Chunks(Vec<String>);

    impl core::fmt::Write for Chunks {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            self.0.push(s.to_owned());
            Ok(())
        }
    }

    #[test]
    fn each_frame_reaches_the_console_in_one_write() {
        let mut a = App::new(
            ScriptedEncoder([turn(1), press(), turn(0)].into_iter().collect()),
            FixedSensor(0),
            Led::default(),
            Chunks::default(),
        );
        for _ in 0..5 {
            a.step().unwrap();
        }
        let chunks = &a.console().0;
        // Main, Main after rotation, ShowLux on entry.
        assert_eq!(chunks.len(), 3);
        for chunk in &chunks[..2] {
            assert!(chunk.starts_with('\r'));
            assert_eq!(chunk.matches(ui::console::REVERSE).count(), 1);
            assert_eq!(chunk.matches(ui::console::NORMAL).count(), 1);
        }
        assert!(chunks[2].contains("Ambient Lux"));
        assert!(chunks[2].contains(" lux:"));
    }

    #[test]
    fn indicator_tracks_proximity_on_every_screen() {
        let mut near = app(&[press(), turn(0)], 3);
        let mut far = app(&[press(), turn(0)], 9);
        for _ in 0..3 {
            near.step().unwrap();
            far.step().unwrap();
            assert_eq!(near.indicator().0, Some(true));
            assert_eq!(far.indicator().0, Some(false));
        }
    }

    #[test]
    fn reading_screen_refreshes_at_divided_rate() {
        let mut a = app(&[press(), turn(0)], 7);
        a.step().unwrap();
        a.step().unwrap(); // click -> ShowProximity
        a.step().unwrap(); // header + first value
        let after_entry = a.console().matches("proximity:").count();
        assert_eq!(after_entry, 1);
        for _ in 0..config::READING_REFRESH_DIVIDER {
            a.step().unwrap();
        }
        assert_eq!(a.console().matches("proximity:").count(), 2);
    }

    #[test]
    fn request_redraw_repeats_current_screen() {
        let mut a = app(&[], 0);
        a.step().unwrap();
        a.request_redraw();
        a.step().unwrap();
        assert_eq!(a.console().matches("Main: ").count(), 2);
    }
}
