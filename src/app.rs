//! One iteration of the event loop, independent of the executor.
//!
//! The firmware calls [`App::step`] once per poll interval. Each step runs,
//! in order:
//!
//! 1. render the current screen if it is dirty (or a live reading is due)
//! 2. poll the encoder
//! 3. on a click release edge, dispatch the click
//! 4. apply the rotation delta under the (possibly new) screen's rules
//! 5. read the sensor and update the indicator
//!
//! Any device error ends the step early and is returned to the caller.

use core::fmt::Write;

use crate::config::{FRAME_CAPACITY, READING_REFRESH_DIVIDER};
use crate::error::Error;
use crate::indicator::{indicator_on, Indicator};
use crate::sensors::{Encoder, ProximitySensor, Reading};
use crate::ui::console;
use crate::ui::input_logic::ClickEdge;
use crate::ui::state::AppState;
use crate::ui::{ScreenId, Transition};

/// Event loop state plus the devices it drives.
pub struct App<E, S, L, W> {
    encoder: E,
    sensor: S,
    indicator: L,
    console: W,
    state: AppState,
    click: ClickEdge,
    reading: Reading,
    refresh_tick: u8,
}

impl<E, S, L, W> App<E, S, L, W>
where
    E: Encoder,
    S: ProximitySensor,
    L: Indicator,
    W: Write,
{
    /// Start on the main menu with the default threshold.
    pub fn new(encoder: E, sensor: S, indicator: L, console: W) -> Self {
        Self {
            encoder,
            sensor,
            indicator,
            console,
            state: AppState::default(),
            click: ClickEdge::new(),
            reading: Reading::default(),
            refresh_tick: 0,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn indicator(&self) -> &L {
        &self.indicator
    }

    pub fn console(&self) -> &W {
        &self.console
    }

    /// Redraw the current screen on the next step, e.g. when a terminal
    /// has just attached.
    pub fn request_redraw(&mut self) {
        self.state.request_redraw();
    }

    /// Run one poll cycle. Returns the screen transition, if a click fired.
    pub fn step(&mut self) -> Result<Option<Transition>, Error> {
        self.render()?;

        let input = self.encoder.poll()?;
        let transition = if self.click.update(input.pressed) {
            Some(self.state.click())
        } else {
            None
        };
        self.state.rotate(input.delta);

        self.reading = self.sensor.read()?;
        let lit = indicator_on(self.reading.proximity, self.state.threshold());
        self.indicator.set(lit)?;

        Ok(transition)
    }

    fn render(&mut self) -> Result<(), Error> {
        let live = matches!(
            self.state.screen(),
            ScreenId::ShowProximity | ScreenId::ShowLux
        );

        let due = if self.state.needs_redraw() {
            self.refresh_tick = 0;
            true
        } else if live {
            self.refresh_tick = (self.refresh_tick + 1) % READING_REFRESH_DIVIDER;
            self.refresh_tick == 0
        } else {
            false
        };

        if due {
            // One write per frame; the USB sink drops writes whole.
            let mut frame = heapless::String::<FRAME_CAPACITY>::new();
            console::render(&mut frame, &self.state, &self.reading)?;
            self.console.write_str(&frame)?;
            self.state.mark_drawn();
        }
        Ok(())
    }
}
