//! Serial console frames.
//!
//! Every frame starts with a carriage return and an erase-line sequence so
//! it overwrites the previous frame on the same terminal line. After a
//! screen change the frame first starts a new line, so the last line of the
//! previous screen stays visible.

use core::fmt::{self, Write};

use super::state::AppState;
use super::ScreenId;
use crate::sensors::Reading;

/// ANSI: inverse video on.
pub const REVERSE: &str = "\x1b[7m";
/// ANSI: all attributes off.
pub const NORMAL: &str = "\x1b[0m";
/// ANSI: erase the entire current line.
pub const CLEAR_LINE: &str = "\x1b[2K";

/// Header printed when a sub-screen is entered.
pub fn header(screen: ScreenId) -> Option<&'static str> {
    match screen {
        ScreenId::Main => None,
        ScreenId::ShowProximity => Some("VCNL4040 Proximity (click to go back):"),
        ScreenId::ShowLux => Some("VCNL4040 Ambient Lux (click to go back):"),
        ScreenId::SetThreshold => Some("Proximity threshold, range 2..60 (click to save):"),
    }
}

/// Write the frame for the current screen.
pub fn render<W: Write>(out: &mut W, state: &AppState, reading: &Reading) -> fmt::Result {
    let screen = state.screen();

    if state.fresh_line() {
        out.write_str("\r\n")?;
        if let Some(text) = header(screen) {
            write!(out, "{}\r\n", text)?;
        }
    }

    out.write_char('\r')?;
    out.write_str(CLEAR_LINE)?;

    match screen {
        ScreenId::Main => {
            out.write_str("Main: ")?;
            for (i, item) in state.menu().iter().enumerate() {
                if i == state.selection() {
                    write!(out, "{} {} {}", REVERSE, item.label, NORMAL)?;
                } else {
                    write!(out, " {} ", item.label)?;
                }
            }
            Ok(())
        }
        ScreenId::ShowProximity => write!(out, " proximity: {:>6}", reading.proximity),
        ScreenId::ShowLux => write!(out, " lux: {:>8.1}", reading.lux),
        ScreenId::SetThreshold => write!(out, " threshold: {:>6}", state.threshold().get()),
    }
}
