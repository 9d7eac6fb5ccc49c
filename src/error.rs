//! Unified error type for prox-menu.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging when the
//! `defmt` feature is enabled.

use embedded_hal::i2c::ErrorKind;

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Bus
    /// An I²C transaction failed.
    Bus(ErrorKind),

    // Encoder
    /// The device at the encoder address is not a seesaw chip.
    EncoderNotFound { hw_id: u8 },

    /// The seesaw firmware is not the rotary encoder build.
    UnexpectedFirmware { product: u16 },

    // Sensor
    /// The VCNL4040 ID register did not match.
    SensorNotFound { id: u16 },

    // Outputs
    /// The indicator pin could not be driven.
    Indicator,

    /// Formatting a console frame failed (frame buffer full).
    Console,
}

impl Error {
    /// Collapse a HAL-specific I²C error into its portable kind.
    pub fn from_i2c<E: embedded_hal::i2c::Error>(e: E) -> Self {
        Error::Bus(e.kind())
    }
}

// Convenience conversions

impl From<core::fmt::Error> for Error {
    fn from(_: core::fmt::Error) -> Self {
        Error::Console
    }
}
