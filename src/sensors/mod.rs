//! I²C peripherals - rotary encoder input and proximity/lux sensor.
//!
//! Both devices sit on the same STEMMA QT bus. The drivers are generic over
//! `embedded_hal::i2c::I2c`, so the firmware hands each one a shared-bus
//! device and the host tests hand them a fake bus.
//!
//! The event loop only sees the [`Encoder`] and [`ProximitySensor`] traits.

pub mod seesaw;
pub mod vcnl4040;


use crate::error::Error;

/// One poll of the rotary encoder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderReading {
    /// Net rotation ticks since the previous poll (positive = clockwise).
    pub delta: i32,
    /// Knob push switch is currently held down.
    pub pressed: bool,
}

/// Latest sensor sample, in driver units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// Raw proximity count (larger = closer).
    pub proximity: u16,
    /// Ambient illuminance (lux).
    pub lux: f32,
}

/// Relative rotary input with a push switch.
pub trait Encoder {
    fn poll(&mut self) -> Result<EncoderReading, Error>;
}

/// Proximity + ambient light source.
pub trait ProximitySensor {
    fn read_proximity(&mut self) -> Result<u16, Error>;

    fn read_lux(&mut self) -> Result<f32, Error>;

    fn read(&mut self) -> Result<Reading, Error> {
        Ok(Reading {
            proximity: self.read_proximity()?,
            lux: self.read_lux()?,
        })
    }
}
