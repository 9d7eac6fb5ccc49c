//! Vishay VCNL4040 proximity + ambient light sensor.
//!
//! Registers are 16 bits wide, little-endian, selected by a one-byte
//! command code:
//!
//! ```text
//! 0x00 ALS_CONF     bit 0 = ALS_SD (shutdown), bits 6..7 = ALS_IT
//! 0x03 PS_CONF1_2   bit 0 = PS_SD (shutdown)
//! 0x08 PS_DATA
//! 0x09 ALS_DATA
//! 0x0C ID           low byte 0x86
//! ```

use embedded_hal::i2c::I2c;

use super::ProximitySensor;
use crate::error::Error;

const REG_ALS_CONF: u8 = 0x00;
const REG_PS_CONF1_2: u8 = 0x03;
const REG_PS_DATA: u8 = 0x08;
const REG_ALS_DATA: u8 = 0x09;
const REG_ID: u8 = 0x0C;

const DEVICE_ID_LOW: u8 = 0x86;

/// Ambient light integration time. Longer = finer resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlsIntegration {
    Ms80,
    Ms160,
    Ms320,
    Ms640,
}

impl AlsIntegration {
    fn bits(self) -> u16 {
        match self {
            AlsIntegration::Ms80 => 0b00,
            AlsIntegration::Ms160 => 0b01,
            AlsIntegration::Ms320 => 0b10,
            AlsIntegration::Ms640 => 0b11,
        }
    }

    /// Lux per ALS count (datasheet table 14).
    pub fn lux_per_count(self) -> f32 {
        match self {
            AlsIntegration::Ms80 => 0.1,
            AlsIntegration::Ms160 => 0.05,
            AlsIntegration::Ms320 => 0.025,
            AlsIntegration::Ms640 => 0.0125,
        }
    }
}

/// VCNL4040 on an I²C bus.
pub struct Vcnl4040<I2C> {
    i2c: I2C,
    address: u8,
    integration: AlsIntegration,
}

impl<I2C: I2c> Vcnl4040<I2C> {
    /// Check the device ID and power on both the proximity and ambient
    /// light engines.
    pub fn init(i2c: I2C, address: u8, integration: AlsIntegration) -> Result<Self, Error> {
        let mut dev = Self {
            i2c,
            address,
            integration,
        };

        let id = dev.read_register(REG_ID)?;
        if id & 0x00FF != DEVICE_ID_LOW as u16 {
            return Err(Error::SensorNotFound { id });
        }

        dev.write_register(REG_PS_CONF1_2, 0x0000)?;
        dev.set_integration(integration)?;
        Ok(dev)
    }

    /// Change the ALS integration time (also clears ALS shutdown).
    pub fn set_integration(&mut self, integration: AlsIntegration) -> Result<(), Error> {
        self.write_register(REG_ALS_CONF, integration.bits() << 6)?;
        self.integration = integration;
        Ok(())
    }

    pub fn integration(&self) -> AlsIntegration {
        self.integration
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn read_register(&mut self, reg: u8) -> Result<u16, Error> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .map_err(Error::from_i2c)?;
        Ok(u16::from_le_bytes(buf))
    }

    fn write_register(&mut self, reg: u8, value: u16) -> Result<(), Error> {
        let [lo, hi] = value.to_le_bytes();
        self.i2c
            .write(self.address, &[reg, lo, hi])
            .map_err(Error::from_i2c)
    }
}

impl<I2C: I2c> ProximitySensor for Vcnl4040<I2C> {
    fn read_proximity(&mut self) -> Result<u16, Error> {
        self.read_register(REG_PS_DATA)
    }

    fn read_lux(&mut self) -> Result<f32, Error> {
        let counts = self.read_register(REG_ALS_DATA)?;
        Ok(counts as f32 * self.integration.lux_per_count())
    }
}
