//! Adafruit seesaw rotary encoder (I²C QT Rotary Encoder, product 4991).
//!
//! Register access is a two-step transaction: write `[module, function]`,
//! give the seesaw firmware time to fetch the value, then read it back.
//! Multi-byte values are big-endian.
//!
//! ```text
//! STATUS  0x00: HW_ID 0x01, VERSION 0x02, SWRST 0x7F
//! GPIO    0x01: DIRCLR_BULK 0x03, BULK 0x04, BULK_SET 0x05, PULLENSET 0x0B
//! ENCODER 0x11: DELTA 0x40
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use super::{Encoder, EncoderReading};
use crate::config::{
    ENCODER_BUTTON_PIN, ENCODER_PRODUCT_CODE, SEESAW_READ_DELAY_US, SEESAW_RESET_DELAY_MS,
};
use crate::error::Error;

const STATUS_BASE: u8 = 0x00;
const STATUS_HW_ID: u8 = 0x01;
const STATUS_VERSION: u8 = 0x02;
const STATUS_SWRST: u8 = 0x7F;

const GPIO_BASE: u8 = 0x01;
const GPIO_DIRCLR_BULK: u8 = 0x03;
const GPIO_BULK: u8 = 0x04;
const GPIO_BULK_SET: u8 = 0x05;
const GPIO_PULLENSET: u8 = 0x0B;

const ENCODER_BASE: u8 = 0x11;
const ENCODER_DELTA: u8 = 0x40;

/// HW_ID values of known seesaw chips (SAMD09, ATtiny8x7 / 16x7 family).
const KNOWN_HW_IDS: [u8; 5] = [0x55, 0x84, 0x85, 0x86, 0x87];

/// Seesaw encoder on an I²C bus.
pub struct SeesawEncoder<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
}

impl<I2C: I2c, D: DelayNs> SeesawEncoder<I2C, D> {
    /// Reset the board, verify it runs the encoder firmware and enable the
    /// pull-up on the knob switch.
    pub fn init(i2c: I2C, delay: D, address: u8) -> Result<Self, Error> {
        let mut enc = Self {
            i2c,
            delay,
            address,
        };

        enc.write(STATUS_BASE, STATUS_SWRST, &[0xFF])?;
        enc.delay.delay_ms(SEESAW_RESET_DELAY_MS);

        let mut hw_id = [0u8; 1];
        enc.read(STATUS_BASE, STATUS_HW_ID, &mut hw_id)?;
        if !KNOWN_HW_IDS.contains(&hw_id[0]) {
            return Err(Error::EncoderNotFound { hw_id: hw_id[0] });
        }

        let product = enc.product_code()?;
        if product != ENCODER_PRODUCT_CODE {
            return Err(Error::UnexpectedFirmware { product });
        }

        let mask = (1u32 << ENCODER_BUTTON_PIN).to_be_bytes();
        enc.write(GPIO_BASE, GPIO_DIRCLR_BULK, &mask)?;
        enc.write(GPIO_BASE, GPIO_PULLENSET, &mask)?;
        enc.write(GPIO_BASE, GPIO_BULK_SET, &mask)?;

        Ok(enc)
    }

    /// Product code from the upper half of the VERSION register.
    pub fn product_code(&mut self) -> Result<u16, Error> {
        let mut buf = [0u8; 4];
        self.read(STATUS_BASE, STATUS_VERSION, &mut buf)?;
        Ok((u32::from_be_bytes(buf) >> 16) as u16)
    }

    /// `true` while the knob is pushed (the switch pulls the pin low).
    pub fn pressed(&mut self) -> Result<bool, Error> {
        let mut buf = [0u8; 4];
        self.read(GPIO_BASE, GPIO_BULK, &mut buf)?;
        Ok(u32::from_be_bytes(buf) & (1 << ENCODER_BUTTON_PIN) == 0)
    }

    /// Rotation since the last call; reading clears the accumulator.
    pub fn delta(&mut self) -> Result<i32, Error> {
        let mut buf = [0u8; 4];
        self.read(ENCODER_BASE, ENCODER_DELTA, &mut buf)?;
        Ok(i32::from_be_bytes(buf))
    }

    /// Give the bus and delay back.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn read(&mut self, base: u8, function: u8, buf: &mut [u8]) -> Result<(), Error> {
        self.i2c
            .write(self.address, &[base, function])
            .map_err(Error::from_i2c)?;
        self.delay.delay_us(SEESAW_READ_DELAY_US);
        self.i2c.read(self.address, buf).map_err(Error::from_i2c)
    }

    fn write(&mut self, base: u8, function: u8, data: &[u8]) -> Result<(), Error> {
        let mut frame = [0u8; 6];
        let len = 2 + data.len();
        frame[0] = base;
        frame[1] = function;
        frame[2..len].copy_from_slice(data);
        self.i2c
            .write(self.address, &frame[..len])
            .map_err(Error::from_i2c)
    }
}

impl<I2C: I2c, D: DelayNs> Encoder for SeesawEncoder<I2C, D> {
    fn poll(&mut self) -> Result<EncoderReading, Error> {
        let pressed = self.pressed()?;
        let delta = self.delta()?;
        Ok(EncoderReading { delta, pressed })
    }
}
