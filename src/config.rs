//! Application-wide constants and compile-time configuration.
//!
//! All bus addresses, timing parameters, and UI limits live here so they
//! can be tuned in one place.

// Event loop

/// Poll interval of the event loop (ms). 33 ms ≈ 30 Hz so the knob feels responsive.
pub const POLL_INTERVAL_MS: u64 = 33;

/// Reading screens are redrawn every Nth poll (3 × 33 ms ≈ 10 Hz) to
/// reduce flicker on the terminal.
pub const READING_REFRESH_DIVIDER: u8 = 3;

// Proximity threshold

/// Lowest accepted proximity threshold.
pub const THRESHOLD_MIN: u16 = 2;

/// Highest accepted proximity threshold.
pub const THRESHOLD_MAX: u16 = 60;

/// Threshold in effect at power-up.
///
/// Rough distances for the VCNL4040 with default LED current:
/// 2 ≈ 150..200 mm, 4 ≈ 110..130 mm, 8 ≈ 80..85 mm, 60 ≈ 10 mm.
pub const THRESHOLD_DEFAULT: u16 = 4;

// Seesaw rotary encoder (Adafruit I²C QT Rotary Encoder)

/// 7-bit I²C address of the seesaw encoder board.
pub const ENCODER_I2C_ADDR: u8 = 0x36;

/// Product code reported in the upper half of the seesaw VERSION register.
pub const ENCODER_PRODUCT_CODE: u16 = 4991;

/// Seesaw GPIO wired to the knob push switch (active-low).
pub const ENCODER_BUTTON_PIN: u8 = 24;

/// Time the seesaw needs between a register select and the data read (µs).
pub const SEESAW_READ_DELAY_US: u32 = 250;

/// Time to wait after a seesaw software reset (ms).
pub const SEESAW_RESET_DELAY_MS: u32 = 500;

// VCNL4040 proximity / ambient light sensor

/// 7-bit I²C address of the VCNL4040 (fixed by the part).
pub const SENSOR_I2C_ADDR: u8 = 0x60;

/// Ambient light integration time used at init.
pub const SENSOR_ALS_INTEGRATION: crate::sensors::vcnl4040::AlsIntegration =
    crate::sensors::vcnl4040::AlsIntegration::Ms80;

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0001;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "prox-menu";
pub const USB_PRODUCT: &str = "Prox Sensor Encoder Menu";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// CDC-ACM bulk endpoint packet size.
pub const USB_CDC_PACKET_SIZE: u16 = 64;

/// Largest console frame (header line plus the main-menu line).
pub const FRAME_CAPACITY: usize = 192;

/// Bytes buffered between the event loop and the USB serial writer.
/// Holds at least two full frames.
pub const CONSOLE_PIPE_SIZE: usize = 512;

// Board pin assignments (Adafruit Feather nRF52840 Express)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your board.
//
//   I²C SDA (STEMMA QT) → P0.12
//   I²C SCL (STEMMA QT) → P0.11
//   Indicator LED (D3)  → P1.15
