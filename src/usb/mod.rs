//! USB Device subsystem - presents a CDC-ACM serial port to the host.
//!
//! The nRF52840's built-in USB 2.0 Full-Speed controller is driven by
//! `embassy-usb`.  The device exposes a single serial interface that
//! carries the menu console.
//!
//! The event loop never waits on USB: it pushes console bytes into a
//! static pipe, and the console writer task drains the pipe into the
//! CDC bulk endpoint whenever a host is attached.

pub mod serial;
