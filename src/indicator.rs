//! Proximity indicator LED.

use embedded_hal::digital::OutputPin;

use crate::error::Error;
use crate::ui::state::Threshold;

/// Decide whether the indicator should be lit for a proximity reading.
///
/// Independent of the active screen.
pub fn indicator_on(proximity: u16, threshold: Threshold) -> bool {
    proximity <= threshold.get()
}

/// Single on/off output.
pub trait Indicator {
    fn set(&mut self, on: bool) -> Result<(), Error>;
}

/// Indicator on a push-pull GPIO. `active_low` inverts the pin level.
pub struct LedIndicator<P> {
    pin: P,
    active_low: bool,
}

impl<P: OutputPin> LedIndicator<P> {
    pub fn new(pin: P, active_low: bool) -> Self {
        Self { pin, active_low }
    }
}

impl<P: OutputPin> Indicator for LedIndicator<P> {
    fn set(&mut self, on: bool) -> Result<(), Error> {
        let high = on != self.active_low;
        let res = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        res.map_err(|_| Error::Indicator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    #[derive(Default)]
    struct Pin {
        high: bool,
    }

    impl ErrorType for Pin {
        type Error = Infallible;
    }

    impl OutputPin for Pin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }
    }

    #[test]
    fn lit_at_or_below_threshold() {
        let t = Threshold::new(4);
        assert!(indicator_on(0, t));
        assert!(indicator_on(4, t));
        assert!(!indicator_on(5, t));
        assert!(!indicator_on(u16::MAX, t));
    }

    #[test]
    fn active_high_led_follows_state() {
        let mut led = LedIndicator::new(Pin::default(), false);
        led.set(true).unwrap();
        assert!(led.pin.high);
        led.set(false).unwrap();
        assert!(!led.pin.high);
    }

    #[test]
    fn active_low_led_is_inverted() {
        let mut led = LedIndicator::new(Pin::default(), true);
        led.set(true).unwrap();
        assert!(!led.pin.high);
        led.set(false).unwrap();
        assert!(led.pin.high);
    }
}
