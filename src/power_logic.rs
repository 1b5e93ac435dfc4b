//! Display power toggle driven by the power button.

use embedded_hal::digital::OutputPin;

/// Backlight line owner. Starts with the panel on.
pub struct DisplayPower<P> {
    pin: P,
    on: bool,
}

impl<P: OutputPin> DisplayPower<P> {
    /// Takes the line and drives it high. A write error leaves the state as
    /// requested; the next toggle retries the line.
    pub fn new(mut pin: P) -> Self {
        let _ = pin.set_high();
        Self { pin, on: true }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Flip the panel power and return the new state.
    pub fn toggle(&mut self) -> bool {
        self.on = !self.on;
        let _ = if self.on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        #[cfg(feature = "defmt")]
        defmt::info!("Display power: {}", if self.on { "on" } else { "off" });
        self.on
    }

    pub fn release(self) -> P {
        self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    #[derive(Default)]
    struct Line {
        high: bool,
        writes: u32,
    }

    impl ErrorType for Line {
        type Error = Infallible;
    }

    impl OutputPin for Line {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            self.writes += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            self.writes += 1;
            Ok(())
        }
    }

    #[test]
    fn starts_on() {
        let power = DisplayPower::new(Line::default());
        assert!(power.is_on());
        assert!(power.release().high);
    }

    #[test]
    fn toggle_flips_line() {
        let mut power = DisplayPower::new(Line::default());
        assert!(!power.toggle());
        assert!(power.toggle());
        assert!(!power.toggle());
        let line = power.release();
        assert!(!line.high);
        assert_eq!(line.writes, 4);
    }
}
