//! GPIO pin abstractions
//!
//! Indicator LEDs and push buttons are driven through these traits.
//! Operations are infallible at this layer; adapters only accept pins whose
//! `embedded-hal` error type is `Infallible`.

/// Logical pin level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level == Level::High
    }
}

/// Digital output pin
///
/// "High" is the logical asserted state (LED lit). Adapters for active-low
/// hardware invert before touching the wire.
pub trait OutputPin {
    /// Assert the output (logic 1)
    fn set_high(&mut self);

    /// Deassert the output (logic 0)
    fn set_low(&mut self);

    /// Check if the pin is currently asserted
    fn is_set_high(&self) -> bool;

    /// Toggle the pin state
    fn toggle(&mut self) {
        if self.is_set_high() {
            self.set_low();
        } else {
            self.set_high();
        }
    }

    /// Set the pin to a specific level
    fn set_level(&mut self, level: Level) {
        match level {
            Level::High => self.set_high(),
            Level::Low => self.set_low(),
        }
    }

    /// Check if the pin is currently deasserted
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
///
/// Polled, not interrupt driven. Takes `&mut self` because sampling a pin
/// through `embedded-hal` 1.0 does.
pub trait InputPin {
    /// Check if the input is asserted (button pressed)
    fn is_high(&mut self) -> bool;

    /// Check if the input is deasserted
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }
}

impl<T: OutputPin + ?Sized> OutputPin for &mut T {
    fn set_high(&mut self) {
        (**self).set_high()
    }

    fn set_low(&mut self) {
        (**self).set_low()
    }

    fn is_set_high(&self) -> bool {
        (**self).is_set_high()
    }
}

impl<T: InputPin + ?Sized> InputPin for &mut T {
    fn is_high(&mut self) -> bool {
        (**self).is_high()
    }
}
