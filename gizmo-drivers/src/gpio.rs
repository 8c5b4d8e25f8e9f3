//! GPIO adapters
//!
//! Wraps `embedded-hal` digital pins with an infallible error type and
//! applies optional inversion, so the core can always treat "high" as
//! "asserted".

use core::convert::Infallible;

use embedded_hal::digital;
use gizmo_hal::{InputPin, OutputPin};

/// Pin polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Asserted = electrically high
    #[default]
    ActiveHigh,
    /// Asserted = electrically low (e.g. LED wired to VCC)
    ActiveLow,
}

fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// Digital output adapter
pub struct GpioOutput<P> {
    pin: P,
    polarity: Polarity,
    /// Logical state (true = asserted)
    asserted: bool,
}

impl<P: digital::OutputPin<Error = Infallible>> GpioOutput<P> {
    /// Create an output and deassert it
    pub fn new(pin: P, polarity: Polarity) -> Self {
        let mut output = Self {
            pin,
            polarity,
            asserted: true,
        };
        output.set_low();
        output
    }

    /// Create an active-high output
    pub fn active_high(pin: P) -> Self {
        Self::new(pin, Polarity::ActiveHigh)
    }

    /// Create an active-low output
    pub fn active_low(pin: P) -> Self {
        Self::new(pin, Polarity::ActiveLow)
    }

    /// Release the underlying pin
    pub fn into_inner(self) -> P {
        self.pin
    }

    fn drive(&mut self, asserted: bool) {
        self.asserted = asserted;
        let electrical_high = asserted == (self.polarity == Polarity::ActiveHigh);
        if electrical_high {
            infallible(self.pin.set_high());
        } else {
            infallible(self.pin.set_low());
        }
    }
}

impl<P: digital::OutputPin<Error = Infallible>> OutputPin for GpioOutput<P> {
    fn set_high(&mut self) {
        self.drive(true);
    }

    fn set_low(&mut self) {
        self.drive(false);
    }

    fn is_set_high(&self) -> bool {
        self.asserted
    }
}

/// Digital input adapter
pub struct GpioInput<P> {
    pin: P,
    polarity: Polarity,
}

impl<P: digital::InputPin<Error = Infallible>> GpioInput<P> {
    pub fn new(pin: P, polarity: Polarity) -> Self {
        Self { pin, polarity }
    }

    /// Pressed = electrically high (pull-down button)
    pub fn active_high(pin: P) -> Self {
        Self::new(pin, Polarity::ActiveHigh)
    }

    /// Pressed = electrically low (pull-up button)
    pub fn active_low(pin: P) -> Self {
        Self::new(pin, Polarity::ActiveLow)
    }
}

impl<P: digital::InputPin<Error = Infallible>> InputPin for GpioInput<P> {
    fn is_high(&mut self) -> bool {
        let electrical_high = infallible(self.pin.is_high());
        electrical_high == (self.polarity == Polarity::ActiveHigh)
    }
}
