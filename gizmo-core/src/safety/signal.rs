//! Blink patterns and startup failure handling

use embedded_hal::delay::DelayNs;
use gizmo_hal::OutputPin;

use crate::state::FaultKind;
use crate::traits::ClimateSensor;

/// On/off blink timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkPattern {
    /// Time lit per cycle (ms)
    pub on_ms: u32,
    /// Time dark per cycle (ms)
    pub off_ms: u32,
}

impl BlinkPattern {
    /// Unrecoverable failure: even 500 ms on / 500 ms off, forever
    pub const FATAL: Self = Self::new(500, 500);

    /// Waiting for a sensor: short pulse, long pause, until it answers
    pub const SENSOR_WAIT: Self = Self::new(250, 1000);

    pub const fn new(on_ms: u32, off_ms: u32) -> Self {
        Self { on_ms, off_ms }
    }

    /// Length of one on/off cycle
    pub const fn period_ms(&self) -> u32 {
        self.on_ms + self.off_ms
    }
}

/// Failures that can happen before the gadget enters its main loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartupFailure {
    /// Servo could not be configured; terminal
    ActuatorInit,
    /// Climate sensor is not answering yet; retried
    SensorNotResponding,
}

impl StartupFailure {
    /// Check if the failure halts the device for good
    pub fn is_fatal(&self) -> bool {
        matches!(self, StartupFailure::ActuatorInit)
    }

    /// Blink pattern that reports this failure
    pub fn pattern(&self) -> BlinkPattern {
        if self.is_fatal() {
            BlinkPattern::FATAL
        } else {
            BlinkPattern::SENSOR_WAIT
        }
    }
}

impl From<FaultKind> for StartupFailure {
    fn from(kind: FaultKind) -> Self {
        match kind {
            FaultKind::ActuatorInit => StartupFailure::ActuatorInit,
        }
    }
}

/// Play one on/off cycle of `pattern`, leaving the indicator off
pub fn blink_cycle<L: OutputPin, D: DelayNs>(led: &mut L, delay: &mut D, pattern: BlinkPattern) {
    led.set_high();
    delay.delay_ms(pattern.on_ms);
    led.set_low();
    delay.delay_ms(pattern.off_ms);
}

/// Block until the climate sensor answers
///
/// Blinks [`BlinkPattern::SENSOR_WAIT`] between connectivity checks and
/// returns how many checks failed before the sensor showed up.
pub fn wait_until_ready<S, L, D>(sensor: &mut S, led: &mut L, delay: &mut D) -> u32
where
    S: ClimateSensor,
    L: OutputPin,
    D: DelayNs,
{
    let mut failed = 0u32;
    while !sensor.connected() {
        failed = failed.saturating_add(1);
        blink_cycle(led, delay, StartupFailure::SensorNotResponding.pattern());
    }
    led.set_low();
    failed
}

/// Signal a fatal fault forever
pub fn halt<L: OutputPin, D: DelayNs>(led: &mut L, delay: &mut D, kind: FaultKind) -> ! {
    let pattern = StartupFailure::from(kind).pattern();
    loop {
        blink_cycle(led, delay, pattern);
    }
}
