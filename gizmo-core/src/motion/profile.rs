//! Eased servo motion profile
//!
//! Instead of jumping straight to a rest position, the servo is walked
//! there in small pulse-width increments with a short sleep between each.
//! The result is a decelerated arrival without bounce at the end stop.

use core::iter::FusedIterator;

/// Servo setpoint as a pulse width in microseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseWidth(u16);

impl PulseWidth {
    /// Create a setpoint from microseconds
    pub const fn from_micros(us: u16) -> Self {
        Self(us)
    }

    /// Pulse width in microseconds
    pub const fn as_micros(self) -> u16 {
        self.0
    }
}

/// Monotonic setpoint sequence from one extreme toward another
///
/// Yields `from` first and `to` last, moving by at most `step` µs between
/// consecutive values. The final step is shortened when `step` does not
/// divide the distance, so the sequence never overshoots.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionProfile {
    /// Next value to emit (None once `to` has been emitted)
    next: Option<u16>,
    /// Final setpoint
    to: u16,
    /// Increment per element in µs (never zero)
    step: u16,
    /// Sleep before applying each element
    interval_ms: u32,
}

/// Generate an eased profile from `from` to `to`
///
/// A zero `step_us` is treated as 1 µs.
pub fn generate(from: PulseWidth, to: PulseWidth, step_us: u16, interval_ms: u32) -> MotionProfile {
    MotionProfile::new(from, to, step_us, interval_ms)
}

impl MotionProfile {
    /// Create a profile; see [`generate`]
    pub fn new(from: PulseWidth, to: PulseWidth, step_us: u16, interval_ms: u32) -> Self {
        Self {
            next: Some(from.0),
            to: to.0,
            step: step_us.max(1),
            interval_ms,
        }
    }

    /// Sleep between consecutive setpoints in milliseconds
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Check if every setpoint has been emitted
    pub fn is_finished(&self) -> bool {
        self.next.is_none()
    }

    /// Number of setpoints still to be emitted
    pub fn remaining(&self) -> usize {
        match self.next {
            Some(current) => usize::from(current.abs_diff(self.to).div_ceil(self.step)) + 1,
            None => 0,
        }
    }
}

impl Iterator for MotionProfile {
    type Item = PulseWidth;

    fn next(&mut self) -> Option<PulseWidth> {
        let current = self.next?;

        self.next = if current == self.to {
            None
        } else if current > self.to {
            Some(current.saturating_sub(self.step).max(self.to))
        } else {
            Some(current.saturating_add(self.step).min(self.to))
        };

        Some(PulseWidth(current))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for MotionProfile {}

impl FusedIterator for MotionProfile {}
