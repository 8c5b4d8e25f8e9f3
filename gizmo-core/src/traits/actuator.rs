//! Servo actuator trait

use crate::motion::PulseWidth;

/// Errors that can occur driving a servo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorError {
    /// Driver could not be configured (bad calibration, PWM unavailable)
    InitFailed,
    /// Requested pulse width is outside the calibrated range
    OutOfRange,
    /// PWM peripheral rejected the duty cycle
    Pwm,
}

/// Trait for servo-class actuators positioned by pulse width
///
/// Construction is the `configure()` step: drivers return
/// `Err(ActuatorError::InitFailed)` from their constructor when the
/// hardware cannot be brought up, which sends the controller to `Fault`.
pub trait ServoActuator {
    /// Command the servo to a pulse width
    fn set_pulse_width(&mut self, width: PulseWidth) -> Result<(), ActuatorError>;
}

impl<T: ServoActuator + ?Sized> ServoActuator for &mut T {
    fn set_pulse_width(&mut self, width: PulseWidth) -> Result<(), ActuatorError> {
        (**self).set_pulse_width(width)
    }
}
