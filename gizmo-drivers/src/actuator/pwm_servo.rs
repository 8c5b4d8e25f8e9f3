//! Hobby servo on a PWM channel
//!
//! The servo position is set by the high time of a fixed-period pulse
//! train (50 Hz, 20 ms). The PWM peripheral must already be configured for
//! that period; this driver only maps pulse widths to duty cycles.
//!
//! ```ignore
//! let pwm = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, cfg);
//! let mut servo = PwmServo::new(pwm, ServoCalibration::default())?;
//! servo.set_pulse_width(PulseWidth::from_micros(1600))?;
//! ```

use embedded_hal::pwm::SetDutyCycle;
use gizmo_core::motion::PulseWidth;
use gizmo_core::traits::{ActuatorError, ServoActuator};

/// Servo timing calibration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServoCalibration {
    /// PWM period in microseconds
    pub period_us: u32,
    /// Shortest pulse the servo accepts
    pub min_us: u16,
    /// Longest pulse the servo accepts
    pub max_us: u16,
}

impl Default for ServoCalibration {
    fn default() -> Self {
        Self {
            period_us: 20_000,
            min_us: 500,
            max_us: 2_500,
        }
    }
}

impl ServoCalibration {
    /// Check that the calibration describes a drivable servo
    pub fn validate(&self) -> Result<(), ActuatorError> {
        if self.period_us == 0 || self.min_us >= self.max_us || u32::from(self.max_us) > self.period_us
        {
            return Err(ActuatorError::InitFailed);
        }
        Ok(())
    }

    /// Check if a pulse width lies in the calibrated range
    pub fn accepts(&self, width: PulseWidth) -> bool {
        (self.min_us..=self.max_us).contains(&width.as_micros())
    }
}

/// Servo driven through an `embedded-hal` PWM channel
pub struct PwmServo<P> {
    pwm: P,
    calibration: ServoCalibration,
    /// Last commanded setpoint
    current: Option<PulseWidth>,
}

impl<P: SetDutyCycle> PwmServo<P> {
    /// Configure the servo
    ///
    /// Fails with [`ActuatorError::InitFailed`] on an invalid calibration
    /// or a PWM channel without duty resolution.
    pub fn new(pwm: P, calibration: ServoCalibration) -> Result<Self, ActuatorError> {
        calibration.validate()?;
        if pwm.max_duty_cycle() == 0 {
            return Err(ActuatorError::InitFailed);
        }
        Ok(Self {
            pwm,
            calibration,
            current: None,
        })
    }

    /// Last commanded setpoint
    pub fn current(&self) -> Option<PulseWidth> {
        self.current
    }

    /// Calibration in use
    pub fn calibration(&self) -> &ServoCalibration {
        &self.calibration
    }

    /// Duty cycle (in PWM ticks) producing `width`
    pub fn duty_for(&self, width: PulseWidth) -> u16 {
        let max_duty = u64::from(self.pwm.max_duty_cycle());
        let duty = max_duty * u64::from(width.as_micros()) / u64::from(self.calibration.period_us);
        duty.min(max_duty) as u16
    }
}

impl<P: SetDutyCycle> ServoActuator for PwmServo<P> {
    fn set_pulse_width(&mut self, width: PulseWidth) -> Result<(), ActuatorError> {
        if !self.calibration.accepts(width) {
            return Err(ActuatorError::OutOfRange);
        }
        let duty = self.duty_for(width);
        self.pwm
            .set_duty_cycle(duty)
            .map_err(|_| ActuatorError::Pwm)?;
        self.current = Some(width);
        Ok(())
    }
}
