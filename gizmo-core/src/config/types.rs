//! Configuration type definitions
//!
//! Defaults match the stock gadget wiring and timings. Every timing
//! constant the firmware uses is reachable from here.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::motion::PulseWidth;

use super::parse::ParseError;

/// Activation distance in centimeters
pub const DEFAULT_THRESHOLD_CM: u16 = 40;

/// Arm-at-rest pulse width in microseconds
pub const DEFAULT_HAND_DOWN_US: u16 = 640;

/// Arm-raised pulse width in microseconds
pub const DEFAULT_HAND_UP_US: u16 = 1600;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `device.toml` could not be parsed
    Parse(ParseError),
    /// `hand_down_us` must be below `hand_up_us`
    InvalidPulseRange,
    /// Easing step must be at least 1 µs
    ZeroEaseStep,
    /// A period or interval is zero
    ZeroPeriod,
}

impl From<ParseError> for ConfigError {
    fn from(e: ParseError) -> Self {
        ConfigError::Parse(e)
    }
}

/// High-five arm configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActuationConfig {
    /// Objects at or closer than this fire the trigger (cm)
    pub threshold_cm: u16,
    /// Rest position pulse width (µs)
    pub hand_down_us: u16,
    /// Raised position pulse width (µs)
    pub hand_up_us: u16,
    /// Delay between trigger and raising the arm (ms)
    pub arm_delay_ms: u32,
    /// Time held at the raised position (ms)
    pub dwell_ms: u32,
    /// Idle time after the arm is back at rest before re-arming (ms)
    pub cooldown_ms: u32,
    /// Pulse width change per easing step (µs)
    pub ease_step_us: u16,
    /// Sleep between easing steps (ms)
    pub ease_interval_ms: u32,
    /// Distance sensor polling interval while idle (ms)
    pub poll_interval_ms: u32,
}

impl Default for ActuationConfig {
    fn default() -> Self {
        Self {
            threshold_cm: DEFAULT_THRESHOLD_CM,
            hand_down_us: DEFAULT_HAND_DOWN_US,
            hand_up_us: DEFAULT_HAND_UP_US,
            arm_delay_ms: 500,
            dwell_ms: 250,
            cooldown_ms: 1000,
            ease_step_us: 10,
            ease_interval_ms: 5,
            poll_interval_ms: 60,
        }
    }
}

impl ActuationConfig {
    /// Rest setpoint
    pub fn hand_down(&self) -> PulseWidth {
        PulseWidth::from_micros(self.hand_down_us)
    }

    /// Raised setpoint
    pub fn hand_up(&self) -> PulseWidth {
        PulseWidth::from_micros(self.hand_up_us)
    }

    /// Check the configuration for values the controller cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hand_down_us >= self.hand_up_us {
            return Err(ConfigError::InvalidPulseRange);
        }
        if self.ease_step_us == 0 {
            return Err(ConfigError::ZeroEaseStep);
        }
        if self.ease_interval_ms == 0 || self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        Ok(())
    }
}

/// Temperature display configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClimateConfig {
    /// Sensor read + display refresh period (ms)
    pub sense_period_ms: u32,
    /// Button polling period (ms)
    pub button_poll_ms: u32,
    /// Hold after an accepted press before polling again (ms)
    pub debounce_hold_ms: u32,
    /// Unit shown at power-on
    pub start_in_celsius: bool,
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            sense_period_ms: 500,
            button_poll_ms: 50,
            debounce_hold_ms: 500,
            start_in_celsius: false,
        }
    }
}

impl ClimateConfig {
    /// Check the configuration for values the tasks cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sense_period_ms == 0 || self.button_poll_ms == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        Ok(())
    }
}

/// Complete device configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceConfig {
    pub actuation: ActuationConfig,
    pub climate: ClimateConfig,
}

impl DeviceConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.actuation.validate()?;
        self.climate.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = DeviceConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.actuation.hand_up().as_micros(), 1600);
        assert_eq!(config.actuation.hand_down().as_micros(), 640);
    }

    #[test]
    fn test_inverted_pulse_range() {
        let config = ActuationConfig {
            hand_down_us: 1600,
            hand_up_us: 640,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidPulseRange));
    }

    #[test]
    fn test_zero_step() {
        let config = ActuationConfig {
            ease_step_us: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroEaseStep));
    }

    #[test]
    fn test_zero_periods() {
        let climate = ClimateConfig {
            button_poll_ms: 0,
            ..Default::default()
        };
        assert_eq!(climate.validate(), Err(ConfigError::ZeroPeriod));

        let actuation = ActuationConfig {
            ease_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(actuation.validate(), Err(ConfigError::ZeroPeriod));
    }
}
