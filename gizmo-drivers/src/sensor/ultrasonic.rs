//! HC-SR04 distance readings
//!
//! The echo timing itself is done by the `hcsr04_async` crate in the
//! firmware. This module turns its floating point centimeters into
//! trigger samples and classifies the readings the sensor cannot produce.

use gizmo_core::sensing::SensorSample;
use gizmo_core::traits::SensorError;

/// Datasheet range of the HC-SR04
pub const MAX_RANGE_CM: f64 = 400.0;

/// Convert a distance in centimeters, truncating to whole centimeters
///
/// Negative, non-finite or out-of-range values are
/// [`SensorError::OutOfRange`].
pub fn sample_from_cm(distance_cm: f64) -> Result<SensorSample, SensorError> {
    if !distance_cm.is_finite() || !(0.0..=MAX_RANGE_CM).contains(&distance_cm) {
        return Err(SensorError::OutOfRange);
    }
    Ok(SensorSample::new(distance_cm as u16))
}

/// Convert a measurement result
///
/// A failed measurement means the echo never came back and is reported as
/// [`SensorError::Timeout`].
pub fn sample_from_measurement<E>(measurement: Result<f64, E>) -> Result<SensorSample, SensorError> {
    measurement
        .map_err(|_| SensorError::Timeout)
        .and_then(sample_from_cm)
}
