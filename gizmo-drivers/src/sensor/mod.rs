//! Sensor drivers

pub mod bme280;
pub mod ultrasonic;

pub use self::bme280::Bme280Sensor;
pub use ultrasonic::{sample_from_cm, sample_from_measurement, MAX_RANGE_CM};
