//! Sensor-side logic
//!
//! Turns raw sensor readings into decisions (distance trigger) and into
//! display values (unit conversion).

pub mod trigger;
pub mod units;

pub use trigger::{should_activate, DistanceTrigger, SensorSample};
pub use units::{
    format_humidity, format_temperature, humidity_percent, to_celsius, to_fahrenheit, Label,
    TemperatureUnit,
};
