//! Climate sensor trait

/// Errors that can occur reading a sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor did not answer on the bus
    NotResponding,
    /// Bus transaction failed mid-read
    Bus,
    /// Reading out of the sensor's physical range
    OutOfRange,
    /// Ultrasonic echo never returned
    Timeout,
}

/// Trait for combined temperature/humidity sensors
///
/// Readings are fixed-point integers:
/// - temperature in milli-degrees Celsius (25.5°C is 25500)
/// - relative humidity in milli-percent (55.23% is 55230)
///
/// Takes `&mut self` because bus reads require mutable access.
pub trait ClimateSensor {
    /// Check whether the sensor answers on the bus
    fn connected(&mut self) -> bool;

    /// Read the temperature in milli-degrees Celsius
    fn read_temperature_milli(&mut self) -> Result<i32, SensorError>;

    /// Read the relative humidity in milli-percent
    fn read_humidity_milli(&mut self) -> Result<i32, SensorError>;
}
