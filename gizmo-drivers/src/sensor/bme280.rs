//! BME280 temperature/humidity sensor
//!
//! One bus measurement yields both values. A temperature read performs a
//! measurement and keeps its humidity for the following humidity read, so
//! the pair the display shows comes from the same sample.

use bme280::i2c::BME280;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use gizmo_core::traits::{ClimateSensor, SensorError};

/// Operating range of the BME280
const TEMPERATURE_RANGE_C: core::ops::RangeInclusive<f32> = -40.0..=85.0;
const HUMIDITY_RANGE_PERCENT: core::ops::RangeInclusive<f32> = 0.0..=100.0;

/// Degrees Celsius to milli-degrees
pub fn milli_celsius(celsius: f32) -> Result<i32, SensorError> {
    to_milli(celsius, TEMPERATURE_RANGE_C)
}

/// Percent relative humidity to milli-percent
pub fn milli_percent(percent: f32) -> Result<i32, SensorError> {
    to_milli(percent, HUMIDITY_RANGE_PERCENT)
}

fn to_milli(value: f32, range: core::ops::RangeInclusive<f32>) -> Result<i32, SensorError> {
    if !range.contains(&value) {
        return Err(SensorError::OutOfRange);
    }
    Ok((value * 1000.0) as i32)
}

/// BME280 on I2C
pub struct Bme280Sensor<I2C, D> {
    device: BME280<I2C>,
    delay: D,
    initialized: bool,
    /// Humidity from the last temperature read, not yet consumed
    pending_humidity: Option<Result<i32, SensorError>>,
}

impl<I2C: I2c, D: DelayNs> Bme280Sensor<I2C, D> {
    /// Sensor at the primary address (0x76)
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self {
            device: BME280::new_primary(i2c),
            delay,
            initialized: false,
            pending_humidity: None,
        }
    }

    fn measure(&mut self) -> Result<(Result<i32, SensorError>, Result<i32, SensorError>), SensorError> {
        if !self.initialized {
            return Err(SensorError::NotResponding);
        }
        let m = self
            .device
            .measure(&mut self.delay)
            .map_err(|_| SensorError::Bus)?;
        Ok((milli_celsius(m.temperature), milli_percent(m.humidity)))
    }
}

impl<I2C: I2c, D: DelayNs> ClimateSensor for Bme280Sensor<I2C, D> {
    /// Initializes the chip on first success; later calls are free
    fn connected(&mut self) -> bool {
        if !self.initialized {
            self.initialized = self.device.init(&mut self.delay).is_ok();
        }
        self.initialized
    }

    fn read_temperature_milli(&mut self) -> Result<i32, SensorError> {
        let (temperature, humidity) = self.measure()?;
        self.pending_humidity = Some(humidity);
        temperature
    }

    fn read_humidity_milli(&mut self) -> Result<i32, SensorError> {
        match self.pending_humidity.take() {
            Some(humidity) => humidity,
            None => self.measure()?.1,
        }
    }
}
