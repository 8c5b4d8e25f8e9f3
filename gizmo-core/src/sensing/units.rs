//! Temperature and humidity unit conversion
//!
//! Sensors report fixed-point milli-units. Conversion truncates to whole
//! degrees Celsius first and only then scales to Fahrenheit, so a reading
//! of exactly 25.000°C always shows as 77°F.

use core::fmt::Write;

use heapless::String;

/// Short display label
pub type Label = String<16>;

/// Temperature display unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TemperatureUnit {
    Celsius,
    #[default]
    Fahrenheit,
}

impl TemperatureUnit {
    /// Unit from the shared "show Celsius" flag
    pub const fn from_celsius_flag(use_celsius: bool) -> Self {
        if use_celsius {
            TemperatureUnit::Celsius
        } else {
            TemperatureUnit::Fahrenheit
        }
    }

    /// Single-letter symbol shown next to the value
    pub const fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        }
    }

    /// Convert a milli-degree Celsius reading to this unit
    pub const fn convert(self, raw_milli_c: i32) -> i32 {
        match self {
            TemperatureUnit::Celsius => to_celsius(raw_milli_c),
            TemperatureUnit::Fahrenheit => to_fahrenheit(raw_milli_c),
        }
    }
}

/// Whole degrees Celsius, truncated toward zero
pub const fn to_celsius(raw_milli_c: i32) -> i32 {
    raw_milli_c / 1000
}

/// Whole degrees Fahrenheit: `floor(celsius * 1.8) + 32`
pub const fn to_fahrenheit(raw_milli_c: i32) -> i32 {
    (to_celsius(raw_milli_c) * 18).div_euclid(10) + 32
}

/// Whole percent relative humidity, truncated
pub const fn humidity_percent(raw_milli_percent: i32) -> i32 {
    raw_milli_percent / 1000
}

/// Temperature value text (no unit), e.g. `"77"`
pub fn format_temperature(raw_milli_c: i32, unit: TemperatureUnit) -> Result<Label, core::fmt::Error> {
    let mut label = Label::new();
    write!(label, "{}", unit.convert(raw_milli_c))?;
    Ok(label)
}

/// Humidity line text, e.g. `"55% H"`
pub fn format_humidity(raw_milli_percent: i32) -> Result<Label, core::fmt::Error> {
    let mut label = Label::new();
    write!(label, "{}% H", humidity_percent(raw_milli_percent))?;
    Ok(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_celsius() {
        assert_eq!(to_celsius(25_000), 25);
        assert_eq!(to_celsius(25_999), 25);
        assert_eq!(to_celsius(-3_500), -3);
    }

    #[test]
    fn test_fahrenheit() {
        assert_eq!(to_fahrenheit(25_000), 77);
        assert_eq!(to_fahrenheit(0), 32);
        assert_eq!(to_fahrenheit(100_000), 212);
        // Truncate first: 25.9°C is 25°C is 77°F, not 78.6°F
        assert_eq!(to_fahrenheit(25_900), 77);
        // floor(-3 * 1.8) = floor(-5.4) = -6
        assert_eq!(to_fahrenheit(-3_500), 26);
    }

    #[test]
    fn test_humidity() {
        assert_eq!(humidity_percent(55_230), 55);
        assert_eq!(format_humidity(55_230).unwrap().as_str(), "55% H");
        assert_eq!(format_humidity(0).unwrap().as_str(), "0% H");
    }

    #[test]
    fn test_format_temperature() {
        assert_eq!(
            format_temperature(25_000, TemperatureUnit::Celsius).unwrap().as_str(),
            "25"
        );
        assert_eq!(
            format_temperature(25_000, TemperatureUnit::Fahrenheit).unwrap().as_str(),
            "77"
        );
        assert_eq!(
            format_temperature(-40_000, TemperatureUnit::Fahrenheit).unwrap().as_str(),
            "-40"
        );
    }

    #[test]
    fn test_unit_flag() {
        assert_eq!(TemperatureUnit::from_celsius_flag(true), TemperatureUnit::Celsius);
        assert_eq!(TemperatureUnit::from_celsius_flag(false).symbol(), "F");
        assert_eq!(TemperatureUnit::default(), TemperatureUnit::Fahrenheit);
    }

    proptest! {
        #[test]
        fn prop_fahrenheit_is_monotonic(a in -200_000i32..200_000, b in -200_000i32..200_000) {
            if a <= b {
                prop_assert!(to_fahrenheit(a) <= to_fahrenheit(b));
            }
        }

        #[test]
        fn prop_fahrenheit_matches_float_formula(raw in -200_000i32..200_000) {
            let c = to_celsius(raw);
            let expected = (c as f64 * 1.8).floor() as i32 + 32;
            prop_assert_eq!(to_fahrenheit(raw), expected);
        }
    }
}
