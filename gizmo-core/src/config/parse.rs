//! Minimal TOML parser for `device.toml`
//!
//! Handles only the subset the device configuration needs. It does NOT
//! support the full TOML grammar.
//!
//! Supported:
//! - `[actuation]` and `[climate]` section headers
//! - `key = value` pairs with integer (optionally `_`-separated) or boolean values
//! - Comments (`# ...`), full-line and trailing
//!
//! Keys missing from the file keep their default values. Unknown sections
//! and keys are rejected so that typos do not silently fall back.

use super::types::{ActuationConfig, ClimateConfig, ConfigError, DeviceConfig};

/// What went wrong on a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseErrorKind {
    /// Section header is not one of the known sections
    InvalidSection,
    /// Line is neither a header nor `key = value`
    MissingEquals,
    /// Key is not known in the current section
    UnknownKey,
    /// Key appears before any section header
    KeyOutsideSection,
    /// Value has the wrong type or does not fit the field
    InvalidValue,
}

/// Parse error with the 1-based line number it occurred on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Actuation,
    Climate,
}

/// Parse `device.toml` text into a [`DeviceConfig`]
///
/// The result is not validated; use [`load_config`] for that.
pub fn parse_config(input: &str) -> Result<DeviceConfig, ParseError> {
    let mut config = DeviceConfig::default();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line_no = index as u32 + 1;
        let fail = |kind: ParseErrorKind| ParseError {
            kind,
            line: line_no,
        };

        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            section = match name.trim() {
                "actuation" => Section::Actuation,
                "climate" => Section::Climate,
                _ => return Err(fail(ParseErrorKind::InvalidSection)),
            };
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .ok_or(fail(ParseErrorKind::MissingEquals))?;
        let key = key.trim();
        let value = value.trim();

        let applied = match section {
            Section::Root => Err(ParseErrorKind::KeyOutsideSection),
            Section::Actuation => apply_actuation(&mut config.actuation, key, value),
            Section::Climate => apply_climate(&mut config.climate, key, value),
        };
        applied.map_err(fail)?;
    }

    Ok(config)
}

/// Parse and validate `device.toml` text
pub fn load_config(input: &str) -> Result<DeviceConfig, ConfigError> {
    let config = parse_config(input)?;
    config.validate()?;
    Ok(config)
}

fn apply_actuation(
    config: &mut ActuationConfig,
    key: &str,
    value: &str,
) -> Result<(), ParseErrorKind> {
    match key {
        "threshold_cm" => config.threshold_cm = parse_int(value)?,
        "hand_down_us" => config.hand_down_us = parse_int(value)?,
        "hand_up_us" => config.hand_up_us = parse_int(value)?,
        "arm_delay_ms" => config.arm_delay_ms = parse_int(value)?,
        "dwell_ms" => config.dwell_ms = parse_int(value)?,
        "cooldown_ms" => config.cooldown_ms = parse_int(value)?,
        "ease_step_us" => config.ease_step_us = parse_int(value)?,
        "ease_interval_ms" => config.ease_interval_ms = parse_int(value)?,
        "poll_interval_ms" => config.poll_interval_ms = parse_int(value)?,
        _ => return Err(ParseErrorKind::UnknownKey),
    }
    Ok(())
}

fn apply_climate(config: &mut ClimateConfig, key: &str, value: &str) -> Result<(), ParseErrorKind> {
    match key {
        "sense_period_ms" => config.sense_period_ms = parse_int(value)?,
        "button_poll_ms" => config.button_poll_ms = parse_int(value)?,
        "debounce_hold_ms" => config.debounce_hold_ms = parse_int(value)?,
        "start_in_celsius" => config.start_in_celsius = parse_bool(value)?,
        _ => return Err(ParseErrorKind::UnknownKey),
    }
    Ok(())
}

/// Cut a trailing `# comment`
///
/// No string values are supported, so a `#` always starts a comment.
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Parse an unsigned integer that may contain `_` separators
fn parse_int<T: TryFrom<u64>>(value: &str) -> Result<T, ParseErrorKind> {
    if value.is_empty() || value.starts_with('_') || value.ends_with('_') {
        return Err(ParseErrorKind::InvalidValue);
    }
    let mut acc: u64 = 0;
    for c in value.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(10).ok_or(ParseErrorKind::InvalidValue)?;
        acc = acc
            .checked_mul(10)
            .and_then(|a| a.checked_add(u64::from(digit)))
            .ok_or(ParseErrorKind::InvalidValue)?;
    }
    T::try_from(acc).map_err(|_| ParseErrorKind::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ParseErrorKind> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseErrorKind::InvalidValue),
    }
}
