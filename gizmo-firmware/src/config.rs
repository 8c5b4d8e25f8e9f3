//! Device configuration
//!
//! `device.toml` is compiled into the image and parsed at boot by the
//! core's no_std parser. build.rs has already validated it; a rejection
//! here only happens if the two validators disagree.

use defmt::*;

use gizmo_core::config::{load_config, DeviceConfig};

/// Embedded configuration (compiled into firmware)
/// Edit device.toml and rebuild to customize
pub const EMBEDDED_CONFIG: &str = include_str!("../device.toml");

/// Load the embedded configuration, falling back to defaults
pub fn load() -> DeviceConfig {
    match load_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Configuration loaded: threshold={}cm, sense period={}ms",
                config.actuation.threshold_cm, config.climate.sense_period_ms
            );
            config
        }
        Err(e) => {
            error!("device.toml rejected: {:?}, using defaults", e);
            DeviceConfig::default()
        }
    }
}
