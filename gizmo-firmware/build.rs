//! Build script for gizmo-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates device.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Accepted range for each integer key, per section
const ACTUATION_KEYS: &[(&str, i64, i64)] = &[
    ("threshold_cm", 2, 400),
    ("hand_down_us", 500, 2500),
    ("hand_up_us", 500, 2500),
    ("arm_delay_ms", 0, 60_000),
    ("dwell_ms", 0, 60_000),
    ("cooldown_ms", 0, 600_000),
    ("ease_step_us", 1, 2000),
    ("ease_interval_ms", 1, 1000),
    ("poll_interval_ms", 1, 60_000),
];

const CLIMATE_KEYS: &[(&str, i64, i64)] = &[
    ("sense_period_ms", 1, 600_000),
    ("button_poll_ms", 1, 10_000),
    ("debounce_hold_ms", 0, 10_000),
];

const CLIMATE_BOOL_KEYS: &[&str] = &["start_in_celsius"];

/// Validate device.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=device.toml");

    let config_path = Path::new("device.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: device.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds device.toml as its configuration.           ║\n\
            ║  Please create one in the gizmo-firmware directory.              ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read device.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in device.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_section(&config, "actuation", ACTUATION_KEYS, &[], &mut errors);
    validate_section(&config, "climate", CLIMATE_KEYS, CLIMATE_BOOL_KEYS, &mut errors);
    validate_pulse_range(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid device configuration                             ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=device.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only the two known sections may appear; an absent one keeps its defaults
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        errors.push("device.toml must be a table".into());
        return;
    };

    for (key, value) in root {
        match key.as_str() {
            "actuation" | "climate" if value.is_table() => {}
            "actuation" | "climate" => errors.push(format!("[{}] must be a table", key)),
            _ => errors.push(format!("Unknown section or key '{}'", key)),
        }
    }
}

/// Check key names, integer ranges and boolean types in one section
fn validate_section(
    config: &toml::Value,
    section: &str,
    int_keys: &[(&str, i64, i64)],
    bool_keys: &[&str],
    errors: &mut Vec<String>,
) {
    let Some(table) = config.get(section).and_then(|s| s.as_table()) else {
        return;
    };

    for (key, value) in table {
        if let Some((_, min, max)) = int_keys.iter().find(|(name, _, _)| *name == key.as_str()) {
            match value {
                toml::Value::Integer(v) if (*min..=*max).contains(v) => {}
                toml::Value::Integer(_) => {
                    errors.push(format!("[{}] {} must be {}-{}", section, key, min, max))
                }
                _ => errors.push(format!("[{}] {} must be an integer", section, key)),
            }
        } else if bool_keys.contains(&key.as_str()) {
            if !value.is_bool() {
                errors.push(format!("[{}] {} must be true or false", section, key));
            }
        } else {
            errors.push(format!("[{}] unknown key '{}'", section, key));
        }
    }
}

/// The arm must rise: hand_down_us < hand_up_us
fn validate_pulse_range(config: &toml::Value, errors: &mut Vec<String>) {
    let get = |key: &str| {
        config
            .get("actuation")
            .and_then(|a| a.get(key))
            .and_then(|v| v.as_integer())
    };

    let down = get("hand_down_us").unwrap_or(640);
    let up = get("hand_up_us").unwrap_or(1600);
    if down >= up {
        errors.push(format!(
            "[actuation] hand_down_us ({}) must be below hand_up_us ({})",
            down, up
        ));
    }
}
