//! Hardware driver adapters
//!
//! This crate connects `embedded-hal` peripherals and chip driver crates
//! to the traits defined in gizmo-core and gizmo-hal:
//!
//! - GPIO outputs and inputs, optionally active-low
//! - Hobby servo on a PWM channel
//! - BME280 temperature/humidity sensor
//! - SSD1306 (or any monochrome `embedded-graphics` target) text display
//! - HC-SR04 distance reading conversion

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod actuator;
pub mod display;
pub mod gpio;
pub mod sensor;
