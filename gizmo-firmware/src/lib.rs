//! Gizmo firmware support
//!
//! Shared pieces of the two gadget binaries:
//!
//! - `high-five`: ultrasonic-triggered servo arm
//! - `thermo-display`: BME280 readings on an SSD1306 with a unit button

#![no_std]

pub mod channels;
pub mod config;
pub mod tasks;
