//! Embassy async tasks
//!
//! Each task runs independently and communicates via the statics in
//! `channels`.

use embassy_rp::gpio::{Input, Output};

use gizmo_drivers::gpio::{GpioInput, GpioOutput};

pub mod actuation;
pub mod climate;

pub use actuation::{actuation_task, Servo};
pub use climate::{input_watch_task, sense_display_task, I2cBus, Panel, Sensor, SharedI2c};

/// Indicator LED
pub type Indicator = GpioOutput<Output<'static>>;

/// Push button
pub type Button = GpioInput<Input<'static>>;
