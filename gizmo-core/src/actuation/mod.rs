//! High-five actuation
//!
//! Couples the distance trigger, the state machine and the eased motion
//! profile into a controller advanced by elapsed time.

pub mod controller;

pub use controller::{ActuationController, Commands};
