//! Motion profiles
//!
//! Eased setpoint sequences for smooth servo travel.

pub mod profile;

pub use profile::{generate, MotionProfile, PulseWidth};
