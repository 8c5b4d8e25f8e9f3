//! Collaborator traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations. Digital I/O lives in `gizmo-hal`.

pub mod actuator;
pub mod display;
pub mod sensor;

pub use actuator::{ActuatorError, ServoActuator};
pub use display::{DisplayError, Font, PixelColor, TextDisplay};
pub use sensor::{ClimateSensor, SensorError};
