//! Configuration types
//!
//! Board-agnostic configuration structures, their validation, and the
//! parser for the `device.toml` embedded in the firmware image.

pub mod parse;
pub mod types;

pub use parse::{load_config, parse_config, ParseError, ParseErrorKind};
pub use types::*;
