//! Fault signalling
//!
//! Startup failures are reported on the indicator LED with blink patterns
//! that tell a fatal fault apart from a recoverable wait.

pub mod signal;

pub use signal::{blink_cycle, halt, wait_until_ready, BlinkPattern, StartupFailure};
