//! Display drivers

pub mod mono_text;

pub use mono_text::{font_for, FrameBuffer, MonoTextDisplay};
