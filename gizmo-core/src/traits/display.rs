//! Text display trait
//!
//! The display is a buffered monochrome panel. Glyph rendering belongs to
//! the driver; the core only decides what text goes where.

/// Errors that can occur with display communication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus write failed
    Bus,
    /// Display not initialized
    NotInitialized,
    /// Text did not fit in the formatting buffer
    BufferOverflow,
}

/// Font sizes available to the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    /// Headline digits (temperature value)
    Large,
    /// Unit letter
    Medium,
    /// Secondary line (humidity)
    Small,
}

/// Pixel color on a monochrome panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelColor {
    #[default]
    On,
    Off,
}

/// Trait for buffered text displays
///
/// Coordinates are pixels; `y` is the text baseline.
pub trait TextDisplay {
    /// Clear the frame buffer (not the panel)
    fn clear_buffer(&mut self) -> Result<(), DisplayError>;

    /// Draw text into the frame buffer
    fn write_text(
        &mut self,
        font: Font,
        x: i16,
        y: i16,
        text: &str,
        color: PixelColor,
    ) -> Result<(), DisplayError>;

    /// Width in pixels that `text` occupies in `font`
    fn text_width(&self, font: Font, text: &str) -> u16;

    /// Send the frame buffer to the panel
    fn flush(&mut self) -> Result<(), DisplayError>;
}
