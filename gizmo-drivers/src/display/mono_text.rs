//! Text rendering on monochrome frame buffers
//!
//! Maps the core's three logical font sizes to `embedded-graphics` mono
//! fonts and draws text with its baseline at the requested `y`. Works on
//! any buffered `BinaryColor` target; the SSD1306 in buffered graphics
//! mode is the one the firmware uses.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10, FONT_9X15_BOLD};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use gizmo_core::traits::{DisplayError, Font, PixelColor, TextDisplay};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::Ssd1306;

/// Draw target with a frame buffer that is sent to the panel explicitly
pub trait FrameBuffer: DrawTarget<Color = BinaryColor> {
    /// Blank the buffer
    fn clear_frame(&mut self);

    /// Send the buffer to the panel
    fn flush_frame(&mut self) -> Result<(), DisplayError>;
}

impl<DI, SIZE> FrameBuffer for Ssd1306<DI, SIZE, BufferedGraphicsMode<SIZE>>
where
    DI: WriteOnlyDataCommand,
    SIZE: DisplaySize,
{
    fn clear_frame(&mut self) {
        self.clear_buffer();
    }

    fn flush_frame(&mut self) -> Result<(), DisplayError> {
        self.flush().map_err(|_| DisplayError::Bus)
    }
}

/// Mono font used for a logical font size
pub fn font_for(font: Font) -> &'static MonoFont<'static> {
    match font {
        Font::Large => &FONT_10X20,
        Font::Medium => &FONT_9X15_BOLD,
        Font::Small => &FONT_6X10,
    }
}

fn color_for(color: PixelColor) -> BinaryColor {
    match color {
        PixelColor::On => BinaryColor::On,
        PixelColor::Off => BinaryColor::Off,
    }
}

/// [`TextDisplay`] over a [`FrameBuffer`]
pub struct MonoTextDisplay<T> {
    target: T,
}

impl<T: FrameBuffer> MonoTextDisplay<T> {
    pub fn new(target: T) -> Self {
        Self { target }
    }

    /// The wrapped draw target
    pub fn target(&self) -> &T {
        &self.target
    }
}

impl<T: FrameBuffer> TextDisplay for MonoTextDisplay<T> {
    fn clear_buffer(&mut self) -> Result<(), DisplayError> {
        self.target.clear_frame();
        Ok(())
    }

    fn write_text(
        &mut self,
        font: Font,
        x: i16,
        y: i16,
        text: &str,
        color: PixelColor,
    ) -> Result<(), DisplayError> {
        let style = MonoTextStyle::new(font_for(font), color_for(color));
        Text::with_baseline(
            text,
            Point::new(i32::from(x), i32::from(y)),
            style,
            Baseline::Alphabetic,
        )
        .draw(&mut self.target)
        .map_err(|_| DisplayError::Bus)?;
        Ok(())
    }

    fn text_width(&self, font: Font, text: &str) -> u16 {
        let font = font_for(font);
        let chars = text.chars().count() as u32;
        if chars == 0 {
            return 0;
        }
        let advance = font.character_size.width + font.character_spacing;
        let width = chars * advance - font.character_spacing;
        u16::try_from(width).unwrap_or(u16::MAX)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.target.flush_frame()
    }
}
