//! SSD1306 OLED display wrapper.
//!
//! The scene is composed in an [`OledBuffer`]; this module only owns the
//! panel driver, text styling and the final push.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use oled_anim::{Error, OledBuffer};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Type alias for the concrete display driver.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x32, BufferedGraphicsMode<DisplaySize128x32>>;

/// Initialise the SSD1306 display and clear the screen.
pub fn init<I2C>(i2c: I2C) -> Display<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x32, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    if display.init().is_err() {
        defmt::warn!("SSD1306 init failed");
    }
    display.clear_buffer();
    let _ = display.flush();
    display
}

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build()
}

/// Draw `text` into the frame buffer with its baseline at `(x, y)`.
pub fn draw_label(fb: &mut OledBuffer, text: &str, x: i32, y: i32) {
    let _ = Text::new(text, Point::new(x, y), text_style()).draw(fb);
}

/// Copy the frame buffer into the driver and flush it over I²C.
pub fn present<I2C>(display: &mut Display<I2C>, fb: &OledBuffer) -> Result<(), Error>
where
    I2C: embedded_hal::i2c::I2c,
{
    fb.draw(display).map_err(|_| Error::Display)?;
    display.flush().map_err(|_| Error::Display)
}
