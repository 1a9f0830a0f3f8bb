//! `embedded-graphics` adapters for [`FrameBuffer`].
//!
//! The buffer is a `DrawTarget`, so text and primitives can be drawn
//! into the same memory the animations blit into. It is also
//! `Drawable`, which is how a finished frame reaches a panel driver:
//! `buffer.draw(&mut display)` followed by the driver's flush.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::config::PAGE_HEIGHT;
use crate::surface::{FrameBuffer, Surface};

impl<const W: usize, const PAGES: usize> OriginDimensions for FrameBuffer<W, PAGES> {
    fn size(&self) -> Size {
        Size::new(W as u32, (PAGES * PAGE_HEIGHT) as u32)
    }
}

impl<const W: usize, const PAGES: usize> DrawTarget for FrameBuffer<W, PAGES> {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            // Negative or huge coordinates are simply off-screen.
            if let (Ok(x), Ok(y)) = (u8::try_from(point.x), u8::try_from(point.y)) {
                self.set_pixel(x, y, color.is_on());
            }
        }
        Ok(())
    }
}

impl<const W: usize, const PAGES: usize> Drawable for FrameBuffer<W, PAGES> {
    type Color = BinaryColor;
    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let area = Rectangle::new(Point::zero(), self.size());
        let colors = area
            .points()
            .map(|p| BinaryColor::from(self.pixel(p.x as u8, p.y as u8)));
        target.fill_contiguous(&area, colors)
    }
}
