//! Page-addressed monochrome drawing surface.
//!
//! Monochrome OLED controllers address their memory in pages: one byte
//! covers a column of 8 vertical pixels. The [`Surface`] trait exposes
//! exactly that, so the blitter can work a byte at a time and any panel
//! driver or in-memory buffer can sit behind it.

use crate::config::{OLED_PAGES, OLED_WIDTH, PAGE_HEIGHT};

/// Byte-per-column, page-addressed pixel buffer.
pub trait Surface {
    /// Width in pixels.
    fn width(&self) -> u8;

    /// Height in pixels (a multiple of 8).
    fn height(&self) -> u8;

    /// Column byte at `(x, page)`. Out-of-range reads return 0.
    fn read_page_byte(&self, x: u8, page: u8) -> u8;

    /// Replace the column byte at `(x, page)`. Out-of-range writes are ignored.
    fn write_page_byte(&mut self, x: u8, page: u8, value: u8);

    /// Number of pages.
    fn pages(&self) -> u8 {
        self.height() / PAGE_HEIGHT as u8
    }

    fn pixel(&self, x: u8, y: u8) -> bool {
        if x >= self.width() || y >= self.height() {
            return false;
        }
        self.read_page_byte(x, y / 8) & (1 << (y % 8)) != 0
    }

    fn set_pixel(&mut self, x: u8, y: u8, on: bool) {
        if x >= self.width() || y >= self.height() {
            return;
        }
        let page = y / 8;
        let bit = 1u8 << (y % 8);
        let current = self.read_page_byte(x, page);
        let value = if on { current | bit } else { current & !bit };
        self.write_page_byte(x, page, value);
    }
}

/// In-memory frame buffer in panel memory order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer<const W: usize, const PAGES: usize> {
    pages: [[u8; W]; PAGES],
}

/// Frame buffer sized for the default 128×32 panel.
pub type OledBuffer = FrameBuffer<OLED_WIDTH, OLED_PAGES>;

impl<const W: usize, const PAGES: usize> FrameBuffer<W, PAGES> {
    /// Blank buffer. Both dimensions must fit the `u8` coordinate space.
    pub const fn new() -> Self {
        assert!(W <= u8::MAX as usize && PAGES * PAGE_HEIGHT <= u8::MAX as usize);
        Self {
            pages: [[0; W]; PAGES],
        }
    }

    pub fn clear(&mut self) {
        self.pages = [[0; W]; PAGES];
    }

    /// Raw bytes of one page, `None` past the last page.
    pub fn page(&self, page: usize) -> Option<&[u8; W]> {
        self.pages.get(page)
    }

    /// Iterator over every page in display order.
    pub fn iter_pages(&self) -> impl Iterator<Item = &[u8; W]> {
        self.pages.iter()
    }

    /// Number of lit pixels, handy for tests and change detection.
    pub fn lit_pixels(&self) -> u32 {
        self.pages
            .iter()
            .flat_map(|p| p.iter())
            .map(|b| b.count_ones())
            .sum()
    }
}

impl<const W: usize, const PAGES: usize> Default for FrameBuffer<W, PAGES> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const PAGES: usize> Surface for FrameBuffer<W, PAGES> {
    fn width(&self) -> u8 {
        W as u8
    }

    fn height(&self) -> u8 {
        (PAGES * PAGE_HEIGHT) as u8
    }

    fn read_page_byte(&self, x: u8, page: u8) -> u8 {
        self.pages
            .get(page as usize)
            .and_then(|p| p.get(x as usize))
            .copied()
            .unwrap_or(0)
    }

    fn write_page_byte(&mut self, x: u8, page: u8, value: u8) {
        if let Some(byte) = self
            .pages
            .get_mut(page as usize)
            .and_then(|p| p.get_mut(x as usize))
        {
            *byte = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_blank() {
        let fb = OledBuffer::new();
        assert_eq!(fb.width(), 128);
        assert_eq!(fb.height(), 32);
        assert_eq!(fb.pages(), 4);
        assert_eq!(fb.lit_pixels(), 0);
    }

    #[test]
    fn set_pixel_maps_to_page_bit() {
        let mut fb = FrameBuffer::<8, 2>::new();
        fb.set_pixel(3, 10, true);
        assert_eq!(fb.read_page_byte(3, 1), 0b0000_0100);
        assert!(fb.pixel(3, 10));
        fb.set_pixel(3, 10, false);
        assert_eq!(fb.read_page_byte(3, 1), 0);
    }

    #[test]
    fn out_of_range_access_is_ignored() {
        let mut fb = FrameBuffer::<8, 1>::new();
        fb.set_pixel(8, 0, true);
        fb.set_pixel(0, 8, true);
        fb.write_page_byte(0, 5, 0xFF);
        assert_eq!(fb.lit_pixels(), 0);
        assert_eq!(fb.read_page_byte(100, 0), 0);
        assert!(!fb.pixel(200, 200));
    }

    #[test]
    fn clear_resets_every_page() {
        let mut fb = FrameBuffer::<4, 2>::new();
        fb.write_page_byte(1, 1, 0xF0);
        assert_eq!(fb.lit_pixels(), 4);
        fb.clear();
        assert_eq!(fb, FrameBuffer::<4, 2>::new());
    }
}
