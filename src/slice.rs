//! Page-packed bitmap frames.
//!
//! Layout (SSD1306 GDDRAM order):
//! ```text
//! page 0: width bytes, bit 0 = top row of the page, bit 7 = row 7
//! page 1: width bytes, rows 8..15
//! ...
//! ```
//! A slice whose pixel height is not a multiple of 8 still stores whole
//! pages; `height_px` tells the blitter how many rows of the last page
//! are real image data.

use crate::config::PAGE_HEIGHT;
use crate::error::Error;

/// Immutable bitmap reference, one frame of an animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Slice<'a> {
    data: &'a [u8],
    width: u8,
    pages: u8,
    /// Exact height in pixels, 0 = `pages * 8`.
    height_px: u8,
}

impl<'a> Slice<'a> {
    /// Page-aligned slice, `pages` pages of `width` bytes.
    pub const fn new(data: &'a [u8], width: u8, pages: u8) -> Self {
        Self {
            data,
            width,
            pages,
            height_px: 0,
        }
    }

    /// Slice with an arbitrary pixel height (rounded up to whole pages).
    pub const fn with_height_px(data: &'a [u8], width: u8, height_px: u8) -> Self {
        let pages = ((height_px as u16 + 7) / 8) as u8;
        Self {
            data,
            width,
            pages,
            height_px,
        }
    }

    /// Checked constructor: rejects zero-sized frames and short bitmaps.
    pub fn try_new(data: &'a [u8], width: u8, height_px: u8) -> Result<Self, Error> {
        if width == 0 || height_px == 0 {
            return Err(Error::EmptySlice);
        }
        let slice = Self::with_height_px(data, width, height_px);
        let expected = slice.data_len();
        if data.len() < expected {
            return Err(Error::SliceDataTooShort {
                expected,
                actual: data.len(),
            });
        }
        Ok(slice)
    }

    /// Width in pixels (bytes per page).
    pub const fn width_px(&self) -> u8 {
        self.width
    }

    /// Height in whole pages.
    pub const fn pages(&self) -> u8 {
        self.pages
    }

    /// Height in pixels.
    pub const fn height_px(&self) -> u8 {
        if self.height_px != 0 {
            self.height_px
        } else {
            self.pages.saturating_mul(PAGE_HEIGHT as u8)
        }
    }

    /// Number of bitmap bytes the geometry describes.
    pub const fn data_len(&self) -> usize {
        self.width as usize * self.pages as usize
    }

    /// Non-empty geometry backed by enough bytes.
    pub const fn is_valid(&self) -> bool {
        self.width > 0 && self.pages > 0 && self.data.len() >= self.data_len()
    }

    /// Source byte for column `x` of page `page`, 0 past the end of the data.
    pub fn byte(&self, page: u8, x: u8) -> u8 {
        let offset = page as usize * self.width as usize + x as usize;
        self.data.get(offset).copied().unwrap_or(0)
    }

    /// Bit mask of the rows of `page` that belong to the image.
    ///
    /// All pages are full except possibly the last one of a slice with an
    /// explicit pixel height.
    pub fn page_mask(&self, page: u8) -> u8 {
        let rows = self.height_px() as usize;
        let first_row = page as usize * PAGE_HEIGHT;
        if rows >= first_row + PAGE_HEIGHT {
            0xFF
        } else if rows <= first_row {
            0x00
        } else {
            (1u8 << (rows - first_row)) - 1
        }
    }
}
