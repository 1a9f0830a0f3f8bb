//! Drawing primitives for page-packed bitmaps.
//!
//! Everything here clips silently at the surface edge. A slice drawn at a
//! `y` that is not a multiple of 8 straddles two destination pages per
//! source page: the low part of each source byte is shifted up into the
//! first page and the carried-out high bits land in the next one.

use crate::config::PAGE_HEIGHT;
use crate::slice::Slice;
use crate::surface::Surface;

/// How a frame is combined with what is already on the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Blend {
    /// Clear the destination rectangle, then draw.
    #[default]
    Opaque,
    /// OR the frame into the existing pixels (overlays).
    Additive,
}

/// Bits of page `page` covered by rows `[y0, y1)`.
fn row_mask(page: u8, y0: u16, y1: u16) -> u8 {
    let top = page as u16 * PAGE_HEIGHT as u16;
    let lo = y0.max(top) - top;
    let hi = y1.min(top + PAGE_HEIGHT as u16).saturating_sub(top);
    if hi <= lo {
        return 0;
    }
    ((1u16 << hi) - (1u16 << lo)) as u8
}

/// Turn off every pixel in the `w`×`h` rectangle at `(x, y)`.
pub fn clear_rect<S: Surface + ?Sized>(surface: &mut S, x: u8, y: u8, w: u8, h: u8) {
    if w == 0 || h == 0 || x >= surface.width() || y >= surface.height() {
        return;
    }

    let x_end = (x as u16 + w as u16).min(surface.width() as u16) as u8;
    let y_end = (y as u16 + h as u16).min(surface.height() as u16);

    let first_page = y / PAGE_HEIGHT as u8;
    let last_page = ((y_end - 1) / PAGE_HEIGHT as u16) as u8;

    for page in first_page..=last_page {
        let keep = !row_mask(page, y as u16, y_end);
        for col in x..x_end {
            let byte = surface.read_page_byte(col, page);
            surface.write_page_byte(col, page, byte & keep);
        }
    }
}

/// Clear a 16×8 cell, the size of one text glyph pair.
pub fn clear_span16<S: Surface + ?Sized>(surface: &mut S, x: u8, y: u8) {
    clear_rect(surface, x, y, 16, 8);
}

/// Draw `slice` with its top-left corner at `(x, y)`.
pub fn draw_slice<S: Surface + ?Sized>(surface: &mut S, slice: &Slice<'_>, x: u8, y: u8, blend: Blend) {
    if slice.width_px() == 0 || slice.pages() == 0 {
        return;
    }
    if x >= surface.width() || y >= surface.height() {
        return;
    }

    // Horizontal clip
    let w = slice.width_px().min(surface.width() - x);

    if blend == Blend::Opaque {
        clear_rect(surface, x, y, w, slice.height_px());
    }

    let y_off = y % PAGE_HEIGHT as u8;
    let start_page = y / PAGE_HEIGHT as u8;
    let max_page = surface.pages();

    for p in 0..slice.pages() {
        let mask = slice.page_mask(p);
        let dst_lo = start_page as u16 + p as u16;
        let dst_hi = dst_lo + 1;

        for i in 0..w {
            let src = slice.byte(p, i) & mask;
            if src == 0 {
                continue;
            }

            if dst_lo < max_page as u16 {
                let page = dst_lo as u8;
                let shifted = src << y_off;
                let current = surface.read_page_byte(x + i, page);
                surface.write_page_byte(x + i, page, current | shifted);
            }

            // Carry bits only exist for unaligned writes.
            if y_off != 0 && dst_hi < max_page as u16 {
                let page = dst_hi as u8;
                let carried = src >> (PAGE_HEIGHT as u8 - y_off);
                let current = surface.read_page_byte(x + i, page);
                surface.write_page_byte(x + i, page, current | carried);
            }
        }
    }
}
