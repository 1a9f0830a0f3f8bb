//! Frame sequences.
//!
//! A sequence is plain data: an ordered list of frames plus optional
//! timing. Sequences are normally declared as `static` tables with the
//! [`slice_seq!`](crate::slice_seq) macro.

use crate::slice::Slice;

/// Ordered, immutable list of frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sequence<'a> {
    frames: &'a [Slice<'a>],
    /// Per-sequence frame duration, `None` = crate default.
    frame_ms: Option<u16>,
    looping: bool,
}

impl<'a> Sequence<'a> {
    pub const fn new(frames: &'a [Slice<'a>]) -> Self {
        Self {
            frames,
            frame_ms: None,
            looping: false,
        }
    }

    /// Use `ms` between frames instead of the default interval.
    pub const fn with_frame_ms(mut self, ms: u16) -> Self {
        self.frame_ms = Some(ms);
        self
    }

    /// Wrap around at either end instead of completing.
    pub const fn looping(mut self) -> Self {
        self.looping = true;
        self
    }

    /// Number of frames (saturates at 255).
    pub const fn count(&self) -> u8 {
        if self.frames.len() > u8::MAX as usize {
            u8::MAX
        } else {
            self.frames.len() as u8
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub const fn frame_ms(&self) -> Option<u16> {
        self.frame_ms
    }

    pub const fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn frame(&self, idx: u8) -> Option<&'a Slice<'a>> {
        self.frames.get(idx as usize)
    }

    pub fn first(&self) -> Option<&'a Slice<'a>> {
        self.frames.first()
    }

    pub fn last(&self) -> Option<&'a Slice<'a>> {
        self.frame(self.count().checked_sub(1)?)
    }
}

/// Declare a `static` frame table and the sequence over it.
///
/// An optional visibility goes before the name: `slice_seq!(pub NAME, ...)`.
///
/// ```
/// use oled_anim::{slice_seq, Slice};
///
/// static F0: [u8; 8] = [0x00; 8];
/// static F1: [u8; 8] = [0xFF; 8];
///
/// slice_seq!(BLINK, Slice::new(&F0, 8, 1), Slice::new(&F1, 8, 1));
/// assert_eq!(BLINK.count(), 2);
/// ```
#[macro_export]
macro_rules! slice_seq {
    (@count) => { 0usize };
    (@count $head:expr $(, $tail:expr)*) => { 1usize + $crate::slice_seq!(@count $($tail),*) };
    ($vis:vis $name:ident, $($frame:expr),+ $(,)?) => {
        $vis static $name: $crate::Sequence<'static> = {
            static FRAMES: [$crate::Slice<'static>; $crate::slice_seq!(@count $($frame),+)] =
                [$($frame),+];
            $crate::Sequence::new(&FRAMES)
        };
    };
}
