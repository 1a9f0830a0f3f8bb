//! Low-level frame animator.
//!
//! A cursor over one [`Sequence`]: index, direction, active flag and the
//! deadline of the next frame. Time is always passed in by the caller as
//! a wrapping millisecond counter, the animator never reads a clock.

use crate::blit::{draw_slice, Blend};
use crate::config::ANIM_FRAME_MS;
use crate::sequence::Sequence;
use crate::slice::Slice;
use crate::surface::Surface;

/// Outcome of one [`Animator::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimResult {
    /// Still playing, or nothing to do yet.
    Running,
    /// Stopped on frame 0.
    DoneAtStart,
    /// Stopped on the last frame.
    DoneAtEnd,
}

/// Play direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub const fn from_forward(forward: bool) -> Self {
        if forward {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    pub const fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    const fn delta(self) -> i16 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// Wrap-safe "has `now` reached `deadline`".
pub(crate) fn deadline_reached(now: u32, deadline: u32) -> bool {
    now.wrapping_sub(deadline) as i32 >= 0
}

#[derive(Clone, Copy, Debug)]
pub struct Animator<'a> {
    seq: Option<&'a Sequence<'a>>,
    dir: Direction,
    idx: u8,
    active: bool,
    next_ms: u32,
    /// Per-animator frame interval override.
    frame_ms: Option<u16>,
}

impl<'a> Animator<'a> {
    /// Inert animator, bound to nothing.
    pub const fn new() -> Self {
        Self {
            seq: None,
            dir: Direction::Forward,
            idx: 0,
            active: false,
            next_ms: 0,
            frame_ms: None,
        }
    }

    /// Frame interval in effect: override, then sequence, then default.
    pub fn interval_ms(&self) -> u32 {
        self.frame_ms
            .or_else(|| self.seq.and_then(|s| s.frame_ms()))
            .unwrap_or(ANIM_FRAME_MS) as u32
    }

    /// Bind `seq` and start playing from its first (forward) or last frame.
    ///
    /// An empty sequence leaves the animator inactive.
    pub fn start(&mut self, seq: &'a Sequence<'a>, forward: bool, now: u32) {
        if seq.is_empty() {
            self.active = false;
            return;
        }

        self.seq = Some(seq);
        self.dir = Direction::from_forward(forward);
        self.idx = if forward { 0 } else { seq.count() - 1 };
        self.active = true;
        self.next_ms = now.wrapping_add(self.interval_ms());
    }

    /// Flip direction in place. The current frame is kept.
    pub fn reverse(&mut self, now: u32) {
        if !self.active || self.count() == 0 {
            return;
        }
        self.dir = self.dir.flipped();
        self.next_ms = now.wrapping_add(self.interval_ms());
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Advance one frame if the deadline has passed.
    pub fn step(&mut self, now: u32) -> AnimResult {
        let count = self.count();
        if !self.active || count == 0 {
            return AnimResult::Running;
        }
        if !deadline_reached(now, self.next_ms) {
            return AnimResult::Running;
        }

        self.next_ms = self.next_ms.wrapping_add(self.interval_ms());

        // Widen before adding so 0 - 1 is caught instead of wrapping.
        let next = self.idx as i16 + self.dir.delta();
        let last = count as i16 - 1;
        let looping = self.seq.map(|s| s.is_looping()).unwrap_or(false);

        if next < 0 {
            if looping {
                self.idx = last as u8;
                return AnimResult::Running;
            }
            return self.finish(0, AnimResult::DoneAtStart);
        }
        if next > last {
            if looping {
                self.idx = 0;
                return AnimResult::Running;
            }
            return self.finish(last as u8, AnimResult::DoneAtEnd);
        }

        self.idx = next as u8;

        // Landing on the far boundary completes the play-through.
        if !looping {
            match self.dir {
                Direction::Forward if next == last => {
                    return self.finish(last as u8, AnimResult::DoneAtEnd)
                }
                Direction::Backward if next == 0 => {
                    return self.finish(0, AnimResult::DoneAtStart)
                }
                _ => {}
            }
        }

        AnimResult::Running
    }

    fn finish(&mut self, idx: u8, result: AnimResult) -> AnimResult {
        self.idx = idx;
        self.active = false;
        result
    }

    /// Move the cursor to `idx` without changing direction.
    ///
    /// Returns `false` if nothing is bound or `idx` is out of range.
    pub fn jump_to(&mut self, idx: u8, now: u32) -> bool {
        if idx >= self.count() {
            return false;
        }
        self.idx = idx;
        if self.active {
            self.next_ms = now.wrapping_add(self.interval_ms());
        }
        true
    }

    /// Rewind to the first frame of the current direction.
    pub fn reset(&mut self, now: u32) {
        let count = self.count();
        if count == 0 {
            return;
        }
        self.idx = match self.dir {
            Direction::Forward => 0,
            Direction::Backward => count - 1,
        };
        if self.active {
            self.next_ms = now.wrapping_add(self.interval_ms());
        }
    }

    /// Override the frame interval for this animator only.
    pub fn set_frame_ms(&mut self, frame_ms: Option<u16>, now: u32) {
        self.frame_ms = frame_ms;
        if self.active {
            self.next_ms = now.wrapping_add(self.interval_ms());
        }
    }

    pub fn is_active(&self) -> bool {
        self.active && self.count() > 0
    }

    pub fn index(&self) -> u8 {
        self.idx
    }

    pub fn direction(&self) -> Direction {
        self.dir
    }

    pub fn count(&self) -> u8 {
        self.seq.map(|s| s.count()).unwrap_or(0)
    }

    pub fn sequence(&self) -> Option<&'a Sequence<'a>> {
        self.seq
    }

    /// Frame under the cursor, whether or not the animator is running.
    pub fn current_frame(&self) -> Option<&'a Slice<'a>> {
        self.seq.and_then(|s| s.frame(self.idx))
    }

    /// Draw the current frame. Does nothing while inactive.
    pub fn draw_current<S: Surface + ?Sized>(&self, surface: &mut S, x: u8, y: u8, blend: Blend) {
        if !self.is_active() {
            return;
        }
        if let Some(frame) = self.current_frame() {
            draw_slice(surface, frame, x, y, blend);
        }
    }
}

impl Default for Animator<'_> {
    fn default() -> Self {
        Self::new()
    }
}
