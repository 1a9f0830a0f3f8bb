//! Unified error type for oled-anim.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Rendering never fails; these errors come from construction,
//! validation and forced state changes.

/// Top-level error type used across the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Frame data
    /// A slice was declared with zero width or zero height.
    EmptySlice,

    /// The bitmap is shorter than `width * pages` bytes.
    SliceDataTooShort { expected: usize, actual: usize },

    /// A sequence has no frames.
    EmptySequence,

    // Widgets
    /// A widget configuration declares no states.
    NoStates,

    /// A state index is outside `[0, state_count)`.
    StateOutOfRange { state: u8, count: u8 },

    // Display
    /// Pushing the frame buffer to the panel failed.
    Display,
}
