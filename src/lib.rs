//! Reversible frame animations for page-addressed monochrome OLEDs.
//!
//! The library is pure logic: it never reads a clock and never owns a
//! display. Hosts pass a wrapping millisecond timestamp and a
//! [`Surface`] into every call, which keeps everything testable on the
//! host.
//!
//! Layers, bottom up:
//! - [`Slice`] / [`Sequence`]: static bitmap frames and frame lists.
//! - [`blit`]: clear and draw primitives with sub-page bit carry.
//! - [`Animator`]: a cursor over one sequence with mid-flight reversal.
//! - [`Controller`]: one-shot, out-and-back, toggle and boot-reverse
//!   behaviours over a single sequence.
//! - [`Widget`]: an exclusive-state indicator driven by a polled query.
//!
//! Usage: `cargo test --lib`, or `cargo test --features graphics` to
//! include the `embedded-graphics` adapters.
//!
//! The embedded demo lives in `main.rs` and needs `--features embedded`.

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible everywhere.
mod fmt;

pub mod animator;
pub mod blit;
pub mod config;
pub mod controller;
pub mod error;
#[cfg(feature = "graphics")]
pub mod graphics;
pub mod sequence;
pub mod slice;
pub mod surface;
pub mod watchdog;
pub mod widget;

pub use animator::{AnimResult, Animator, Direction};
pub use blit::{clear_rect, clear_span16, draw_slice, Blend};
pub use controller::{Behavior, Controller, ControllerConfig, Phase, SteadyFrame};
pub use error::Error;
pub use sequence::Sequence;
pub use slice::Slice;
pub use surface::{FrameBuffer, OledBuffer, Surface};
pub use watchdog::{Watchdog, WatchdogStatus};
pub use widget::{Enter, QueryFn, StateDesc, Widget, WidgetConfig, WidgetPhase};

// Pure demo logic, compiled here so it runs under host tests
#[path = "ui/input_logic.rs"]
mod ui_input_logic_impl;

pub mod ui {
    pub mod input_logic {
        pub use crate::ui_input_logic_impl::{layer_down, layer_up};
    }
}
