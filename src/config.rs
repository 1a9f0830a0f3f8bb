//! Crate-wide constants and compile-time configuration.
//!
//! Timing parameters and display geometry live here so they can be
//! tuned in one place.

// Animation timing

/// Default time between two animation frames (ms).
///
/// Used by every animator unless the sequence carries its own frame
/// duration or the animator has an override.
pub const ANIM_FRAME_MS: u16 = 80;

/// Default interval between two state queries of a declarative widget (ms).
/// 0 = query on every tick.
pub const WIDGET_QUERY_INTERVAL_MS: u16 = 0;

// Watchdog

/// Time without animation progress before a transition is considered stuck (ms).
pub const WATCHDOG_TIMEOUT_MS: u32 = 1000;

/// Extra time granted to a stuck transition before it is force-reset (ms).
pub const WATCHDOG_GRACE_MS: u32 = 500;

// Display geometry (SSD1306 128×32, the usual split-keyboard panel)

/// Display width in pixels.
pub const OLED_WIDTH: usize = 128;

/// Display height in pixels.
pub const OLED_HEIGHT: usize = 32;

/// Height of one display memory page in pixels.
pub const PAGE_HEIGHT: usize = 8;

/// Number of memory pages on the display.
pub const OLED_PAGES: usize = OLED_HEIGHT / PAGE_HEIGHT;

// Demo board (nRF52840-DK defaults)
//
//   Button UP      → P0.11
//   Button DOWN    → P0.12
//   Button SELECT  → P0.24
//   I²C SDA        → P0.26
//   I²C SCL        → P0.27

/// Display refresh period of the demo render loop (ms).
pub const DEMO_REFRESH_MS: u64 = 30;

/// Button debounce time (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

/// Number of layers the demo layer widget cycles through.
pub const DEMO_LAYER_COUNT: u8 = 4;
