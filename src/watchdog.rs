//! Liveness guard for animated transitions.
//!
//! A controller arms the watchdog when a leg starts and feeds it when the
//! leg is reversed. Frame steps do not count. If a leg is still running
//! `timeout` ms later the watchdog flags it, and after a further `grace`
//! ms it tells the controller to force itself back to idle.

use crate::config::{WATCHDOG_GRACE_MS, WATCHDOG_TIMEOUT_MS};

/// Verdict of [`Watchdog::check`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WatchdogStatus {
    /// Disarmed, or the leg is younger than the timeout.
    Ok,
    /// Past the timeout, inside the grace period.
    Stalled,
    /// Past timeout + grace, the owner must recover.
    Expired,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Watchdog {
    timeout_ms: u32,
    grace_ms: u32,
    last_progress: u32,
    armed: bool,
    stalled: bool,
}

impl Watchdog {
    pub const fn new(timeout_ms: u32, grace_ms: u32) -> Self {
        Self {
            timeout_ms,
            grace_ms,
            last_progress: 0,
            armed: false,
            stalled: false,
        }
    }

    /// Start watching from `now`.
    pub fn arm(&mut self, now: u32) {
        self.armed = true;
        self.stalled = false;
        self.last_progress = now;
    }

    /// Restart the timeout from `now` (a reversed leg).
    pub fn feed(&mut self, now: u32) {
        if self.armed {
            self.last_progress = now;
            self.stalled = false;
        }
    }

    pub fn disarm(&mut self) {
        self.armed = false;
        self.stalled = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    pub fn grace_ms(&self) -> u32 {
        self.grace_ms
    }

    pub fn check(&mut self, now: u32) -> WatchdogStatus {
        if !self.armed {
            return WatchdogStatus::Ok;
        }

        let idle_for = now.wrapping_sub(self.last_progress);
        if idle_for >= self.timeout_ms.saturating_add(self.grace_ms) {
            self.armed = false;
            self.stalled = false;
            return WatchdogStatus::Expired;
        }
        if idle_for >= self.timeout_ms {
            if !self.stalled {
                warn!("animation stalled for {} ms", idle_for);
                self.stalled = true;
            }
            return WatchdogStatus::Stalled;
        }
        WatchdogStatus::Ok
    }
}

impl Default for Watchdog {
    fn default() -> Self {
        Self::new(WATCHDOG_TIMEOUT_MS, WATCHDOG_GRACE_MS)
    }
}
