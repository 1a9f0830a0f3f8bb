//! Behaviour controllers over a single animated sequence.
//!
//! One [`Controller`] type covers the common widget patterns; the
//! [`Behavior`] tag picks which state machine `trigger` and `render`
//! run:
//!
//! - **OneShot** - play forward once per trigger, rest on the steady frame.
//! - **OutBack** - play forward then straight back.
//! - **Toggle** - binary on/off with reversible transitions.
//! - **BootReverse** - play forward at boot, then "flinch" end→start→end
//!   on every trigger.
//!
//! The controller never reads a clock and never owns the display: the
//! host passes `now` and a `&mut` surface into every call.

mod bootrev;
mod oneshot;
mod outback;
mod toggle;


use crate::animator::Animator;
use crate::blit::{draw_slice, Blend};
use crate::config::{WATCHDOG_GRACE_MS, WATCHDOG_TIMEOUT_MS};
use crate::sequence::Sequence;
use crate::slice::Slice;
use crate::surface::Surface;
use crate::watchdog::{Watchdog, WatchdogStatus};

/// Animation pattern a controller implements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Behavior {
    OneShot,
    OutBack,
    Toggle,
    BootReverse,
}

/// Frame shown while a one-shot or out-and-back controller is idle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SteadyFrame {
    #[default]
    First,
    Last,
}

/// Where a controller is in its state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Showing the steady frame.
    Idle,
    /// Boot play-through.
    Booting,
    /// Playing start→end (out leg, toggle on).
    Forward,
    /// Playing end→start (back leg, toggle off).
    Reverse,
}

/// Immutable controller description, usually a `static`.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerConfig<'a> {
    pub seq: &'a Sequence<'a>,
    pub behavior: Behavior,
    pub steady: SteadyFrame,
    pub blend: Blend,
    pub x: u8,
    pub y: u8,
    /// Play the boot animation from `Controller::new`.
    pub run_boot: bool,
    /// Initial side of a toggle.
    pub initial_on: bool,
    pub watchdog_timeout_ms: u32,
    pub watchdog_grace_ms: u32,
}

impl<'a> ControllerConfig<'a> {
    const fn base(seq: &'a Sequence<'a>, behavior: Behavior, x: u8, y: u8) -> Self {
        Self {
            seq,
            behavior,
            steady: SteadyFrame::First,
            blend: Blend::Opaque,
            x,
            y,
            run_boot: false,
            initial_on: false,
            watchdog_timeout_ms: WATCHDOG_TIMEOUT_MS,
            watchdog_grace_ms: WATCHDOG_GRACE_MS,
        }
    }

    pub const fn oneshot(
        seq: &'a Sequence<'a>,
        x: u8,
        y: u8,
        steady: SteadyFrame,
        run_boot: bool,
    ) -> Self {
        let mut cfg = Self::base(seq, Behavior::OneShot, x, y);
        cfg.steady = steady;
        cfg.run_boot = run_boot;
        cfg
    }

    pub const fn outback(
        seq: &'a Sequence<'a>,
        x: u8,
        y: u8,
        steady: SteadyFrame,
        run_boot: bool,
    ) -> Self {
        let mut cfg = Self::base(seq, Behavior::OutBack, x, y);
        cfg.steady = steady;
        cfg.run_boot = run_boot;
        cfg
    }

    pub const fn toggle(seq: &'a Sequence<'a>, x: u8, y: u8, blend: Blend) -> Self {
        let mut cfg = Self::base(seq, Behavior::Toggle, x, y);
        cfg.blend = blend;
        cfg
    }

    pub const fn boot_reverse(seq: &'a Sequence<'a>, x: u8, y: u8, run_boot: bool) -> Self {
        let mut cfg = Self::base(seq, Behavior::BootReverse, x, y);
        cfg.steady = SteadyFrame::Last;
        cfg.run_boot = run_boot;
        cfg
    }

    pub const fn with_blend(mut self, blend: Blend) -> Self {
        self.blend = blend;
        self
    }

    pub const fn with_initial_on(mut self, on: bool) -> Self {
        self.initial_on = on;
        self
    }

    pub const fn with_watchdog(mut self, timeout_ms: u32, grace_ms: u32) -> Self {
        self.watchdog_timeout_ms = timeout_ms;
        self.watchdog_grace_ms = grace_ms;
        self
    }
}

/// Runtime state of one animated widget.
#[derive(Clone, Copy, Debug)]
pub struct Controller<'a> {
    cfg: &'a ControllerConfig<'a>,
    anim: Animator<'a>,
    phase: Phase,
    boot_done: bool,
    /// Toggle: side currently shown while idle.
    visible_on: bool,
    /// Toggle: side last asked for.
    desired_on: bool,
    /// Out-and-back: the boot leg left us on the end frame.
    rest_at_end: bool,
    watchdog: Watchdog,
}

impl<'a> Controller<'a> {
    /// Build the controller and start the boot animation if configured.
    pub fn new(cfg: &'a ControllerConfig<'a>, now: u32) -> Self {
        let toggle = cfg.behavior == Behavior::Toggle;
        let mut ctl = Self {
            cfg,
            anim: Animator::new(),
            phase: Phase::Idle,
            boot_done: true,
            visible_on: toggle && cfg.initial_on,
            desired_on: toggle && cfg.initial_on,
            rest_at_end: false,
            watchdog: Watchdog::new(cfg.watchdog_timeout_ms, cfg.watchdog_grace_ms),
        };

        if cfg.run_boot && !toggle {
            ctl.begin(Phase::Booting, true, now);
            ctl.boot_done = ctl.phase != Phase::Booting;
        }
        ctl
    }

    /// Ask for the behaviour's animation.
    ///
    /// One-shot, out-and-back and boot-reverse only react while idle;
    /// a toggle flips its desired side.
    pub fn trigger(&mut self, now: u32) {
        match self.cfg.behavior {
            Behavior::OneShot => self.trigger_oneshot(now),
            Behavior::OutBack => self.trigger_outback(now),
            Behavior::BootReverse => self.trigger_bootrev(now),
            Behavior::Toggle => self.set_desired(!self.desired_on, now),
        }
    }

    /// Toggle only: request the on (last frame) or off (frame 0) side.
    ///
    /// Other behaviours ignore this.
    pub fn set_desired(&mut self, want_on: bool, now: u32) {
        if self.cfg.behavior == Behavior::Toggle {
            self.set_toggle(want_on, now);
        }
    }

    /// Advance the state machine and draw one frame.
    ///
    /// Returns `true` only on the call where an animation completes.
    pub fn render<S: Surface + ?Sized>(&mut self, surface: &mut S, now: u32) -> bool {
        let completed = self.advance(now);
        self.draw(surface);
        completed
    }

    /// State-machine half of [`render`](Self::render), without drawing.
    pub fn advance(&mut self, now: u32) -> bool {
        if self.phase == Phase::Idle {
            return false;
        }

        if self.watchdog.check(now) == WatchdogStatus::Expired {
            warn!("controller stuck in {}, forcing idle", self.phase);
            self.force_idle();
            return false;
        }

        // Frame steps never feed the watchdog.
        let result = self.anim.step(now);

        match self.cfg.behavior {
            Behavior::OneShot => self.step_oneshot(result),
            Behavior::OutBack => self.step_outback(result, now),
            Behavior::Toggle => self.step_toggle(result),
            Behavior::BootReverse => self.step_bootrev(result, now),
        }
    }

    /// Draw the steady frame while idle, the animated frame otherwise.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let frame = if self.phase == Phase::Idle {
            self.steady_frame()
        } else if self.anim.is_active() {
            self.anim.current_frame()
        } else {
            None
        };

        if let Some(frame) = frame {
            draw_slice(surface, frame, self.cfg.x, self.cfg.y, self.cfg.blend);
        }
    }

    /// Drop any running animation and rest on the steady frame.
    ///
    /// A toggle settles on the side it was last asked for.
    pub fn force_idle(&mut self) {
        self.anim.stop();
        self.watchdog.disarm();
        self.phase = Phase::Idle;
        self.boot_done = true;
        self.visible_on = self.desired_on;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn boot_done(&self) -> bool {
        self.boot_done
    }

    /// Toggle side currently shown when idle.
    pub fn is_on(&self) -> bool {
        self.visible_on
    }

    pub fn desired_on(&self) -> bool {
        self.desired_on
    }

    pub fn animator(&self) -> &Animator<'a> {
        &self.anim
    }

    pub fn config(&self) -> &'a ControllerConfig<'a> {
        self.cfg
    }

    /// Frame shown while idle.
    pub fn steady_frame(&self) -> Option<&'a Slice<'a>> {
        let seq = self.cfg.seq;
        let at_end = match self.cfg.behavior {
            Behavior::Toggle => self.visible_on,
            Behavior::BootReverse => true,
            Behavior::OutBack if self.rest_at_end => true,
            Behavior::OneShot | Behavior::OutBack => self.cfg.steady == SteadyFrame::Last,
        };
        if at_end {
            seq.last()
        } else {
            seq.first()
        }
    }

    /// Start a leg. An empty sequence leaves the controller idle.
    fn begin(&mut self, phase: Phase, forward: bool, now: u32) {
        self.anim.start(self.cfg.seq, forward, now);
        if self.anim.is_active() {
            self.phase = phase;
            self.watchdog.arm(now);
        } else {
            debug!("empty sequence, staying idle");
            self.phase = Phase::Idle;
            self.watchdog.disarm();
        }
    }

    /// Back to idle after a finished leg.
    fn settle(&mut self) {
        self.phase = Phase::Idle;
        self.watchdog.disarm();
    }
}
