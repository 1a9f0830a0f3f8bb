//! Declarative exclusive-state widget.
//!
//! A widget keeps one on-screen indicator in sync with an external
//! integer state (typically the highest active keyboard layer). Every
//! state owns a sequence: the *enter* leg plays it toward the state's
//! steady frame, the *exit* leg plays it back out. A change of state is
//! animated as exit-old then enter-new:
//!
//! ```text
//! Idle(src) ──desired≠src──▶ Exiting(src→dst) ──done──▶ Entering(dst) ──done──▶ Idle(dst)
//! ```
//!
//! Requests that arrive mid-transition are coalesced: an exit can be
//! undone or retargeted, and an enter can be cancelled with the newest
//! target parked in a single `pending` slot. The most recent request
//! always wins.

use crate::animator::{deadline_reached, AnimResult, Animator};
use crate::blit::{clear_rect, draw_slice, Blend};
use crate::config::{WATCHDOG_GRACE_MS, WATCHDOG_TIMEOUT_MS, WIDGET_QUERY_INTERVAL_MS};
use crate::error::Error;
use crate::sequence::Sequence;
use crate::slice::Slice;
use crate::surface::Surface;
use crate::watchdog::{Watchdog, WatchdogStatus};

/// Which way a state's enter leg plays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Enter {
    /// Enter plays first→last; steady on the last frame.
    #[default]
    Forward,
    /// Enter plays last→first; steady on the first frame.
    Reverse,
}

/// One logical state of a widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StateDesc<'a> {
    pub seq: &'a Sequence<'a>,
    pub enter: Enter,
}

impl<'a> StateDesc<'a> {
    pub const fn new(seq: &'a Sequence<'a>) -> Self {
        Self {
            seq,
            enter: Enter::Forward,
        }
    }

    pub const fn reversed(seq: &'a Sequence<'a>) -> Self {
        Self {
            seq,
            enter: Enter::Reverse,
        }
    }

    /// Frame shown while idle in this state.
    pub fn steady_frame(&self) -> Option<&'a Slice<'a>> {
        match self.enter {
            Enter::Forward => self.seq.last(),
            Enter::Reverse => self.seq.first(),
        }
    }

    const fn enter_forward(&self) -> bool {
        matches!(self.enter, Enter::Forward)
    }

    /// Boundary at which the enter leg completes.
    const fn entered(&self) -> AnimResult {
        match self.enter {
            Enter::Forward => AnimResult::DoneAtEnd,
            Enter::Reverse => AnimResult::DoneAtStart,
        }
    }
}

/// Polled "what state should be shown", called with `WidgetConfig::user_arg`.
pub type QueryFn = fn(u32) -> u8;

/// Immutable widget description, usually a `static`.
#[derive(Clone, Copy, Debug)]
pub struct WidgetConfig<'a> {
    pub x: u8,
    pub y: u8,
    /// Area cleared before each opaque draw. Zero falls back to the
    /// frame's own rectangle.
    pub bbox_w: u8,
    pub bbox_h: u8,
    pub blend: Blend,
    pub states: &'a [StateDesc<'a>],
    pub query: Option<QueryFn>,
    pub user_arg: u32,
    /// Minimum time between two queries, 0 = every tick.
    pub query_interval_ms: u16,
    pub initial_state: u8,
    pub watchdog_timeout_ms: u32,
    pub watchdog_grace_ms: u32,
}

impl<'a> WidgetConfig<'a> {
    pub const fn new(states: &'a [StateDesc<'a>], x: u8, y: u8, bbox_w: u8, bbox_h: u8) -> Self {
        Self {
            x,
            y,
            bbox_w,
            bbox_h,
            blend: Blend::Opaque,
            states,
            query: None,
            user_arg: 0,
            query_interval_ms: WIDGET_QUERY_INTERVAL_MS,
            initial_state: 0,
            watchdog_timeout_ms: WATCHDOG_TIMEOUT_MS,
            watchdog_grace_ms: WATCHDOG_GRACE_MS,
        }
    }

    pub const fn with_query(mut self, query: QueryFn, user_arg: u32) -> Self {
        self.query = Some(query);
        self.user_arg = user_arg;
        self
    }

    pub const fn with_blend(mut self, blend: Blend) -> Self {
        self.blend = blend;
        self
    }

    pub const fn with_query_interval(mut self, ms: u16) -> Self {
        self.query_interval_ms = ms;
        self
    }

    pub const fn with_initial_state(mut self, state: u8) -> Self {
        self.initial_state = state;
        self
    }

    pub const fn with_watchdog(mut self, timeout_ms: u32, grace_ms: u32) -> Self {
        self.watchdog_timeout_ms = timeout_ms;
        self.watchdog_grace_ms = grace_ms;
        self
    }

    /// Number of states (saturates at 255).
    pub fn state_count(&self) -> u8 {
        self.states.len().min(u8::MAX as usize) as u8
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.states.is_empty() {
            return Err(Error::NoStates);
        }
        if self.states.iter().any(|s| s.seq.is_empty()) {
            return Err(Error::EmptySequence);
        }
        let count = self.state_count();
        if self.initial_state >= count {
            return Err(Error::StateOutOfRange {
                state: self.initial_state,
                count,
            });
        }
        Ok(())
    }
}

/// Transition phase of a [`Widget`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WidgetPhase {
    Idle,
    Exiting,
    Entering,
}

#[derive(Clone, Copy, Debug)]
pub struct Widget<'a> {
    cfg: &'a WidgetConfig<'a>,
    anim: Animator<'a>,
    phase: WidgetPhase,
    /// State currently shown (or being exited / entered).
    src: u8,
    /// Target adopted when the running exit completes.
    dst: u8,
    /// Target remembered while a cancelled enter plays back.
    pending: Option<u8>,
    /// Last in-range request.
    desired: u8,
    next_query_ms: u32,
    watchdog: Watchdog,
}

impl<'a> Widget<'a> {
    /// Validate `cfg` and rest on the initial state's steady frame.
    pub fn new(cfg: &'a WidgetConfig<'a>, now: u32) -> Result<Self, Error> {
        cfg.validate()?;

        let state = cfg.initial_state;
        Ok(Self {
            cfg,
            anim: Animator::new(),
            phase: WidgetPhase::Idle,
            src: state,
            dst: state,
            pending: None,
            desired: state,
            next_query_ms: now,
            watchdog: Watchdog::new(cfg.watchdog_timeout_ms, cfg.watchdog_grace_ms),
        })
    }

    /// Poll the query (if any and if due), then advance and draw.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S, now: u32) -> bool {
        if let Some(query) = self.cfg.query {
            if deadline_reached(now, self.next_query_ms) {
                self.next_query_ms = now.wrapping_add(self.cfg.query_interval_ms as u32);
                self.request(query(self.cfg.user_arg), now);
            }
        }
        self.render(surface, now)
    }

    /// Ask for `desired` to become the visible state.
    ///
    /// Out-of-range values are ignored.
    pub fn request(&mut self, desired: u8, now: u32) {
        if desired >= self.cfg.state_count() {
            debug!("widget: ignoring state {}", desired);
            return;
        }
        self.desired = desired;

        match self.phase {
            WidgetPhase::Idle => {
                if desired != self.src {
                    self.dst = desired;
                    self.start_exit(now);
                }
            }
            WidgetPhase::Exiting => {
                if desired == self.src {
                    // Undo the exit back to the steady frame.
                    if self.dst != self.src {
                        self.turn_around(now);
                        self.dst = self.src;
                    }
                } else {
                    // Resume an exit that was being undone.
                    if self.dst == self.src {
                        self.turn_around(now);
                    }
                    self.dst = desired;
                }
            }
            WidgetPhase::Entering => {
                if desired != self.src {
                    if self.pending.is_none() {
                        self.turn_around(now);
                    }
                    self.pending = Some(desired);
                } else if self.pending.take().is_some() {
                    self.turn_around(now);
                }
            }
        }
    }

    /// Advance the transition and draw. Returns `true` on the call
    /// where the widget settles.
    pub fn render<S: Surface + ?Sized>(&mut self, surface: &mut S, now: u32) -> bool {
        let settled = self.advance(now);
        self.draw(surface);
        settled
    }

    /// State-machine half of [`render`](Self::render), without drawing.
    pub fn advance(&mut self, now: u32) -> bool {
        if self.phase == WidgetPhase::Idle {
            return false;
        }

        if self.watchdog.check(now) == WatchdogStatus::Expired {
            warn!("widget stuck in {}, settling on state {}", self.phase, self.desired);
            self.settle_on(self.desired);
            return false;
        }

        let result = self.anim.step(now);
        if result == AnimResult::Running {
            return false;
        }

        let entered = self.desc(self.src).entered();
        match self.phase {
            WidgetPhase::Exiting if result != entered => {
                trace!("widget: exit of {} done, entering {}", self.src, self.dst);
                self.src = self.dst;
                self.start_enter(now);
                false
            }
            // Exit undone, back on the steady frame.
            WidgetPhase::Exiting => {
                self.settle_on(self.src);
                true
            }
            WidgetPhase::Entering if result == entered => {
                self.settle_on(self.src);
                true
            }
            // Cancelled enter played back to its start.
            WidgetPhase::Entering => match self.pending.take() {
                Some(next) if next != self.src => {
                    self.dst = next;
                    self.start_exit(now);
                    false
                }
                _ => {
                    self.settle_on(self.src);
                    true
                }
            },
            WidgetPhase::Idle => false,
        }
    }

    /// Draw the current frame into the widget's box.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let cfg = self.cfg;
        let frame = match self.phase {
            WidgetPhase::Idle => self.desc(self.src).steady_frame(),
            _ if self.anim.is_active() => self.anim.current_frame(),
            _ => None,
        };

        // With a bbox, opaque means "clear the box, then composite".
        let blend = if cfg.blend == Blend::Opaque && cfg.bbox_w > 0 && cfg.bbox_h > 0 {
            clear_rect(surface, cfg.x, cfg.y, cfg.bbox_w, cfg.bbox_h);
            Blend::Additive
        } else {
            cfg.blend
        };

        if let Some(frame) = frame {
            draw_slice(surface, frame, cfg.x, cfg.y, blend);
        }
    }

    /// Jump straight to `state`'s steady frame, dropping any transition.
    ///
    /// The next query poll is pushed a full interval past `now`.
    pub fn force_state(&mut self, state: u8, now: u32) -> Result<(), Error> {
        let count = self.cfg.state_count();
        if state >= count {
            return Err(Error::StateOutOfRange { state, count });
        }
        self.desired = state;
        self.settle_on(state);
        self.next_query_ms = now.wrapping_add(self.cfg.query_interval_ms as u32);
        Ok(())
    }

    /// Visible (or transitioning-from) state.
    pub fn state(&self) -> u8 {
        self.src
    }

    pub fn target(&self) -> u8 {
        self.dst
    }

    pub fn pending(&self) -> Option<u8> {
        self.pending
    }

    pub fn desired(&self) -> u8 {
        self.desired
    }

    pub fn phase(&self) -> WidgetPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == WidgetPhase::Idle
    }

    pub fn animator(&self) -> &Animator<'a> {
        &self.anim
    }

    pub fn config(&self) -> &'a WidgetConfig<'a> {
        self.cfg
    }

    fn desc(&self, state: u8) -> &'a StateDesc<'a> {
        // `src` and `dst` are only ever assigned checked values.
        &self.cfg.states[state as usize]
    }

    fn start_exit(&mut self, now: u32) {
        let desc = self.desc(self.src);
        self.anim.start(desc.seq, !desc.enter_forward(), now);
        self.phase = WidgetPhase::Exiting;
        self.watchdog.arm(now);
    }

    fn start_enter(&mut self, now: u32) {
        let desc = self.desc(self.src);
        self.anim.start(desc.seq, desc.enter_forward(), now);
        self.phase = WidgetPhase::Entering;
        self.watchdog.arm(now);
    }

    fn turn_around(&mut self, now: u32) {
        self.anim.reverse(now);
        self.watchdog.feed(now);
    }

    fn settle_on(&mut self, state: u8) {
        self.anim.stop();
        self.watchdog.disarm();
        self.phase = WidgetPhase::Idle;
        self.src = state;
        self.dst = state;
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::FrameBuffer;
    use core::sync::atomic::{AtomicU32, AtomicU8, Ordering};

    static F0: [u8; 4] = [0x01; 4];
    static F1: [u8; 4] = [0x02; 4];
    static F2: [u8; 4] = [0x04; 4];
    static F3: [u8; 4] = [0x08; 4];

    crate::slice_seq!(
        SEQ,
        Slice::new(&F0, 4, 1),
        Slice::new(&F1, 4, 1),
        Slice::new(&F2, 4, 1),
        Slice::new(&F3, 4, 1),
    );

    static SLOW_FRAMES: [Slice<'static>; 2] = [Slice::new(&F0, 4, 1), Slice::new(&F1, 4, 1)];
    static SLOW: Sequence<'static> = Sequence::new(&SLOW_FRAMES).with_frame_ms(u16::MAX);

    static LOOP_FRAMES: [Slice<'static>; 2] = [Slice::new(&F0, 4, 1), Slice::new(&F2, 4, 1)];
    static LOOP: Sequence<'static> = Sequence::new(&LOOP_FRAMES).looping();

    static THREE: [StateDesc<'static>; 3] =
        [StateDesc::new(&SEQ), StateDesc::new(&SEQ), StateDesc::new(&SEQ)];
    static PLAIN: WidgetConfig<'static> = WidgetConfig::new(&THREE, 0, 0, 0, 0);

    fn run_until_idle(w: &mut Widget<'_>, mut now: u32) -> u32 {
        for _ in 0..32 {
            if w.is_idle() {
                break;
            }
            now += 80;
            w.advance(now);
        }
        now
    }

    #[test]
    fn starts_idle_on_initial_state() {
        static CFG: WidgetConfig<'static> = WidgetConfig::new(&THREE, 0, 0, 0, 0).with_initial_state(2);
        let w = Widget::new(&CFG, 0).unwrap();
        assert!(w.is_idle());
        assert_eq!(w.state(), 2);
    }

    #[test]
    fn validate_rejects_bad_configs() {
        static NONE: WidgetConfig<'static> = WidgetConfig::new(&[], 0, 0, 0, 0);
        assert_eq!(NONE.validate(), Err(Error::NoStates));

        static EMPTY_SEQ: Sequence<'static> = Sequence::new(&[]);
        static HOLLOW: [StateDesc<'static>; 1] = [StateDesc::new(&EMPTY_SEQ)];
        static HOLLOW_CFG: WidgetConfig<'static> = WidgetConfig::new(&HOLLOW, 0, 0, 0, 0);
        assert_eq!(HOLLOW_CFG.validate(), Err(Error::EmptySequence));

        static FAR: WidgetConfig<'static> = WidgetConfig::new(&THREE, 0, 0, 0, 0).with_initial_state(3);
        assert_eq!(
            Widget::new(&FAR, 0).err(),
            Some(Error::StateOutOfRange { state: 3, count: 3 })
        );
    }

    #[test]
    fn exit_then_enter() {
        let mut w = Widget::new(&PLAIN, 0).unwrap();
        w.request(1, 0);
        assert_eq!(w.phase(), WidgetPhase::Exiting);
        assert_eq!(w.animator().index(), 3);

        assert!(!w.advance(80));
        assert!(!w.advance(160));
        assert!(!w.advance(240));
        assert_eq!(w.phase(), WidgetPhase::Entering);
        assert_eq!(w.state(), 1);
        assert_eq!(w.animator().index(), 0);

        assert!(!w.advance(320));
        assert!(!w.advance(400));
        assert!(w.advance(480));
        assert!(w.is_idle());
        assert_eq!(w.state(), 1);
    }

    #[test]
    fn latest_request_during_exit_wins() {
        let mut w = Widget::new(&PLAIN, 0).unwrap();
        w.request(1, 0);
        w.advance(80);
        w.request(2, 100);
        assert_eq!(w.target(), 2);

        run_until_idle(&mut w, 100);
        assert_eq!(w.state(), 2);
    }

    #[test]
    fn reverting_mid_exit_undoes_it() {
        let mut w = Widget::new(&PLAIN, 0).unwrap();
        w.request(1, 0);
        w.advance(80);
        assert_eq!(w.animator().index(), 2);

        w.request(0, 100);
        assert_eq!(w.animator().index(), 2);
        // Repeated polls of the same value do not flip it again.
        w.request(0, 110);
        assert!(w.advance(180));
        assert!(w.is_idle());
        assert_eq!(w.state(), 0);
    }

    #[test]
    fn new_target_resumes_an_undone_exit() {
        let mut w = Widget::new(&PLAIN, 0).unwrap();
        w.request(1, 0);
        w.advance(80);
        w.request(0, 100);
        w.request(2, 120);
        assert_eq!(w.phase(), WidgetPhase::Exiting);

        run_until_idle(&mut w, 120);
        assert_eq!(w.state(), 2);
    }

    #[test]
    fn cancelled_enter_exits_toward_pending() {
        let mut w = Widget::new(&PLAIN, 0).unwrap();
        w.request(1, 0);
        for t in [80, 160, 240, 320] {
            w.advance(t);
        }
        assert_eq!(w.phase(), WidgetPhase::Entering);
        assert_eq!(w.animator().index(), 1);

        w.request(0, 330);
        w.request(0, 340);
        assert_eq!(w.pending(), Some(0));
        assert_eq!(w.animator().index(), 1);

        // Enter plays back to its start, then a fresh exit toward 0.
        assert!(!w.advance(410));
        assert_eq!(w.phase(), WidgetPhase::Exiting);
        assert_eq!(w.state(), 1);
        assert_eq!(w.target(), 0);

        run_until_idle(&mut w, 410);
        assert_eq!(w.state(), 0);
        assert_eq!(w.pending(), None);
    }

    #[test]
    fn returning_to_entered_state_resumes_enter() {
        let mut w = Widget::new(&PLAIN, 0).unwrap();
        w.request(1, 0);
        for t in [80, 160, 240, 320] {
            w.advance(t);
        }
        w.request(2, 330);
        w.request(1, 340);
        assert_eq!(w.pending(), None);

        let end = run_until_idle(&mut w, 340);
        assert_eq!(w.state(), 1);
        assert!(end < 340 + 80 * 4);
    }

    #[test]
    fn reverse_enter_states_rest_on_first_frame() {
        static MIXED: [StateDesc<'static>; 2] = [StateDesc::new(&SEQ), StateDesc::reversed(&SEQ)];
        static CFG: WidgetConfig<'static> = WidgetConfig::new(&MIXED, 0, 0, 4, 8);
        let mut w = Widget::new(&CFG, 0).unwrap();
        let mut fb = FrameBuffer::<8, 1>::new();

        w.render(&mut fb, 0);
        assert_eq!(fb.read_page_byte(0, 0), 0x08);

        w.request(1, 0);
        run_until_idle(&mut w, 0);
        assert_eq!(w.state(), 1);
        w.render(&mut fb, 1_000);
        assert_eq!(fb.read_page_byte(0, 0), 0x01);
    }

    #[test]
    fn reverse_enter_state_undoes_its_exit() {
        static MIXED: [StateDesc<'static>; 2] = [StateDesc::new(&SEQ), StateDesc::reversed(&SEQ)];
        static CFG: WidgetConfig<'static> =
            WidgetConfig::new(&MIXED, 0, 0, 4, 8).with_initial_state(1);
        let mut w = Widget::new(&CFG, 0).unwrap();

        // Exit of a reversed state plays forward from frame 0.
        w.request(0, 0);
        assert!(!w.advance(80));
        assert_eq!(w.phase(), WidgetPhase::Exiting);
        assert_eq!(w.animator().index(), 1);

        w.request(1, 80);
        w.request(1, 90);
        assert!(w.advance(160));
        assert!(w.is_idle());
        assert_eq!(w.state(), 1);

        let mut fb = FrameBuffer::<8, 1>::new();
        w.render(&mut fb, 200);
        assert_eq!(fb.read_page_byte(0, 0), 0x01);
    }

    #[test]
    fn reverse_enter_cancel_exits_toward_pending() {
        static MIXED: [StateDesc<'static>; 3] =
            [StateDesc::new(&SEQ), StateDesc::reversed(&SEQ), StateDesc::new(&SEQ)];
        static CFG: WidgetConfig<'static> = WidgetConfig::new(&MIXED, 0, 0, 4, 8);
        let mut w = Widget::new(&CFG, 0).unwrap();

        w.request(1, 0);
        for t in [80, 160, 240] {
            w.advance(t);
        }
        // Reversed enter starts on the last frame.
        assert_eq!(w.phase(), WidgetPhase::Entering);
        assert_eq!(w.state(), 1);
        assert_eq!(w.animator().index(), 3);

        w.advance(320);
        assert_eq!(w.animator().index(), 2);
        w.request(2, 320);
        assert_eq!(w.pending(), Some(2));

        // Played back to the end frame, which is where its exit begins.
        assert!(!w.advance(400));
        assert_eq!(w.phase(), WidgetPhase::Exiting);
        assert_eq!(w.state(), 1);
        assert_eq!(w.target(), 2);
        assert_eq!(w.pending(), None);
        assert_eq!(w.animator().index(), 0);

        run_until_idle(&mut w, 400);
        assert_eq!(w.state(), 2);
        assert!(w.is_idle());
    }

    #[test]
    fn out_of_range_requests_are_ignored() {
        let mut w = Widget::new(&PLAIN, 0).unwrap();
        w.request(7, 0);
        assert!(w.is_idle());
        assert_eq!(w.desired(), 0);
    }

    #[test]
    fn query_drives_transitions() {
        static LAYER: AtomicU8 = AtomicU8::new(0);
        fn layer(_: u32) -> u8 {
            LAYER.load(Ordering::Relaxed)
        }
        static CFG: WidgetConfig<'static> = WidgetConfig::new(&THREE, 0, 0, 0, 0).with_query(layer, 0);

        let mut w = Widget::new(&CFG, 0).unwrap();
        let mut fb = FrameBuffer::<8, 1>::new();
        w.tick(&mut fb, 0);
        assert!(w.is_idle());

        LAYER.store(9, Ordering::Relaxed);
        w.tick(&mut fb, 10);
        assert!(w.is_idle());

        LAYER.store(2, Ordering::Relaxed);
        let mut now = 20;
        w.tick(&mut fb, now);
        assert_eq!(w.phase(), WidgetPhase::Exiting);
        while !w.is_idle() && now < 2_000 {
            now += 40;
            w.tick(&mut fb, now);
        }
        assert_eq!(w.state(), 2);
    }

    #[test]
    fn query_receives_user_arg() {
        fn echo(arg: u32) -> u8 {
            arg as u8
        }
        static CFG: WidgetConfig<'static> = WidgetConfig::new(&THREE, 0, 0, 0, 0).with_query(echo, 1);
        let mut w = Widget::new(&CFG, 0).unwrap();
        w.tick(&mut FrameBuffer::<8, 1>::new(), 0);
        assert_eq!(w.desired(), 1);
    }

    #[test]
    fn query_interval_throttles_polling() {
        static CALLS: AtomicU32 = AtomicU32::new(0);
        fn counted(_: u32) -> u8 {
            CALLS.fetch_add(1, Ordering::Relaxed);
            0
        }
        static CFG: WidgetConfig<'static> =
            WidgetConfig::new(&THREE, 0, 0, 0, 0).with_query(counted, 0).with_query_interval(100);

        let mut w = Widget::new(&CFG, 0).unwrap();
        let mut fb = FrameBuffer::<8, 1>::new();
        for t in (0..300).step_by(10) {
            w.tick(&mut fb, t);
        }
        assert_eq!(CALLS.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn opaque_clears_bbox_and_additive_composites() {
        static OPAQUE: WidgetConfig<'static> = WidgetConfig::new(&THREE, 0, 0, 6, 8);
        static OVERLAY: WidgetConfig<'static> =
            WidgetConfig::new(&THREE, 0, 0, 6, 8).with_blend(Blend::Additive);

        let mut fb = FrameBuffer::<8, 1>::new();
        for col in 0..8 {
            fb.write_page_byte(col, 0, 0x80);
        }
        Widget::new(&OPAQUE, 0).unwrap().render(&mut fb, 0);
        assert_eq!(fb.read_page_byte(0, 0), 0x08);
        // Inside the bbox but past the frame: cleared.
        assert_eq!(fb.read_page_byte(5, 0), 0x00);
        assert_eq!(fb.read_page_byte(6, 0), 0x80);

        for col in 0..8 {
            fb.write_page_byte(col, 0, 0x80);
        }
        Widget::new(&OVERLAY, 0).unwrap().render(&mut fb, 0);
        assert_eq!(fb.read_page_byte(0, 0), 0x88);
        assert_eq!(fb.read_page_byte(5, 0), 0x80);
    }

    #[test]
    fn watchdog_settles_on_last_request() {
        static STUCK: [StateDesc<'static>; 2] = [StateDesc::new(&SEQ), StateDesc::new(&SLOW)];
        static CFG: WidgetConfig<'static> = WidgetConfig::new(&STUCK, 0, 0, 0, 0);
        let mut w = Widget::new(&CFG, 0).unwrap();

        w.request(1, 0);
        for t in [80, 160, 240] {
            w.advance(t);
        }
        assert_eq!(w.phase(), WidgetPhase::Entering);

        assert!(!w.advance(1_739));
        assert_eq!(w.phase(), WidgetPhase::Entering);
        assert!(!w.advance(1_740));
        assert!(w.is_idle());
        assert_eq!(w.state(), 1);
    }

    #[test]
    fn watchdog_recovers_looping_enter() {
        static LOOPS: [StateDesc<'static>; 2] = [StateDesc::new(&SEQ), StateDesc::new(&LOOP)];
        static CFG: WidgetConfig<'static> = WidgetConfig::new(&LOOPS, 0, 0, 0, 0);
        let mut w = Widget::new(&CFG, 0).unwrap();

        w.request(1, 0);
        for t in [80, 160, 240] {
            w.advance(t);
        }
        assert_eq!(w.phase(), WidgetPhase::Entering);

        // Frames keep changing, but the leg never reaches a boundary.
        let mut seen = [false; 2];
        let mut t = 320;
        while t < 1_740 {
            assert!(!w.advance(t));
            seen[w.animator().index() as usize] = true;
            t += 80;
        }
        assert_eq!(seen, [true, true]);
        assert_eq!(w.phase(), WidgetPhase::Entering);

        assert!(!w.advance(1_740));
        assert!(w.is_idle());
        assert_eq!(w.state(), 1);
    }

    #[test]
    fn force_state_delays_next_poll() {
        fn always_zero(_: u32) -> u8 {
            0
        }
        static CFG: WidgetConfig<'static> = WidgetConfig::new(&THREE, 0, 0, 0, 0)
            .with_query(always_zero, 0)
            .with_query_interval(100);
        let mut w = Widget::new(&CFG, 0).unwrap();
        let mut fb = FrameBuffer::<8, 1>::new();

        w.tick(&mut fb, 0);
        assert_eq!(w.force_state(2, 50), Ok(()));
        w.tick(&mut fb, 100);
        assert!(w.is_idle());
        assert_eq!(w.state(), 2);

        w.tick(&mut fb, 150);
        assert_eq!(w.phase(), WidgetPhase::Exiting);
        assert_eq!(w.target(), 0);
    }

    #[test]
    fn force_state_skips_the_animation() {
        let mut w = Widget::new(&PLAIN, 0).unwrap();
        w.request(1, 0);
        w.advance(80);
        assert_eq!(w.force_state(2, 90), Ok(()));
        assert!(w.is_idle());
        assert_eq!(w.state(), 2);
        assert!(!w.animator().is_active());
        assert_eq!(
            w.force_state(5, 100),
            Err(Error::StateOutOfRange { state: 5, count: 3 })
        );
    }
}
