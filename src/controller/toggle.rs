//! Binary on/off widget.
//!
//! "On" rests on the last frame, "off" on frame 0. A request that
//! arrives mid-transition reverses the animator in place instead of
//! restarting it, so the widget never jumps.

use super::{Controller, Phase};
use crate::animator::AnimResult;

impl Controller<'_> {
    pub(super) fn set_toggle(&mut self, want_on: bool, now: u32) {
        self.desired_on = want_on;

        match self.phase {
            Phase::Idle => {
                if want_on != self.visible_on {
                    let phase = if want_on { Phase::Forward } else { Phase::Reverse };
                    self.begin(phase, want_on, now);
                }
            }
            Phase::Forward if !want_on => {
                trace!("toggle: reversing toward off");
                self.anim.reverse(now);
                self.phase = Phase::Reverse;
                self.watchdog.feed(now);
            }
            Phase::Reverse if want_on => {
                trace!("toggle: reversing toward on");
                self.anim.reverse(now);
                self.phase = Phase::Forward;
                self.watchdog.feed(now);
            }
            // Already heading there.
            _ => {}
        }
    }

    pub(super) fn step_toggle(&mut self, result: AnimResult) -> bool {
        let on = match result {
            AnimResult::Running => return false,
            AnimResult::DoneAtEnd => true,
            AnimResult::DoneAtStart => false,
        };
        self.visible_on = on;
        self.settle();
        true
    }
}
