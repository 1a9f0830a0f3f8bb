//! Play forward, then straight back to the first frame.
//!
//! The boot leg is forward only and leaves the widget resting on the
//! end frame until the next trigger.

use super::{Controller, Phase};
use crate::animator::AnimResult;

impl Controller<'_> {
    pub(super) fn trigger_outback(&mut self, now: u32) {
        if self.phase == Phase::Idle {
            self.rest_at_end = false;
            self.begin(Phase::Forward, true, now);
        }
    }

    pub(super) fn step_outback(&mut self, result: AnimResult, now: u32) -> bool {
        match (self.phase, result) {
            (Phase::Booting, AnimResult::DoneAtEnd) => {
                self.boot_done = true;
                self.rest_at_end = true;
                self.settle();
                true
            }
            (Phase::Forward, AnimResult::DoneAtEnd) => {
                self.begin(Phase::Reverse, false, now);
                false
            }
            (Phase::Reverse, AnimResult::DoneAtStart) => {
                self.settle();
                true
            }
            (_, AnimResult::Running) => false,
            // Finished at the wrong end: nothing sensible left to play.
            _ => {
                self.boot_done = true;
                self.settle();
                true
            }
        }
    }
}
