//! Forward at boot, then end→start→end on every trigger.

use super::{Controller, Phase};
use crate::animator::AnimResult;

impl Controller<'_> {
    pub(super) fn trigger_bootrev(&mut self, now: u32) {
        if self.phase == Phase::Idle {
            self.begin(Phase::Reverse, false, now);
        }
    }

    pub(super) fn step_bootrev(&mut self, result: AnimResult, now: u32) -> bool {
        match (self.phase, result) {
            (_, AnimResult::Running) => false,
            (Phase::Reverse, AnimResult::DoneAtStart) => {
                self.begin(Phase::Forward, true, now);
                false
            }
            (Phase::Booting, _) => {
                self.boot_done = true;
                self.settle();
                true
            }
            _ => {
                self.settle();
                true
            }
        }
    }
}
