//! Play forward once per trigger.

use super::{Controller, Phase};
use crate::animator::AnimResult;

impl Controller<'_> {
    pub(super) fn trigger_oneshot(&mut self, now: u32) {
        if self.phase == Phase::Idle {
            self.begin(Phase::Forward, true, now);
        }
    }

    pub(super) fn step_oneshot(&mut self, result: AnimResult) -> bool {
        if result == AnimResult::Running {
            return false;
        }
        if self.phase == Phase::Booting {
            self.boot_done = true;
        }
        self.settle();
        true
    }
}
