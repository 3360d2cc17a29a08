//! Fixed-rate driver
//!
//! Turns variable frame times into whole simulation ticks (60 Hz). The 1 Hz
//! countdown fires every `TICKS_PER_SECOND` ticks, so it stays exact however
//! the frame times round. Both run on the caller's thread, one after the other.

use crate::consts::{MAX_SUBSTEPS, SIM_DT, TICKS_PER_SECOND};
use crate::input::InputSource;
use crate::sim::{MatchState, tick, tick_second};

/// Longest frame we are willing to catch up on
const MAX_FRAME_DT: f32 = 0.1;

/// What a single `update` call did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub ticks: u32,
    pub seconds: u32,
}

#[derive(Debug, Clone, Default)]
pub struct FixedStepDriver {
    accumulator: f32,
    /// Ticks run since the countdown last moved, 0..TICKS_PER_SECOND
    ticks_into_second: u32,
}

impl FixedStepDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget any partial tick/second. `Session` calls this on start and restart.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.ticks_into_second = 0;
    }

    /// Advance the match by `dt` seconds of wall-clock time.
    ///
    /// A fresh input snapshot is pulled before every tick.
    pub fn update(
        &mut self,
        state: &mut MatchState,
        input: &mut impl InputSource,
        dt: f32,
    ) -> StepReport {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut report = StepReport::default();
        while self.accumulator >= SIM_DT && report.ticks < MAX_SUBSTEPS {
            let snapshot = input.held_symbols();
            tick(state, &snapshot);
            self.accumulator -= SIM_DT;
            report.ticks += 1;

            self.ticks_into_second += 1;
            if self.ticks_into_second >= TICKS_PER_SECOND {
                self.ticks_into_second = 0;
                tick_second(state);
                report.seconds += 1;
            }
        }

        report
    }
}
