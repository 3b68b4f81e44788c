//! Fixed-step accumulator
//!
//! Turns variable host frame deltas into whole simulation steps.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a frame's elapsed time and return how many `SIM_DT` steps to run.
    ///
    /// Frames longer than `MAX_FRAME_DT` are truncated and at most
    /// `MAX_SUBSTEPS` steps run per frame; any backlog past that is dropped.
    pub fn accumulate(&mut self, dt: f32) -> u32 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0;
        }
        self.accumulator += dt.min(MAX_FRAME_DT);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        steps
    }

    /// Forget leftover time (on round start)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sixty_hz_frames_give_two_steps() {
        let mut clock = FixedStep::new();
        let total: u32 = (0..60).map(|_| clock.accumulate(1.0 / 60.0)).sum();
        assert!((119..=120).contains(&total));
    }

    #[test]
    fn test_small_frames_accumulate() {
        let mut clock = FixedStep::new();
        assert_eq!(clock.accumulate(SIM_DT * 0.6), 0);
        assert_eq!(clock.accumulate(SIM_DT * 0.6), 1);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut clock = FixedStep::new();
        assert_eq!(clock.accumulate(5.0), MAX_SUBSTEPS);
        // Backlog was dropped rather than carried into the next frame
        assert!(clock.accumulate(0.0001) <= 1);
    }

    #[test]
    fn test_bad_deltas_ignored() {
        let mut clock = FixedStep::new();
        assert_eq!(clock.accumulate(-1.0), 0);
        assert_eq!(clock.accumulate(f32::NAN), 0);
        assert_eq!(clock.accumulate(0.0), 0);
    }
}
