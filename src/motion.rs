use raylib::prelude::*;
use crate::constants::*;

/// Per-column drift animation, derived from the column index alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationDescriptor {
    pub direction: i32,
    pub duration: f32,
    pub drift: f32,
}

impl AnimationDescriptor {
    pub fn for_column(column_index: usize) -> Self {
        Self {
            direction: if column_index % 2 == 0 { 1 } else { -1 },
            duration: BASE_DURATION + (column_index % 4) as f32 * DURATION_STEP,
            drift: BASE_DRIFT + (column_index % 3) as f32 * DRIFT_STEP,
        }
    }

    pub fn start_offset(&self) -> f32 {
        self.direction as f32 * self.drift
    }

    pub fn end_offset(&self) -> f32 {
        -self.start_offset()
    }

    /// Vertical offset after `elapsed` seconds of an endless mirrored loop.
    ///
    /// Even legs ease from start to end, odd legs play the same tween back.
    /// The clock is reduced to one full period in `f64` before easing, so a
    /// wall left running for days samples as smoothly as a fresh one.
    pub fn offset_at(&self, elapsed: f64) -> f32 {
        let duration = self.duration as f64;
        let phase = elapsed.max(0.0).rem_euclid(2.0 * duration);

        let (from, to, t) = if phase < duration {
            (self.start_offset(), self.end_offset(), phase)
        } else {
            (self.end_offset(), self.start_offset(), phase - duration)
        };

        ease::sine_in_out(t as f32, from, to - from, self.duration)
    }
}

/// Descriptors for columns `0..columns`, recomputed from scratch every call.
pub fn descriptors_for(columns: usize) -> Vec<AnimationDescriptor> {
    (0..columns).map(AnimationDescriptor::for_column).collect()
}
