use crate::config::settings::AnimationTiming;

/// Frame counts for one before/after animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameBudget {
    /// Nominal `round(fps * min(duration, cap))`, at least [`FrameBudget::MIN_FRAMES`].
    pub nominal: usize,
    /// Frames spent on each of the leading and trailing holds.
    pub hold: usize,
    pub transition: usize,
}

impl FrameBudget {
    pub const MIN_FRAMES: usize = 3;
    /// A transition always has distinct start and end frames.
    pub const MIN_TRANSITION: usize = 2;
    /// Share of the nominal count given to each hold.
    pub const HOLD_FRACTION: f64 = 0.1;

    pub fn from_timing(timing: &AnimationTiming) -> Self {
        let secs = timing.duration_secs.min(timing.max_duration_secs).max(0.0);
        let nominal = ((timing.fps.as_f64() * secs).round() as usize).max(Self::MIN_FRAMES);
        let hold = (nominal as f64 * Self::HOLD_FRACTION).floor() as usize;
        let transition = nominal
            .saturating_sub(2 * hold)
            .min(timing.max_transition_frames as usize)
            .max(Self::MIN_TRANSITION);
        Self {
            nominal,
            hold,
            transition,
        }
    }

    /// Frames actually emitted: both holds plus the (possibly capped) transition.
    pub fn frame_count(self) -> usize {
        2 * self.hold + self.transition
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timing.rs"]
mod tests;
