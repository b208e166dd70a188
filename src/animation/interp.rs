use crate::animation::ease::Ease;
use crate::animation::timing::FrameBudget;
use crate::config::settings::AnimationTiming;
use crate::foundation::core::{Point, Rgb8};
use crate::foundation::error::{SceneError, SceneResult};
use crate::scene::model::Scene;
use std::iter::FusedIterator;

/// Which part of the animation a frame belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FramePhase {
    HoldStart,
    Transition,
    HoldEnd,
}

/// One circle as drawn in a specific frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FrameCircle {
    pub id: usize,
    pub center: Point,
    pub radius: u32,
    pub color: Rgb8,
}

/// Everything needed to rasterise one output frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameDesc {
    pub index: usize,
    pub phase: FramePhase,
    /// Eased blend factor in `[0, 1]`: 0 is the scattered state, 1 the sorted row.
    pub blend: f64,
    pub circles: Vec<FrameCircle>,
}

/// Pose every circle of `scene` at blend factor `blend` (0 = scattered, 1 = sorted).
pub fn pose(scene: &Scene, blend: f64) -> Vec<FrameCircle> {
    scene
        .circles()
        .iter()
        .map(|c| FrameCircle {
            id: c.id,
            center: c.initial.lerp(c.final_pos, blend),
            radius: c.radius,
            color: c.color,
        })
        .collect()
}

/// Produces the hold / eased transition / hold frame sequence for a scene.
#[derive(Clone, Debug)]
pub struct Interpolator<'a> {
    scene: &'a Scene,
    budget: FrameBudget,
    ease: Ease,
}

impl<'a> Interpolator<'a> {
    /// Rejects scenes with non-finite positions.
    pub fn new(scene: &'a Scene, timing: &AnimationTiming) -> SceneResult<Self> {
        for c in scene.circles() {
            if !(c.initial.is_finite() && c.final_pos.is_finite()) {
                return Err(SceneError::validation(format!(
                    "circle {} has a non-finite position",
                    c.id
                )));
            }
        }
        Ok(Self {
            scene,
            budget: FrameBudget::from_timing(timing),
            ease: timing.ease,
        })
    }

    pub fn budget(&self) -> FrameBudget {
        self.budget
    }

    /// Phase and eased blend factor of output frame `index`.
    pub fn blend_at(&self, index: usize) -> (FramePhase, f64) {
        let FrameBudget {
            hold, transition, ..
        } = self.budget;
        if index < hold {
            (FramePhase::HoldStart, 0.0)
        } else if index < hold + transition {
            let i = index - hold;
            // transition >= FrameBudget::MIN_TRANSITION
            let t = i as f64 / (transition - 1) as f64;
            (FramePhase::Transition, self.ease.apply(t))
        } else {
            (FramePhase::HoldEnd, 1.0)
        }
    }

    /// Consume the interpolator into its frame sequence.
    pub fn frames(self) -> Frames<'a> {
        Frames {
            end: self.budget.frame_count(),
            inner: self,
            next: 0,
        }
    }
}

/// Ordered, finite frame sequence from [`Interpolator::frames`].
#[derive(Clone, Debug)]
pub struct Frames<'a> {
    inner: Interpolator<'a>,
    next: usize,
    end: usize,
}

impl Iterator for Frames<'_> {
    type Item = FrameDesc;

    fn next(&mut self) -> Option<FrameDesc> {
        if self.next >= self.end {
            return None;
        }
        let index = self.next;
        self.next += 1;
        let (phase, blend) = self.inner.blend_at(index);
        Some(FrameDesc {
            index,
            phase,
            blend,
            circles: pose(self.inner.scene, blend),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.end - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Frames<'_> {}
impl FusedIterator for Frames<'_> {}

#[cfg(test)]
#[path = "../../tests/unit/animation/interp.rs"]
mod tests;
