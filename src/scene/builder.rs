use crate::config::settings::SceneParams;
use crate::foundation::core::Point;
use crate::foundation::error::{AttemptFailure, SceneError, SceneResult};
use crate::layout::row::compute_row;
use crate::sample::placement::PlacementSampler;
use crate::sample::radii::RadiusSetSampler;
use crate::scene::model::{Circle, Scene};
use rand::Rng;
use rand::seq::SliceRandom;

/// Orchestrates radius sampling, placement and layout into one feasible [`Scene`].
///
/// Any failure throws the whole attempt away and starts over from radius sampling; partial
/// state is never repaired.
#[derive(Clone, Debug)]
pub struct SceneBuilder {
    params: SceneParams,
}

impl SceneBuilder {
    /// Rejects params the samplers cannot work with, before any sampling starts.
    pub fn new(params: SceneParams) -> SceneResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &SceneParams {
        &self.params
    }

    /// Build one scene; the first feasible attempt wins.
    ///
    /// Returns [`SceneError::GenerationExhausted`] with the last failure once
    /// `generation_attempts` is spent.
    #[tracing::instrument(skip_all, fields(attempts = self.params.generation_attempts))]
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> SceneResult<Scene> {
        let mut last = AttemptFailure::InfeasibleCount {
            count: self.params.min_circles,
        };
        for attempt in 0..self.params.generation_attempts {
            match self.attempt(rng) {
                Ok(scene) => {
                    debug_assert_eq!(scene.verify(&self.params), Ok(()));
                    tracing::debug!(attempt, circles = scene.count(), "scene accepted");
                    return Ok(scene);
                }
                Err(failure) => {
                    tracing::debug!(attempt, %failure, "scene attempt discarded");
                    last = failure;
                }
            }
        }
        Err(SceneError::GenerationExhausted {
            attempts: self.params.generation_attempts,
            last,
        })
    }

    fn attempt<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Scene, AttemptFailure> {
        let p = &self.params;
        let desired = rng.gen_range(p.min_circles..=p.max_circles);

        let mut radii = self.sample_radii(desired, rng)?;
        // Radii arrive sorted; shuffle so placement ids do not encode the final order.
        radii.shuffle(rng);

        let placed = PlacementSampler::new(p).place(&radii, rng)?;
        let row = compute_row(&placed, p.canvas, p.spacing);
        if !row.fits(p.row_budget()) {
            return Err(AttemptFailure::LayoutOverflow {
                total_width: row.total_width,
                available: p.row_budget(),
            });
        }

        let circles = placed
            .iter()
            .map(|pl| Circle {
                id: pl.id,
                radius: pl.radius,
                color: pl.color,
                initial: pl.center(),
                final_pos: Point::new(row.center_x[pl.id] as f64, row.line_y as f64),
            })
            .collect();
        Ok(Scene::assemble(circles, row.line_y, row.order))
    }

    /// Ask for `desired` radii, stepping the count down a bounded number of times on failure.
    fn sample_radii<R: Rng + ?Sized>(
        &self,
        desired: usize,
        rng: &mut R,
    ) -> Result<Vec<u32>, AttemptFailure> {
        let p = &self.params;
        let sampler = RadiusSetSampler::new(p);
        let floor = p.min_circles.max(1);
        let mut count = desired;
        for _ in 0..=p.count_reductions {
            if let Some(radii) = sampler.sample(count, rng) {
                return Ok(radii);
            }
            if count <= floor {
                break;
            }
            count -= 1;
        }
        Err(AttemptFailure::InfeasibleCount { count })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/builder.rs"]
mod tests;
