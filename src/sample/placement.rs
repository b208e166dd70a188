use crate::config::settings::SceneParams;
use crate::foundation::core::{Point, Rgb8};
use crate::foundation::error::AttemptFailure;
use rand::Rng;
use rand::seq::SliceRandom;

/// A circle dropped at a random, non-overlapping spot on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub id: usize,
    pub radius: u32,
    pub color: Rgb8,
    pub x: i64,
    pub y: i64,
}

impl Placement {
    pub fn center(&self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }
}

/// Rejection sampler for the scattered ("before") state.
#[derive(Clone, Copy, Debug)]
pub struct PlacementSampler<'a> {
    params: &'a SceneParams,
}

impl<'a> PlacementSampler<'a> {
    pub fn new(params: &'a SceneParams) -> Self {
        Self { params }
    }

    /// Place every radius in order; ids follow the order of `radii`.
    ///
    /// Fails as a whole as soon as one circle exhausts its budget: later circles' free space
    /// depends on all earlier ones, so a partial set is never resumed.
    pub fn place<R: Rng + ?Sized>(
        &self,
        radii: &[u32],
        rng: &mut R,
    ) -> Result<Vec<Placement>, AttemptFailure> {
        let mut placed = Vec::<Placement>::with_capacity(radii.len());
        for (id, &radius) in radii.iter().enumerate() {
            let Some((x, y)) = self.find_spot(radius, &placed, rng) else {
                return Err(AttemptFailure::PlacementExhausted { index: id, radius });
            };
            let Some(&color) = self.params.palette.choose(rng) else {
                return Err(AttemptFailure::EmptyPalette);
            };
            placed.push(Placement {
                id,
                radius,
                color,
                x,
                y,
            });
        }
        Ok(placed)
    }

    fn find_spot<R: Rng + ?Sized>(
        &self,
        radius: u32,
        placed: &[Placement],
        rng: &mut R,
    ) -> Option<(i64, i64)> {
        let inset = i64::from(self.params.margin) + i64::from(radius);
        let (x_lo, x_hi) = (inset, i64::from(self.params.canvas.width) - inset);
        let (y_lo, y_hi) = (inset, i64::from(self.params.canvas.height) - inset);
        if x_lo > x_hi || y_lo > y_hi {
            return None;
        }

        for _ in 0..self.params.placement_attempts {
            let x = rng.gen_range(x_lo..=x_hi);
            let y = rng.gen_range(y_lo..=y_hi);
            if !overlaps(x, y, radius, placed, self.params.padding) {
                return Some((x, y));
            }
        }
        None
    }
}

/// `true` when a circle at `(x, y)` comes closer than `r_i + r_j + padding` to any placed circle.
///
/// Compares squared distances; everything stays in integers.
pub fn overlaps(x: i64, y: i64, radius: u32, placed: &[Placement], padding: u32) -> bool {
    placed.iter().any(|c| {
        let dx = x - c.x;
        let dy = y - c.y;
        let min = i64::from(radius) + i64::from(c.radius) + i64::from(padding);
        dx * dx + dy * dy < min * min
    })
}

#[cfg(test)]
#[path = "../../tests/unit/sample/placement.rs"]
mod tests;
