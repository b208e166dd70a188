use crate::config::settings::SceneParams;
use crate::foundation::core::{Point, Rgb8};
use crate::foundation::error::{SceneError, SceneResult};

/// One circle of a scene, with both its scattered and its sorted position.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Circle {
    /// Placement order, unique within the scene.
    pub id: usize,
    pub radius: u32,
    pub color: Rgb8,
    #[serde(rename = "initial_position")]
    pub initial: Point,
    #[serde(rename = "final_position")]
    pub final_pos: Point,
}

impl Circle {
    /// `2πr`. Derived on demand, never stored.
    pub fn circumference(&self) -> f64 {
        std::f64::consts::TAU * f64::from(self.radius)
    }
}

/// A complete before/after arrangement.
///
/// Built in one shot by [`crate::SceneBuilder`] and immutable afterwards.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Scene {
    circles: Vec<Circle>,
    line_y: i64,
    final_order: Vec<usize>,
}

impl Scene {
    /// Assemble a scene, checking ids run `0..n` in order and `final_order` is a permutation.
    pub fn new(circles: Vec<Circle>, line_y: i64, final_order: Vec<usize>) -> SceneResult<Self> {
        for (idx, c) in circles.iter().enumerate() {
            if c.id != idx {
                return Err(SceneError::validation(format!(
                    "circle ids must be sequential: found id {} at index {idx}",
                    c.id
                )));
            }
        }
        if final_order.len() != circles.len() {
            return Err(SceneError::validation(
                "final order length does not match circle count",
            ));
        }
        let mut seen = vec![false; circles.len()];
        for &id in &final_order {
            match seen.get_mut(id) {
                Some(slot) if !*slot => *slot = true,
                _ => {
                    return Err(SceneError::validation(format!(
                        "final order is not a permutation (id {id})"
                    )));
                }
            }
        }
        Ok(Self {
            circles,
            line_y,
            final_order,
        })
    }

    /// Builder-side constructor; ids and order come straight from placement and layout.
    pub(crate) fn assemble(circles: Vec<Circle>, line_y: i64, final_order: Vec<usize>) -> Self {
        Self {
            circles,
            line_y,
            final_order,
        }
    }

    /// Circles in id order.
    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    pub fn count(&self) -> usize {
        self.circles.len()
    }

    /// Shared y coordinate of the sorted row.
    pub fn line_y(&self) -> i64 {
        self.line_y
    }

    /// Circle ids from left to right in the sorted row.
    pub fn final_order(&self) -> &[usize] {
        &self.final_order
    }

    /// Circles from left to right in the sorted row.
    pub fn sorted(&self) -> impl Iterator<Item = &Circle> + '_ {
        self.final_order.iter().map(|&id| &self.circles[id])
    }

    /// Check every geometric invariant of an accepted scene against `params`.
    ///
    /// Returns the first violation found, described in words.
    pub fn verify(&self, params: &SceneParams) -> Result<(), String> {
        let eps = 1e-6;
        for (i, a) in self.circles.iter().enumerate() {
            if a.radius < params.min_radius || a.radius > params.max_radius {
                return Err(format!("circle {i} radius {} out of range", a.radius));
            }
            for b in &self.circles[i + 1..] {
                if a.radius.abs_diff(b.radius) < params.min_radius_gap.max(1) {
                    return Err(format!(
                        "circles {} and {} radii too close ({} vs {})",
                        a.id, b.id, a.radius, b.radius
                    ));
                }
                let min_dist = f64::from(a.radius + b.radius + params.padding);
                if a.initial.distance(b.initial) < min_dist {
                    return Err(format!("circles {} and {} overlap", a.id, b.id));
                }
            }
        }

        let sorted: Vec<&Circle> = self.sorted().collect();
        for pair in sorted.windows(2) {
            let (big, small) = (pair[0], pair[1]);
            if big.circumference() < small.circumference() {
                return Err(format!("row not descending at circle {}", small.id));
            }
            let ratio = f64::from(big.radius) / f64::from(small.radius);
            if ratio < params.min_radius_ratio - eps {
                return Err(format!(
                    "ratio {ratio:.4} between circles {} and {} below minimum",
                    big.id, small.id
                ));
            }
        }

        let width: i64 = sorted.iter().map(|c| 2 * i64::from(c.radius)).sum::<i64>()
            + sorted.len().saturating_sub(1) as i64 * i64::from(params.spacing);
        if width > params.row_budget() {
            return Err(format!("row width {width} exceeds {}", params.row_budget()));
        }
        for c in &sorted {
            if c.final_pos.y != self.line_y as f64 {
                return Err(format!("circle {} is off the row", c.id));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
