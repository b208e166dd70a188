use crate::config::settings::SceneParams;
use crate::foundation::math::geometric_sum;
use crate::layout::row::row_width;
use rand::Rng;

/// Widest ratio spread above `min_radius_ratio` a draw may use.
pub const RATIO_SPREAD: f64 = 0.18;
/// Hard ceiling on the drawn progression ratio.
pub const RATIO_CAP: f64 = 1.35;
/// Tolerance when re-checking the ratio invariant on integer radii.
pub const RATIO_EPS: f64 = 1e-6;

/// Draws radius sets that stay distinguishable when lined up by size.
///
/// Radii are modelled as a geometric progression `r_min * ratio^i`, rounded to integers and then
/// pushed up greedily so every neighbour keeps both the absolute gap and the ratio step.
#[derive(Clone, Copy, Debug)]
pub struct RadiusSetSampler<'a> {
    params: &'a SceneParams,
}

impl<'a> RadiusSetSampler<'a> {
    pub fn new(params: &'a SceneParams) -> Self {
        Self { params }
    }

    /// Sample `n` radii in descending order, or `None` once the attempt budget is spent.
    ///
    /// Never changes `n`; reducing the count is up to the caller.
    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Option<Vec<u32>> {
        if n == 0 {
            return None;
        }
        (0..self.params.radius_attempts).find_map(|_| self.try_once(n, rng))
    }

    /// Inclusive range the progression ratio is drawn from.
    pub fn ratio_range(&self) -> (f64, f64) {
        let lo = self.params.min_radius_ratio;
        let hi = (lo + RATIO_SPREAD).min(RATIO_CAP).max(lo);
        (lo, hi)
    }

    fn try_once<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Option<Vec<u32>> {
        let p = self.params;
        let (lo, hi) = self.ratio_range();
        let ratio = if hi > lo { rng.gen_range(lo..=hi) } else { lo };

        let width_bound = p.diameter_budget(n) / (2.0 * geometric_sum(ratio, n));
        let max_bound = f64::from(p.max_radius) / ratio.powi(n as i32 - 1);
        let upper = width_bound.min(max_bound);
        let lower = f64::from(p.min_radius);
        if upper.is_nan() || upper < lower {
            return None;
        }
        let r_min = if upper > lower {
            rng.gen_range(lower..=upper)
        } else {
            lower
        };

        let step = p.min_radius_gap.max(1);
        let mut radii = Vec::with_capacity(n);
        let mut scale = r_min;
        let mut prev: Option<u32> = None;
        for _ in 0..n {
            let mut r = (scale.round() as u32).max(p.min_radius);
            if let Some(prev) = prev {
                let by_gap = prev.saturating_add(step);
                let by_ratio = (f64::from(prev) * p.min_radius_ratio - RATIO_EPS).ceil() as u32;
                r = r.max(by_gap).max(by_ratio);
            }
            if r > p.max_radius {
                return None;
            }
            radii.push(r);
            prev = Some(r);
            scale *= ratio;
        }
        radii.reverse();

        if !meets_ratio(&radii, p.min_radius_ratio) {
            return None;
        }
        if row_width(&radii, p.spacing) > p.row_budget() {
            return None;
        }
        Some(radii)
    }
}

/// `true` when each neighbour pair of a descending list keeps `big / small >= ratio`.
pub fn meets_ratio(desc: &[u32], ratio: f64) -> bool {
    desc.windows(2)
        .all(|w| w[1] > 0 && f64::from(w[0]) / f64::from(w[1]) >= ratio - RATIO_EPS)
}

#[cfg(test)]
#[path = "../../tests/unit/sample/radii.rs"]
mod tests;
