use crate::foundation::math::smoothstep;

/// Easing curve applied to normalized transition progress.
///
/// Every variant maps `[0, 1]` monotonically onto `[0, 1]` with `apply(0) == 0` and
/// `apply(1) == 1`, so eased positions never overshoot their endpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    /// `t^2 (3 - 2t)`: zero velocity at both ends.
    #[default]
    Smoothstep,
    InOutCubic,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Smoothstep => smoothstep(t),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
