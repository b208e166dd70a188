/// Convenience result type used across the crate.
pub type SceneResult<T> = Result<T, SceneError>;

/// Why a single scene attempt was thrown away.
///
/// These are expected, recoverable outcomes of probabilistic sampling. They only surface to
/// callers inside [`SceneError::GenerationExhausted`], describing the last attempt made.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttemptFailure {
    /// No radius set satisfied the gap/ratio/width constraints, even after reducing the count.
    InfeasibleCount {
        /// Smallest circle count that was tried.
        count: usize,
    },
    /// A circle could not be placed without overlap within its rejection budget.
    PlacementExhausted {
        /// Placement index of the circle that failed.
        index: usize,
        /// Radius of the circle that failed.
        radius: u32,
    },
    /// The sorted row did not fit between the canvas margins.
    LayoutOverflow {
        /// Width of the row in pixels.
        total_width: i64,
        /// Width available between the margins.
        available: i64,
    },
    /// The palette had no colors to draw from.
    EmptyPalette,
}

impl std::fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::InfeasibleCount { count } => {
                write!(f, "no feasible radius set down to {count} circles")
            }
            Self::PlacementExhausted { index, radius } => {
                write!(f, "could not place circle #{index} (radius {radius})")
            }
            Self::LayoutOverflow {
                total_width,
                available,
            } => write!(f, "row width {total_width}px exceeds {available}px"),
            Self::EmptyPalette => f.write_str("circle palette is empty"),
        }
    }
}

/// Top-level error taxonomy used by the generation APIs.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// Invalid user-provided configuration or input data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The scene builder ran out of attempts without a feasible scene.
    #[error("generation exhausted after {attempts} attempts: {last}")]
    GenerationExhausted {
        /// Number of whole-scene attempts made.
        attempts: u32,
        /// Failure of the final attempt.
        last: AttemptFailure,
    },

    /// Errors while rasterising frames.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while exporting frames to a video container.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SceneError {
    /// Build a [`SceneError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SceneError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SceneError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`SceneError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for the degraded-result signal callers are expected to skip and report.
    pub fn is_generation_exhausted(&self) -> bool {
        matches!(self, Self::GenerationExhausted { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
