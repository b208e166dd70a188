use crate::animation::ease::Ease;
use crate::animation::timing::FrameBudget;
use crate::encode::export::VideoBackend;
use crate::foundation::core::{Canvas, Fps, Rgb8};
use crate::foundation::error::{SceneError, SceneResult};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Distance kept between every circle and the canvas edge, in both states.
pub const CANVAS_MARGIN: u32 = 100;
/// Extra clearance required between two scattered circles.
pub const PLACEMENT_PADDING: u32 = 10;

/// Default palette: ten saturated colors, picked with replacement.
pub const DEFAULT_PALETTE: [Rgb8; 10] = [
    Rgb8::new(255, 100, 100),
    Rgb8::new(100, 255, 100),
    Rgb8::new(100, 100, 255),
    Rgb8::new(255, 255, 100),
    Rgb8::new(255, 100, 255),
    Rgb8::new(100, 255, 255),
    Rgb8::new(255, 150, 50),
    Rgb8::new(150, 255, 50),
    Rgb8::new(50, 150, 255),
    Rgb8::new(200, 200, 200),
];

/// User-facing generation settings, loaded from JSON.
///
/// Every field has a default, so a config file only lists what it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfig {
    /// Number of task pairs to produce.
    pub num_samples: u32,
    /// Task domain name, used for output directory naming and metadata.
    pub domain: String,
    /// Base seed. `None` draws one from OS entropy.
    pub random_seed: Option<u64>,
    /// Root directory for written tasks.
    pub output_dir: PathBuf,
    /// Canvas `(width, height)` in pixels.
    pub image_size: (u32, u32),

    /// Whether to render and encode the ground-truth animation.
    pub generate_videos: bool,
    pub video_backend: VideoBackend,
    pub video_fps: u32,
    /// Requested video length in seconds (capped at `max_video_secs`).
    pub video_duration: f64,
    pub max_video_secs: f64,
    pub max_transition_frames: u32,
    pub ease: Ease,

    pub min_circles: u32,
    pub max_circles: u32,
    pub min_radius: u32,
    pub max_radius: u32,
    /// Minimum absolute difference between any two radii.
    pub min_radius_gap: u32,
    /// Minimum ratio between neighbours in the sorted row.
    pub min_radius_ratio: f64,
    /// Gap between neighbouring circles in the sorted row.
    pub circle_spacing: u32,
    pub circle_colors: Vec<Rgb8>,

    pub generation_attempts: u32,
    pub radius_attempts: u32,
    pub count_reductions: u32,
    pub placement_attempts: u32,
    pub dedup_attempts: u32,

    /// Generate tasks on the rayon pool.
    pub parallel: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            num_samples: 50,
            domain: "arrange_circles_by_circumference".to_string(),
            random_seed: None,
            output_dir: PathBuf::from("data/questions"),
            image_size: (1024, 1024),
            generate_videos: true,
            video_backend: VideoBackend::Auto,
            video_fps: 10,
            video_duration: 8.0,
            max_video_secs: 5.0,
            max_transition_frames: 40,
            ease: Ease::Smoothstep,
            min_circles: 5,
            max_circles: 10,
            min_radius: 30,
            max_radius: 80,
            min_radius_gap: 4,
            min_radius_ratio: 1.15,
            circle_spacing: 20,
            circle_colors: DEFAULT_PALETTE.to_vec(),
            generation_attempts: 100,
            radius_attempts: 200,
            count_reductions: 5,
            placement_attempts: 1000,
            dedup_attempts: 200,
            parallel: false,
        }
    }
}

impl GenerationConfig {
    /// Parse a config from a JSON reader. Does not validate.
    pub fn from_reader<R: std::io::Read>(r: R) -> SceneResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| SceneError::validation(format!("parse config JSON: {e}")))
    }

    /// Parse a config from a JSON string. Does not validate.
    pub fn from_json_str(s: &str) -> SceneResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| SceneError::validation(format!("parse config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk. Does not validate.
    pub fn from_path(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SceneError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn canvas(&self) -> SceneResult<Canvas> {
        Canvas::new(self.image_size.0, self.image_size.1)
    }

    pub fn fps(&self) -> SceneResult<Fps> {
        Fps::new(self.video_fps, 1)
    }

    /// Reject configurations no amount of retrying can satisfy.
    pub fn validate(&self) -> SceneResult<()> {
        if self.domain.trim().is_empty() {
            return Err(SceneError::validation("domain must be non-empty"));
        }
        self.fps()?;
        if !self.video_duration.is_finite() || self.video_duration <= 0.0 {
            return Err(SceneError::validation("video_duration must be > 0"));
        }
        if !self.max_video_secs.is_finite() || self.max_video_secs <= 0.0 {
            return Err(SceneError::validation("max_video_secs must be > 0"));
        }
        if self.max_transition_frames < FrameBudget::MIN_TRANSITION as u32 {
            return Err(SceneError::validation(format!(
                "max_transition_frames must be >= {}",
                FrameBudget::MIN_TRANSITION
            )));
        }
        if self.dedup_attempts == 0 {
            return Err(SceneError::validation("dedup_attempts must be > 0"));
        }
        self.project_scene()?.validate()
    }

    /// Validate and project the scene-only settings.
    pub fn scene_params(&self) -> SceneResult<SceneParams> {
        self.validate()?;
        self.project_scene()
    }

    fn project_scene(&self) -> SceneResult<SceneParams> {
        Ok(SceneParams {
            canvas: self.canvas()?,
            margin: CANVAS_MARGIN,
            padding: PLACEMENT_PADDING,
            spacing: self.circle_spacing,
            min_circles: self.min_circles as usize,
            max_circles: self.max_circles as usize,
            min_radius: self.min_radius,
            max_radius: self.max_radius,
            min_radius_gap: self.min_radius_gap,
            min_radius_ratio: self.min_radius_ratio,
            palette: self.circle_colors.clone(),
            generation_attempts: self.generation_attempts,
            radius_attempts: self.radius_attempts,
            count_reductions: self.count_reductions,
            placement_attempts: self.placement_attempts,
        })
    }

    /// Validate and project the animation timing settings.
    pub fn timing(&self) -> SceneResult<AnimationTiming> {
        self.validate()?;
        Ok(AnimationTiming {
            fps: self.fps()?,
            duration_secs: self.video_duration,
            max_duration_secs: self.max_video_secs,
            max_transition_frames: self.max_transition_frames,
            ease: self.ease,
        })
    }
}

/// Geometry, palette and retry budgets consumed by the scene samplers.
///
/// Checked by [`SceneParams::validate`] before any sampling starts.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneParams {
    pub canvas: Canvas,
    pub margin: u32,
    pub padding: u32,
    pub spacing: u32,
    pub min_circles: usize,
    pub max_circles: usize,
    pub min_radius: u32,
    pub max_radius: u32,
    pub min_radius_gap: u32,
    pub min_radius_ratio: f64,
    pub palette: Vec<Rgb8>,
    pub generation_attempts: u32,
    pub radius_attempts: u32,
    pub count_reductions: u32,
    pub placement_attempts: u32,
}

impl SceneParams {
    /// Reject geometry, palettes and budgets the samplers cannot work with.
    pub fn validate(&self) -> SceneResult<()> {
        let (w, h) = (self.canvas.width, self.canvas.height);
        if w == 0 || h == 0 {
            return Err(SceneError::validation("canvas width/height must be non-zero"));
        }
        if u64::from(w) <= 2 * u64::from(self.margin) || u64::from(h) <= 2 * u64::from(self.margin) {
            return Err(SceneError::validation(format!(
                "canvas {w}x{h} leaves no room inside the {}px margin",
                self.margin
            )));
        }
        if self.min_circles == 0 {
            return Err(SceneError::validation("min_circles must be >= 1"));
        }
        if self.min_circles > self.max_circles {
            return Err(SceneError::validation(format!(
                "min_circles ({}) must be <= max_circles ({})",
                self.min_circles, self.max_circles
            )));
        }
        if self.min_radius == 0 {
            return Err(SceneError::validation("min_radius must be >= 1"));
        }
        if self.min_radius > self.max_radius {
            return Err(SceneError::validation(format!(
                "min_radius ({}) must be <= max_radius ({})",
                self.min_radius, self.max_radius
            )));
        }
        if !self.min_radius_ratio.is_finite() || self.min_radius_ratio < 1.0 {
            return Err(SceneError::validation(
                "min_radius_ratio must be a finite value >= 1.0",
            ));
        }
        if self.palette.is_empty() {
            return Err(SceneError::validation("circle palette must not be empty"));
        }
        for (name, v) in [
            ("generation_attempts", self.generation_attempts),
            ("radius_attempts", self.radius_attempts),
            ("placement_attempts", self.placement_attempts),
        ] {
            if v == 0 {
                return Err(SceneError::validation(format!("{name} must be > 0")));
            }
        }
        Ok(())
    }

    /// Width between the left and right margins.
    pub fn row_budget(&self) -> i64 {
        i64::from(self.canvas.width) - 2 * i64::from(self.margin)
    }

    /// Width left for diameters once `n - 1` spacings are taken out of the row budget.
    pub fn diameter_budget(&self, n: usize) -> f64 {
        let gaps = n.saturating_sub(1) as f64 * f64::from(self.spacing);
        self.row_budget() as f64 - gaps
    }
}

/// Timing inputs of the animation interpolator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationTiming {
    pub fps: Fps,
    pub duration_secs: f64,
    pub max_duration_secs: f64,
    pub max_transition_frames: u32,
    pub ease: Ease,
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            fps: Fps { num: 10, den: 1 },
            duration_secs: 8.0,
            max_duration_secs: 5.0,
            max_transition_frames: 40,
            ease: Ease::Smoothstep,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/settings.rs"]
mod tests;
