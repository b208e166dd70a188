use crate::config::settings::{AnimationTiming, GenerationConfig};
use crate::encode::export::{VideoBackend, VideoOutput, export_video, resolve_backend};
use crate::foundation::core::Canvas;
use crate::foundation::error::{SceneError, SceneResult};
use crate::foundation::math::mix_seed;
use crate::render::pipeline::{RenderThreading, render_endpoints};
use crate::render::raster::FrameRGBA;
use crate::scene::builder::SceneBuilder;
use crate::scene::dedup::{SignatureStore, generate_unique};
use crate::scene::model::{Circle, Scene};
use crate::task::prompt::prompt_for;
use anyhow::Context as _;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

pub const FIRST_FRAME_FILE: &str = "first_frame.png";
pub const FINAL_FRAME_FILE: &str = "final_frame.png";
pub const PROMPT_FILE: &str = "prompt.txt";
pub const METADATA_FILE: &str = "metadata.json";
/// Stem of the ground-truth video; the extension depends on the encoder used.
pub const VIDEO_STEM: &str = "ground_truth";

/// Per-task metadata exported verbatim for downstream consumers.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TaskMetadata {
    pub task_id: String,
    pub domain: String,
    pub num_circles: usize,
    pub line_y: i64,
    /// Circle ids from left to right in the sorted row.
    pub final_order: Vec<usize>,
    pub signature: String,
    /// `false` when the scene repeats an earlier one of this session.
    pub unique: bool,
    pub circles: Vec<Circle>,
}

impl TaskMetadata {
    fn new(task_id: &str, domain: &str, scene: &Scene, signature: String, unique: bool) -> Self {
        Self {
            task_id: task_id.to_string(),
            domain: domain.to_string(),
            num_circles: scene.count(),
            line_y: scene.line_y(),
            final_order: scene.final_order().to_vec(),
            signature,
            unique,
            circles: scene.circles().to_vec(),
        }
    }
}

/// One generated task: both endpoint images, the prompt and the optional animation.
#[derive(Clone, Debug)]
pub struct TaskPair {
    pub task_id: String,
    pub prompt: String,
    pub first_image: FrameRGBA,
    pub final_image: FrameRGBA,
    pub video: Option<VideoOutput>,
    pub metadata: TaskMetadata,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SkippedTask {
    pub task_id: String,
    pub reason: String,
}

/// Outcome of [`TaskGenerator::generate_dataset`].
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct DatasetSummary {
    /// Directories of written tasks, in task order.
    pub written: Vec<PathBuf>,
    /// Tasks whose scene generation ran out of attempts.
    pub skipped: Vec<SkippedTask>,
    /// Written tasks that had to accept a repeated scene.
    pub duplicates: u32,
}

/// Drives scene generation, rendering and export for a whole dataset.
///
/// Owns the session's [`SignatureStore`]; one generator is one deduplication session.
#[derive(Debug)]
pub struct TaskGenerator {
    config: GenerationConfig,
    canvas: Canvas,
    builder: SceneBuilder,
    timing: AnimationTiming,
    threading: RenderThreading,
    store: SignatureStore,
    seed: u64,
    video_backend: VideoBackend,
}

impl TaskGenerator {
    /// Validate `config` once, up front; nothing downstream re-validates.
    pub fn new(config: GenerationConfig) -> SceneResult<Self> {
        let params = config.scene_params()?;
        let timing = config.timing()?;
        let seed = config.random_seed.unwrap_or_else(rand::random);
        let video_backend = if config.generate_videos {
            resolve_backend(config.video_backend, params.canvas)
        } else {
            config.video_backend
        };
        tracing::info!(seed, domain = %config.domain, ?video_backend, "task generator ready");
        Ok(Self {
            canvas: params.canvas,
            builder: SceneBuilder::new(params)?,
            timing,
            threading: RenderThreading::default(),
            store: SignatureStore::new(),
            seed,
            video_backend,
            config,
        })
    }

    pub fn with_threading(mut self, threading: RenderThreading) -> Self {
        self.threading = threading;
        self
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Backend every task exports with, settled once at construction.
    pub fn video_backend(&self) -> VideoBackend {
        self.video_backend
    }

    pub fn store(&self) -> &SignatureStore {
        &self.store
    }

    /// Base seed actually in use (drawn from entropy when the config has none).
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn task_id(&self, index: u32) -> String {
        format!("{}_{index:04}", self.config.domain)
    }

    pub fn task_dir(&self, task_id: &str) -> PathBuf {
        self.config
            .output_dir
            .join(format!("{}_task", self.config.domain))
            .join(task_id)
    }

    /// Independent RNG stream for task `index`, stable regardless of scheduling.
    pub fn rng_for(&self, index: u32) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(mix_seed(self.seed, u64::from(index)))
    }

    /// Build a unique scene, render its endpoints and, if enabled, export the animation.
    #[tracing::instrument(skip(self))]
    pub fn generate_task_pair(&self, index: u32) -> SceneResult<TaskPair> {
        let task_id = self.task_id(index);
        let mut rng = self.rng_for(index);
        let unique = generate_unique(
            &self.builder,
            &self.store,
            &mut rng,
            self.config.dedup_attempts,
        )?;
        let scene = &unique.scene;

        let (first_image, final_image) = render_endpoints(scene, self.canvas);
        let video = if self.config.generate_videos {
            let stem = self.task_dir(&task_id).join(VIDEO_STEM);
            Some(export_video(
                scene,
                self.canvas,
                &self.timing,
                &self.threading,
                &stem,
                self.video_backend,
            )?)
        } else {
            None
        };

        Ok(TaskPair {
            prompt: prompt_for(scene.count()),
            metadata: TaskMetadata::new(
                &task_id,
                &self.config.domain,
                scene,
                unique.signature.to_hex(),
                unique.fresh,
            ),
            task_id,
            first_image,
            final_image,
            video,
        })
    }

    /// Persist images, prompt and metadata next to the (already written) video.
    pub fn write_task(&self, pair: &TaskPair) -> SceneResult<PathBuf> {
        let dir = self.task_dir(&pair.task_id);
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create task dir '{}'", dir.display()))?;

        pair.first_image.save_png(&dir.join(FIRST_FRAME_FILE))?;
        pair.final_image.save_png(&dir.join(FINAL_FRAME_FILE))?;
        write_text(&dir.join(PROMPT_FILE), &pair.prompt)?;

        let json = serde_json::to_string_pretty(&pair.metadata)
            .map_err(|e| SceneError::serde(format!("serialize task metadata: {e}")))?;
        write_text(&dir.join(METADATA_FILE), &json)?;
        Ok(dir)
    }

    /// Generate and write `num_samples` tasks.
    ///
    /// Tasks whose scene generation is exhausted are skipped and reported; any other error
    /// aborts the run.
    #[tracing::instrument(skip(self), fields(samples = self.config.num_samples))]
    pub fn generate_dataset(&self) -> SceneResult<DatasetSummary> {
        let run_one = |index: u32| -> SceneResult<(String, Option<(PathBuf, bool)>)> {
            let task_id = self.task_id(index);
            match self.generate_task_pair(index) {
                Ok(pair) => {
                    let dir = self.write_task(&pair)?;
                    Ok((task_id, Some((dir, pair.metadata.unique))))
                }
                Err(e) if e.is_generation_exhausted() => {
                    tracing::warn!(%task_id, error = %e, "skipping task");
                    Ok((task_id, None))
                }
                Err(e) => Err(e),
            }
        };

        let outcomes: Vec<SceneResult<_>> = if self.config.parallel {
            (0..self.config.num_samples)
                .into_par_iter()
                .map(run_one)
                .collect()
        } else {
            (0..self.config.num_samples).map(run_one).collect()
        };

        let mut summary = DatasetSummary::default();
        for outcome in outcomes {
            match outcome? {
                (_, Some((dir, unique))) => {
                    summary.written.push(dir);
                    if !unique {
                        summary.duplicates += 1;
                    }
                }
                (task_id, None) => summary.skipped.push(SkippedTask {
                    task_id,
                    reason: "scene generation exhausted".to_string(),
                }),
            }
        }
        tracing::info!(
            written = summary.written.len(),
            skipped = summary.skipped.len(),
            duplicates = summary.duplicates,
            "dataset complete"
        );
        Ok(summary)
    }
}

fn write_text(path: &Path, text: &str) -> SceneResult<()> {
    std::fs::write(path, text).with_context(|| format!("write '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/task/generator.rs"]
mod tests;
