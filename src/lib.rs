//! Circle-arrange synthesizes paired "before/after" scenes for a supervised-learning dataset.
//!
//! The "before" state is a set of non-overlapping circles scattered over the canvas; the
//! "after" state is the same circles lined up on one horizontal row, largest circumference first.
//! An eased animation between the two can be exported as MP4 (system `ffmpeg`) or GIF.
//!
//! # Pipeline overview
//!
//! 1. **Sample radii**: [`RadiusSetSampler`] draws radii that stay distinguishable when sorted
//! 2. **Place**: [`PlacementSampler`] scatters them by rejection sampling
//! 3. **Lay out**: [`compute_row`] sorts by circumference and centers the row
//! 4. **Build**: [`SceneBuilder`] retries whole attempts until a scene is feasible
//! 5. **Deduplicate**: [`generate_unique`] rejects repeats via a [`SignatureStore`]
//! 6. **Animate**: [`Interpolator`] yields hold / smoothstep transition / hold frames
//! 7. **Export** (optional): [`render_to_sink`] streams frames into a [`FrameSink`]
//!
//! Sampling is pure and seed-deterministic: the same seed and configuration always give the
//! same scenes. Every retry budget is finite; exhausted scene generation is reported as
//! [`SceneError::GenerationExhausted`] instead of a silently broken scene.
#![forbid(unsafe_code)]

mod animation;
mod config;
mod encode;
mod foundation;
mod layout;
mod render;
mod sample;
mod scene;
mod task;

pub use animation::ease::Ease;
pub use animation::interp::{FrameCircle, FrameDesc, FramePhase, Frames, Interpolator, pose};
pub use animation::timing::FrameBudget;
pub use config::settings::{
    AnimationTiming, CANVAS_MARGIN, DEFAULT_PALETTE, GenerationConfig, PLACEMENT_PADDING,
    SceneParams,
};
pub use encode::export::{VideoBackend, VideoOutput, encode_with, export_video, resolve_backend};
pub use encode::ffmpeg::{
    FfmpegSink, FfmpegSinkOpts, ensure_parent_dir, is_ffmpeg_on_path, validate_mp4_config,
};
pub use encode::gif::GifSink;
pub use encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use foundation::core::{Canvas, Fps, Point, Rgb8};
pub use foundation::error::{AttemptFailure, SceneError, SceneResult};
pub use layout::row::{RowLayout, compute_row, row_width};
pub use render::pipeline::{
    RenderStats, RenderThreading, render_endpoints, render_frame, render_to_sink,
};
pub use render::raster::{BACKGROUND, FrameRGBA, OUTLINE_COLOR, OUTLINE_WIDTH, render_circles};
pub use sample::placement::{Placement, PlacementSampler, overlaps};
pub use sample::radii::{RATIO_CAP, RATIO_EPS, RATIO_SPREAD, RadiusSetSampler, meets_ratio};
pub use scene::builder::SceneBuilder;
pub use scene::dedup::{SignatureStore, UniqueScene, generate_unique};
pub use scene::model::{Circle, Scene};
pub use scene::signature::SceneSignature;
pub use task::generator::{
    DatasetSummary, FINAL_FRAME_FILE, FIRST_FRAME_FILE, METADATA_FILE, PROMPT_FILE, SkippedTask,
    TaskGenerator, TaskMetadata, TaskPair, VIDEO_STEM,
};
pub use task::prompt::prompt_for;
