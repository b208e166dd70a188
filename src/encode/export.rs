use crate::animation::interp::Interpolator;
use crate::config::settings::AnimationTiming;
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
use crate::encode::gif::GifSink;
use crate::encode::sink::FrameSink;
use crate::foundation::core::Canvas;
use crate::foundation::error::SceneResult;
use crate::render::pipeline::{RenderStats, RenderThreading, render_to_sink};
use crate::scene::model::Scene;
use std::path::{Path, PathBuf};

/// Container backend for exported animations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoBackend {
    /// MP4 through `ffmpeg` when possible, GIF otherwise.
    #[default]
    Auto,
    Ffmpeg,
    Gif,
}

/// Result of a successful [`export_video`].
#[derive(Clone, Debug, PartialEq)]
pub struct VideoOutput {
    pub path: PathBuf,
    pub backend: VideoBackend,
    pub stats: RenderStats,
}

/// Settle [`VideoBackend::Auto`] for a whole run: MP4 only when the canvas is even-sized and
/// `ffmpeg` answers on `PATH`. Explicit backends pass through untouched.
pub fn resolve_backend(requested: VideoBackend, canvas: Canvas) -> VideoBackend {
    match requested {
        VideoBackend::Auto if !mp4_sized(canvas) || !is_ffmpeg_on_path() => VideoBackend::Gif,
        other => other,
    }
}

fn mp4_sized(canvas: Canvas) -> bool {
    canvas.width.is_multiple_of(2) && canvas.height.is_multiple_of(2)
}

/// Render the scene's animation and encode it next to `out_stem` (extension is replaced).
///
/// With [`VideoBackend::Auto`], an MP4 is attempted first on even-sized canvases; any failure
/// there (including a missing `ffmpeg`) falls back to an animated GIF. Runs exporting many
/// videos should settle the backend once with [`resolve_backend`].
#[tracing::instrument(skip(scene, timing, threading), fields(circles = scene.count()))]
pub fn export_video(
    scene: &Scene,
    canvas: Canvas,
    timing: &AnimationTiming,
    threading: &RenderThreading,
    out_stem: &Path,
    backend: VideoBackend,
) -> SceneResult<VideoOutput> {
    let try_mp4 = match backend {
        VideoBackend::Ffmpeg => true,
        VideoBackend::Gif => false,
        VideoBackend::Auto => mp4_sized(canvas),
    };

    if try_mp4 {
        let path = out_stem.with_extension("mp4");
        let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&path));
        match encode_with(scene, canvas, timing, threading, &mut sink) {
            Ok(stats) => {
                return Ok(VideoOutput {
                    path,
                    backend: VideoBackend::Ffmpeg,
                    stats,
                });
            }
            Err(e) if backend == VideoBackend::Auto => {
                tracing::warn!(error = %e, "mp4 export failed; falling back to gif");
                if let Err(e) = std::fs::remove_file(&path)
                    && e.kind() != std::io::ErrorKind::NotFound
                {
                    tracing::debug!(error = %e, path = %path.display(), "partial mp4 left behind");
                }
            }
            Err(e) => return Err(e),
        }
    }

    let path = out_stem.with_extension("gif");
    let mut sink = GifSink::new(&path);
    let stats = encode_with(scene, canvas, timing, threading, &mut sink)?;
    Ok(VideoOutput {
        path,
        backend: VideoBackend::Gif,
        stats,
    })
}

/// Stream the scene's animation frames into an arbitrary sink.
pub fn encode_with(
    scene: &Scene,
    canvas: Canvas,
    timing: &AnimationTiming,
    threading: &RenderThreading,
    sink: &mut dyn FrameSink,
) -> SceneResult<RenderStats> {
    let frames = Interpolator::new(scene, timing)?.frames();
    render_to_sink(frames, canvas, timing.fps, threading, sink)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/export.rs"]
mod tests;
