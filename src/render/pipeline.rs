use std::collections::HashMap;

use rayon::prelude::*;

use crate::{
    animation::interp::{FrameDesc, pose},
    encode::sink::{FrameSink, SinkConfig},
    foundation::core::{Canvas, Fps},
    foundation::error::SceneResult,
    render::raster::{FrameRGBA, render_circles},
    scene::model::Scene,
};

#[derive(Clone, Debug)]
/// Threading and chunking controls for multi-frame rendering.
pub struct RenderThreading {
    /// Render each chunk on the rayon pool when `true`.
    pub parallel: bool,
    /// Frames buffered per chunk; bounds peak memory.
    pub chunk_size: usize,
    /// Rasterise frames with identical poses once per chunk.
    pub static_frame_elision: bool,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: true,
            chunk_size: 16,
            static_frame_elision: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Aggregated rendering counters.
pub struct RenderStats {
    /// Frames pushed to the sink.
    pub frames_total: u64,
    /// Frames that were actually rasterised.
    pub frames_rendered: u64,
    /// Frames reused from an identical pose in the same chunk.
    pub frames_elided: u64,
}

pub fn render_frame(canvas: Canvas, desc: &FrameDesc) -> FrameRGBA {
    render_circles(canvas, &desc.circles)
}

/// Render the scattered ("first") and sorted ("final") states.
pub fn render_endpoints(scene: &Scene, canvas: Canvas) -> (FrameRGBA, FrameRGBA) {
    (
        render_circles(canvas, &pose(scene, 0.0)),
        render_circles(canvas, &pose(scene, 1.0)),
    )
}

/// Rasterise `frames` chunk by chunk and push them to `sink` in order.
pub fn render_to_sink<I>(
    frames: I,
    canvas: Canvas,
    fps: Fps,
    threading: &RenderThreading,
    sink: &mut dyn FrameSink,
) -> SceneResult<RenderStats>
where
    I: IntoIterator<Item = FrameDesc>,
{
    sink.begin(SinkConfig {
        width: canvas.width,
        height: canvas.height,
        fps,
    })?;

    let chunk_size = threading.chunk_size.max(1);
    let mut stats = RenderStats::default();
    let mut frames = frames.into_iter().peekable();
    while frames.peek().is_some() {
        let chunk: Vec<FrameDesc> = frames.by_ref().take(chunk_size).collect();

        let mut unique = Vec::<usize>::with_capacity(chunk.len());
        let mut frame_to_unique = Vec::<usize>::with_capacity(chunk.len());
        if threading.static_frame_elision {
            let mut first = HashMap::<u64, usize>::new();
            for (idx, desc) in chunk.iter().enumerate() {
                let slot = *first.entry(desc.blend.to_bits()).or_insert_with(|| {
                    unique.push(idx);
                    unique.len() - 1
                });
                frame_to_unique.push(slot);
            }
        } else {
            unique.extend(0..chunk.len());
            frame_to_unique.extend(0..chunk.len());
        }

        let rendered: Vec<FrameRGBA> = if threading.parallel {
            unique
                .par_iter()
                .map(|&idx| render_frame(canvas, &chunk[idx]))
                .collect()
        } else {
            unique
                .iter()
                .map(|&idx| render_frame(canvas, &chunk[idx]))
                .collect()
        };

        for (desc, &slot) in chunk.iter().zip(&frame_to_unique) {
            sink.push_frame(desc.index, &rendered[slot])?;
        }
        stats.frames_total += chunk.len() as u64;
        stats.frames_rendered += rendered.len() as u64;
    }
    stats.frames_elided = stats.frames_total - stats.frames_rendered;

    sink.end()?;
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
