use crate::encode::ffmpeg::ensure_parent_dir;
use crate::encode::sink::{FrameSink, SinkConfig, check_frame};
use crate::foundation::error::{SceneError, SceneResult};
use crate::render::raster::FrameRGBA;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

/// Animated GIF sink, used when `ffmpeg` is unavailable.
///
/// Each frame is shown for `1000 / fps` milliseconds and the animation loops forever.
pub struct GifSink {
    out_path: PathBuf,
    encoder: Option<GifEncoder<BufWriter<File>>>,
    cfg: Option<SinkConfig>,
    last_idx: Option<usize>,
}

impl GifSink {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            encoder: None,
            cfg: None,
            last_idx: None,
        }
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> SceneResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(SceneError::validation(
                "gif sink width/height must be non-zero",
            ));
        }
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(SceneError::validation(
                "gif sink width/height must fit in 16 bits",
            ));
        }
        ensure_parent_dir(&self.out_path)?;
        let file = File::create(&self.out_path).map_err(|e| {
            SceneError::encode(format!(
                "create gif '{}': {e}",
                self.out_path.display()
            ))
        })?;
        let mut encoder = GifEncoder::new(BufWriter::new(file));
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| SceneError::encode(format!("gif set_repeat: {e}")))?;

        self.encoder = Some(encoder);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: usize, frame: &FrameRGBA) -> SceneResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| SceneError::encode("gif sink not started"))?;
        check_frame(cfg, self.last_idx, idx, frame)?;
        self.last_idx = Some(idx);

        let (numer, denom) = cfg.fps.frame_delay_ms();
        let delay = Delay::from_numer_denom_ms(numer, denom);
        let buffer = frame.to_image()?;
        let Some(encoder) = self.encoder.as_mut() else {
            return Err(SceneError::encode("gif sink is already finalized"));
        };
        encoder
            .encode_frame(Frame::from_parts(buffer, 0, 0, delay))
            .map_err(|e| SceneError::encode(format!("gif encode frame {idx}: {e}")))?;
        Ok(())
    }

    fn end(&mut self) -> SceneResult<()> {
        // Dropping the encoder writes the GIF trailer and flushes the file.
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| SceneError::encode("gif sink not started"))?;
        drop(encoder);
        self.cfg = None;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
