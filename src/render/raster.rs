use crate::animation::interp::FrameCircle;
use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::{SceneError, SceneResult};
use anyhow::Context as _;
use std::path::Path;

/// Outline drawn inside the edge of every circle, in pixels.
pub const OUTLINE_WIDTH: f64 = 2.0;
pub const OUTLINE_COLOR: Rgb8 = Rgb8::BLACK;
pub const BACKGROUND: Rgb8 = Rgb8::WHITE;

/// A rendered frame in CPU memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Opaque RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    pub fn filled(canvas: Canvas, color: Rgb8) -> Self {
        let px = color.to_rgba();
        let len = canvas.width as usize * canvas.height as usize;
        let mut data = Vec::with_capacity(len * 4);
        for _ in 0..len {
            data.extend_from_slice(&px);
        }
        Self {
            width: canvas.width,
            height: canvas.height,
            data,
        }
    }

    pub fn to_image(&self) -> SceneResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| SceneError::render("frame buffer size does not match width*height*4"))
    }

    pub fn save_png(&self, path: &Path) -> SceneResult<()> {
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

/// Draw filled circles with a dark outline over a white canvas.
///
/// Pixels are sampled at their centers; a pixel belongs to a circle when its center lies within
/// the radius, and to the outline when it is within [`OUTLINE_WIDTH`] of the edge.
pub fn render_circles(canvas: Canvas, circles: &[FrameCircle]) -> FrameRGBA {
    let mut frame = FrameRGBA::filled(canvas, BACKGROUND);
    for c in circles {
        fill_circle(&mut frame, c);
    }
    frame
}

fn fill_circle(frame: &mut FrameRGBA, c: &FrameCircle) {
    let r = f64::from(c.radius);
    if r <= 0.0 {
        return;
    }
    let inner = (r - OUTLINE_WIDTH).max(0.0);
    let (r2, inner2) = (r * r, inner * inner);

    let x0 = (c.center.x - r).floor().max(0.0) as u32;
    let y0 = (c.center.y - r).floor().max(0.0) as u32;
    let x1 = ((c.center.x + r).ceil().max(0.0) as u32).min(frame.width);
    let y1 = ((c.center.y + r).ceil().max(0.0) as u32).min(frame.height);

    let fill = c.color.to_rgba();
    let outline = OUTLINE_COLOR.to_rgba();
    let stride = frame.width as usize * 4;
    for y in y0..y1 {
        let dy = f64::from(y) + 0.5 - c.center.y;
        let row = y as usize * stride;
        for x in x0..x1 {
            let dx = f64::from(x) + 0.5 - c.center.x;
            let d2 = dx * dx + dy * dy;
            if d2 > r2 {
                continue;
            }
            let px = if d2 >= inner2 { outline } else { fill };
            let i = row + x as usize * 4;
            frame.data[i..i + 4].copy_from_slice(&px);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
