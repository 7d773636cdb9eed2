//! PNG surface - rasterises a render description onto a canvas.
//!
//! Each layer's image is scaled to its display width (nearest neighbour,
//! keeping pixel art crisp), cropped to the current frame, and overlaid
//! centred on its anchor. Zoom scales sizes and offsets around the canvas
//! centre.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use tracing::{debug, warn};

use crate::error::{Result, UnitError};
use crate::types::SectionId;

use super::scene::{PlacedLayer, RenderDescription};

/// Canvas settings for the PNG surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    pub background: [u8; 4],
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: [0, 0, 0, 0],
        }
    }

    pub fn with_background(mut self, rgba: [u8; 4]) -> Self {
        self.background = rgba;
        self
    }
}

/// A layer whose image could not be loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingAsset {
    pub section: SectionId,
    pub path: PathBuf,
    pub reason: String,
}

/// Result of compositing: the image plus the layers that were left out.
#[derive(Debug)]
pub struct Composite {
    pub image: RgbaImage,
    pub missing: Vec<MissingAsset>,
}

/// Rasterise a render description.
///
/// Layers whose image can't be loaded are skipped and reported; they never
/// abort the render.
pub fn composite(description: &RenderDescription, canvas: &Canvas) -> Composite {
    let mut out = RgbaImage::from_pixel(canvas.width, canvas.height, Rgba(canvas.background));
    let mut missing = Vec::new();
    let zoom = description.zoom.scale();

    for layer in &description.layers {
        let strip = match image::open(&layer.source) {
            Ok(img) => img.to_rgba8(),
            Err(e) => {
                warn!(section = %layer.section, path = %layer.source.display(), "cannot load layer image: {}", e);
                missing.push(MissingAsset {
                    section: layer.section.clone(),
                    path: layer.source.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        if let Some((frame, left, top)) = place(layer, &strip, canvas, zoom) {
            debug!(section = %layer.section, left, top, w = frame.width(), h = frame.height(), "drawing layer");
            imageops::overlay(&mut out, &frame, left, top);
        }
    }

    Composite { image: out, missing }
}

/// Crop, scale, and position one layer. Returns the visible part of the
/// frame and its top-left corner on the canvas, or `None` when nothing of
/// the layer lands on the canvas.
///
/// The frame is cut from the source strip first and only the part that
/// overlaps the canvas is resampled, so the buffer never exceeds the canvas.
fn place(layer: &PlacedLayer, strip: &RgbaImage, canvas: &Canvas, zoom: f32) -> Option<(RgbaImage, i64, i64)> {
    let (natural_w, natural_h) = strip.dimensions();
    if natural_w == 0 || natural_h == 0 {
        return None;
    }

    let geometry = layer.geometry(Some(natural_w))?;
    if geometry.display_width <= 0.0 {
        return None;
    }

    // Current frame in source pixels
    let frames = layer.total_frames.max(1);
    let src_w = (natural_w / frames).max(1);
    let src_x = ((layer.current_frame % frames) * src_w).min(natural_w - 1);

    // Destination rectangle on the canvas
    let zoom = f64::from(zoom);
    let dest_w = scaled(f64::from(geometry.frame_width), zoom);
    let display_h = f64::from(natural_h) * f64::from(geometry.display_width) / f64::from(natural_w);
    let dest_h = scaled(display_h, zoom);
    let left = f64::from(canvas.width / 2) + (f64::from(layer.offset.x) * zoom).round() - (dest_w / 2.0).floor();
    let top = f64::from(canvas.height / 2) + (f64::from(layer.offset.y) * zoom).round() - (dest_h / 2.0).floor();

    let (x0, x1) = (left.max(0.0), (left + dest_w).min(f64::from(canvas.width)));
    let (y0, y1) = (top.max(0.0), (top + dest_h).min(f64::from(canvas.height)));
    if x0 >= x1 || y0 >= y1 {
        return None;
    }

    // Visible destination span mapped back onto the source frame
    let span = |from: f64, to: f64, origin: f64, dest: f64, src: u32| {
        let ratio = f64::from(src) / dest;
        let start = (((from - origin) * ratio).floor() as u32).min(src - 1);
        let end = (((to - origin) * ratio).ceil() as u32).clamp(start + 1, src);
        (start, end - start)
    };
    let (sx, sw) = span(x0, x1, left, dest_w, src_w);
    let (sy, sh) = span(y0, y1, top, dest_h, natural_h);

    let source = imageops::crop_imm(strip, src_x + sx, sy, sw, sh).to_image();
    let (w, h) = ((x1 - x0) as u32, (y1 - y0) as u32);
    let frame = if source.dimensions() == (w, h) {
        source
    } else {
        imageops::resize(&source, w, h, FilterType::Nearest)
    };

    Some((frame, x0 as i64, y0 as i64))
}

/// Scale a length by the zoom factor, never below one pixel.
fn scaled(length: f64, zoom: f64) -> f64 {
    (length * zoom).round().max(1.0)
}

/// Write a composited image to a PNG file.
pub fn write_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image.save(path).map_err(|e| UnitError::Render {
        message: format!("Failed to write {}: {}", path.display(), e),
        help: None,
    })
}
