//! Render command implementation.
//!
//! Composites a unit's layers onto a canvas and writes a PNG.

use std::path::PathBuf;

use clap::Args;

use crate::discovery::Config;
use crate::error::{Result, UnitError};
use crate::layout::resolve_layout;
use crate::output::{display_path, plural, Printer};
use crate::render::{composite, compose, write_png, Canvas, ZoomState};

use super::{default_output, open_unit};

/// Composite a unit's layers into a PNG
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Unit file to render
    pub unit: PathBuf,

    /// Output file (default: <output dir>/<unit>.png)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Zoom factor, clamped to the configured limits
    #[arg(long, conflicts_with = "steps")]
    pub zoom: Option<f32>,

    /// Zoom steps from the initial scale; negative zooms out
    #[arg(long, allow_hyphen_values = true)]
    pub steps: Option<i32>,

    /// Animation frame to draw
    #[arg(long, default_value = "0")]
    pub frame: u32,

    /// Canvas size as WIDTHxHEIGHT (default from config)
    #[arg(long, value_parser = parse_size)]
    pub canvas: Option<(u32, u32)>,
}

pub fn run(args: RenderArgs, config: &Config, printer: &Printer) -> Result<()> {
    let mut loaded = open_unit(&args.unit)?;
    loaded.unit.layers.set_frame(args.frame);

    let zoom = zoom_state(&args, config);
    let layers = &loaded.unit.layers;
    let description = compose(layers, &resolve_layout(layers), &loaded.base_dir).with_zoom(zoom);

    if description.is_empty() {
        printer.warning("Empty", &format!("{} has no drawable layers", display_path(&args.unit)));
    }

    let (width, height) = args.canvas.unwrap_or((config.canvas[0], config.canvas[1]));
    let canvas = Canvas::new(width, height).with_background(config.background_rgba()?);
    let result = composite(&description, &canvas);

    for missing in &result.missing {
        printer.warning(
            "Missing",
            &format!("[{}] {}: {}", missing.section, display_path(&missing.path), missing.reason),
        );
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&config.output, &args.unit, "png"));
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| UnitError::io(parent, "Failed to create output directory", e))?;
    }
    write_png(&result.image, &output)?;

    let drawn = description.layers.len() - result.missing.len();
    printer.success(
        "Rendered",
        &format!(
            "{} ({}, {}%) -> {}",
            display_path(&args.unit),
            plural(drawn, "layer", "layers"),
            zoom.percent(),
            display_path(&output)
        ),
    );

    Ok(())
}

fn zoom_state(args: &RenderArgs, config: &Config) -> ZoomState {
    let mut zoom = ZoomState::new(config.zoom);
    if let Some(scale) = args.zoom {
        zoom.set(scale);
    }
    if let Some(steps) = args.steps {
        for _ in 0..steps.unsigned_abs() {
            let before = zoom.scale();
            if steps > 0 {
                zoom.zoom_in();
            } else {
                zoom.zoom_out();
            }
            // Clamped.
            if zoom.scale() == before {
                break;
            }
        }
    }
    zoom
}

fn parse_size(value: &str) -> std::result::Result<(u32, u32), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", value))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<u32>()
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| format!("invalid dimension '{}'", s))
    };
    Ok((parse(w)?, parse(h)?))
}
