//! Inspect command implementation.
//!
//! Prints a unit's layers with their local and resolved offsets, plus the
//! attachment sections that were skipped. `--json` prints the same data as
//! JSON on stdout.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::error::{Result, UnitError};
use crate::layout::{resolve_layout, Anchor, Position, Resolution};
use crate::output::{display_path, plural, Printer};
use crate::parser::{ParsedUnit, SkippedSection};
use crate::types::LayerAttributes;
use crate::validation::{validate_unit, ValidationResult};

use super::read_unit;

/// Show a unit's layers and resolved positions
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Unit file to inspect
    pub unit: PathBuf,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// One layer with its resolved placement.
#[derive(Debug, Serialize)]
pub struct LayerReport<'a> {
    #[serde(flatten)]
    pub layer: &'a LayerAttributes,
    #[serde(flatten)]
    pub resolution: &'a Resolution,
}

/// Everything `inspect` reports about a unit.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub unit: String,
    pub layers: Vec<LayerReport<'a>>,
    pub skipped: &'a [SkippedSection],
    pub diagnostics: &'a ValidationResult,
}

pub fn run(args: InspectArgs, printer: &Printer) -> Result<()> {
    let loaded = read_unit(&args.unit)?;
    let layout = resolve_layout(&loaded.unit.layers);
    let diagnostics = validate_unit(&loaded.unit, &loaded.base_dir);
    let report = build_report(display_path(&args.unit), &loaded.unit, &layout.primary, &layout.attachments, &diagnostics);

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(|e| UnitError::Render {
            message: format!("Failed to serialize report: {}", e),
            help: None,
        })?;
        println!("{}", json);
    } else {
        printer.info(
            "Inspecting",
            &format!("{} ({})", report.unit, plural(report.layers.len(), "layer", "layers")),
        );
        print!("{}", format_table(&report));
    }

    Ok(())
}

fn build_report<'a>(
    unit_name: String,
    unit: &'a ParsedUnit,
    primary: &'a Resolution,
    attachments: &'a [Resolution],
    diagnostics: &'a ValidationResult,
) -> Report<'a> {
    let layers = std::iter::once(LayerReport {
        layer: unit.layers.primary(),
        resolution: primary,
    })
    .chain(
        unit.layers
            .attachments()
            .iter()
            .zip(attachments)
            .map(|(layer, resolution)| LayerReport { layer, resolution }),
    )
    .collect();

    Report {
        unit: unit_name,
        layers,
        skipped: &unit.skipped,
        diagnostics,
    }
}

fn row(cells: [&str; 7]) -> String {
    let [section, image, frames, scale, local, position, anchor] = cells;
    let line = format!("{section:<10} {image:<14} {frames:>6} {scale:>5}  {local:<10} {position:<10} {anchor}");
    format!("{}\n", line.trim_end())
}

fn anchor_text(resolution: &Resolution) -> String {
    let slots = |s: &[usize]| s.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(" -> ");
    match &resolution.anchor {
        Anchor::Origin => "origin".to_string(),
        Anchor::Primary if resolution.chain.len() > 1 => format!("body via {}", slots(&resolution.chain[1..])),
        Anchor::Primary => "body".to_string(),
        Anchor::Dangling { slot } => format!("dangling at {}", slot),
        Anchor::Cycle { members } => format!("cycle {}", slots(members)),
    }
}

/// Plain-text table of a report.
fn format_table(report: &Report<'_>) -> String {
    let mut out = row(["section", "image", "frames", "scale", "local", "position", "anchor"]);

    for entry in &report.layers {
        let layer = entry.layer;
        let image = if layer.has_image() { layer.file_name.as_str() } else { "-" };
        let scale = match layer.scale_to {
            0 => "auto".to_string(),
            n => n.to_string(),
        };
        let local = if entry.resolution.anchor == Anchor::Origin {
            Position::ORIGIN
        } else {
            Position::new(layer.x, layer.y)
        };

        out.push_str(&row([
            &layer.section.to_string(),
            image,
            &layer.total_frames.to_string(),
            &scale,
            &local.to_string(),
            &entry.resolution.position.to_string(),
            &anchor_text(entry.resolution),
        ]));
    }

    for skipped in report.skipped {
        out.push_str(&format!(
            "{:<10} [{}] line {}: {}\n",
            "skipped", skipped.section, skipped.line, skipped.reason
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_unit;

    const TANK: &str = "[graphics]
image: hull.png
scaleImagesTo: 128
[turret_1]
image: gun.png
x: 10
[turret_2]
image: barrel.png
x: 5
attachedTo: 1
[turret_3]
image: SHARED:muzzle.png
projectile: shell
canShoot: true
";

    fn table(source: &str) -> String {
        let unit = parse_unit(source);
        let layout = resolve_layout(&unit.layers);
        let diagnostics = ValidationResult::new();
        let report = build_report("tank.ini".to_string(), &unit, &layout.primary, &layout.attachments, &diagnostics);
        format_table(&report)
    }

    #[test]
    fn test_table() {
        insta::assert_snapshot!(table(TANK), @r"
        section    image          frames scale  local      position   anchor
        graphics   hull.png            1   128  (0, 0)     (0, 0)     origin
        turret_1   gun.png             1  auto  (10, 0)    (10, 0)    body
        turret_2   barrel.png          1  auto  (5, 0)     (15, 0)    body via 1
        skipped    [turret_3] line 11: projectile emitter
        ");
    }

    #[test]
    fn test_anchor_text_for_cycles_and_dangling() {
        let text = table("[turret_1]\nimage: a.png\nattachedTo: 2\n[turret_2]\nimage: b.png\nattachedTo: 1\n[turret_3]\nimage: c.png\nattachedTo: 9\n");

        assert!(text.contains("cycle 1 -> 2"));
        assert!(text.contains("cycle 2 -> 1"));
        assert!(text.contains("dangling at 9"));
        // No [graphics]: blank body row
        assert!(text.contains("graphics   -"));
    }

    #[test]
    fn test_json_report() {
        let unit = parse_unit(TANK);
        let layout = resolve_layout(&unit.layers);
        let diagnostics = ValidationResult::new();
        let report = build_report("tank.ini".to_string(), &unit, &layout.primary, &layout.attachments, &diagnostics);

        let json: serde_json::Value = serde_json::to_value(&report).unwrap();

        assert_eq!(json["unit"], "tank.ini");
        assert_eq!(json["layers"].as_array().unwrap().len(), 3);
        assert_eq!(json["layers"][2]["section"], "turret_2");
        assert_eq!(json["layers"][2]["position"]["x"], 15);
        assert_eq!(json["layers"][2]["anchor"]["kind"], "primary");
        assert_eq!(json["skipped"][0]["reason"], "emitter");
    }
}
