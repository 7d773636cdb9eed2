//! HTML surface - a standalone page that stacks the layers with CSS.
//!
//! Each layer is a fixed-width, overflow-hidden container centred on its
//! anchor; the image inside is the full strip, shifted left to expose the
//! current frame. A small script binds ctrl+wheel to the zoom rule.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::discovery::Labels;
use crate::error::{Result, UnitError};

use super::locator::AssetLocator;
use super::scene::{PlacedLayer, RenderDescription};
use super::zoom::ZoomState;

/// Options for building the page.
#[derive(Debug, Clone)]
pub struct HtmlOptions<'a> {
    pub labels: &'a Labels,
    /// Read image headers to find natural widths for layers without a
    /// requested width.
    pub probe_assets: bool,
}

/// Build the preview page.
pub fn html_page(description: &RenderDescription, locator: &dyn AssetLocator, options: &HtmlOptions<'_>) -> String {
    let mut layers = String::new();
    for layer in &description.layers {
        let natural = if options.probe_assets && layer.display_width.is_none() {
            image::image_dimensions(&layer.source).ok().map(|(w, _)| w)
        } else {
            None
        };
        layers.push_str(&layer_markup(layer, &locator.locate(&layer.source), natural));
    }

    let zoom = &description.zoom;
    let title = escape(&options.labels.title);
    let zoom_label = escape(&zoom_text(&options.labels.zoom, zoom));

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
html, body {{ margin: 0; height: 100%; }}
.container {{ position: relative; width: 100%; height: 100vh; display: flex; flex-direction: column; overflow: hidden; }}
.preview-area {{ position: relative; flex: 1; transform-origin: center center; transition: transform 0.1s ease-out; transform: scale({scale}); }}
.zoom-info {{ position: fixed; bottom: 10px; right: 10px; background: rgba(0,0,0,0.5); color: white; padding: 5px 10px; border-radius: 4px; font: 12px sans-serif; z-index: 1000; }}
.layer-container {{ position: absolute; transform: translate(-50%, -50%); overflow: hidden; pointer-events: none; }}
.layer {{ display: block; height: auto; image-rendering: pixelated; }}
</style>
</head>
<body>
<div class="container">
<div class="preview-area">
{layers}</div>
<div id="zoomLevel" class="zoom-info">{zoom_label}</div>
</div>
<script>
{script}</script>
</body>
</html>
"#,
        scale = zoom.scale(),
        script = zoom_script(zoom, &options.labels.zoom),
    )
}

/// Markup for one layer.
fn layer_markup(layer: &PlacedLayer, src: &str, natural_width: Option<u32>) -> String {
    let kind = layer.kind.name();
    let mut container = format!(
        "left: calc(50% + {}px); top: calc(50% + {}px); z-index: {};",
        layer.offset.x, layer.offset.y, layer.z_index
    );
    let mut img = String::new();

    if let Some(geometry) = layer.geometry(natural_width) {
        let _ = write!(container, " width: {}px;", geometry.frame_width);
        let _ = write!(
            img,
            "width: {}px; transform: translateX(-{}px);",
            geometry.display_width, geometry.crop_offset
        );
    }

    format!(
        "<div class=\"layer-container {kind}-container\" data-section=\"{section}\" style=\"{container}\">\
<img class=\"layer {kind}\" src=\"{src}\" style=\"{img}\"></div>\n",
        section = escape(&layer.section.to_string()),
        src = escape(src),
    )
}

fn zoom_text(label: &str, zoom: &ZoomState) -> String {
    format!("{}: {}%", label, zoom.percent())
}

const ZOOM_SCRIPT: &str = r#"(function () {
  const MIN = @MIN@, MAX = @MAX@, STEP_IN = @STEP_IN@, STEP_OUT = @STEP_OUT@;
  const LABEL = @LABEL@;
  let scale = @SCALE@;
  const area = document.querySelector('.preview-area');
  const info = document.getElementById('zoomLevel');
  document.addEventListener('wheel', (e) => {
    if (!e.ctrlKey || e.deltaY === 0) return;
    e.preventDefault();
    const step = e.deltaY > 0 ? STEP_OUT : STEP_IN;
    scale = Math.min(Math.max(MIN, scale * step), MAX);
    area.style.transform = `scale(${scale})`;
    info.textContent = `${LABEL}: ${Math.round(scale * 100)}%`;
  }, { passive: false });
})();
"#;

/// The zoom rule as a script, with the same limits as `ZoomState`.
fn zoom_script(zoom: &ZoomState, label: &str) -> String {
    let settings = zoom.settings();
    // A JSON string is a valid JS literal; "</" would close the script tag
    let label = serde_json::to_string(label)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("</", "<\\/");

    ZOOM_SCRIPT
        .replace("@MIN@", &settings.min.to_string())
        .replace("@MAX@", &settings.max.to_string())
        .replace("@STEP_IN@", &settings.step_in.to_string())
        .replace("@STEP_OUT@", &settings.step_out.to_string())
        .replace("@SCALE@", &zoom.scale().to_string())
        .replace("@LABEL@", &label)
}

/// Escape text for HTML content and attribute values.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Write the page to disk, creating parent directories.
pub fn write_html(path: &Path, page: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| UnitError::io(parent, "Failed to create output directory", e))?;
    }
    fs::write(path, page).map_err(|e| UnitError::io(path, "Failed to write preview", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::resolve_layout;
    use crate::render::{compose, Verbatim, ZoomSettings};
    use crate::types::{LayerAttributes, LayerCollection};
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    fn page(collection: &LayerCollection, base: &Path, probe: bool) -> String {
        let labels = Labels::default();
        let description = compose(collection, &resolve_layout(collection), base);
        html_page(
            &description,
            &Verbatim,
            &HtmlOptions {
                labels: &labels,
                probe_assets: probe,
            },
        )
    }

    #[test]
    fn test_layers_positioned_and_cropped() {
        let mut collection = LayerCollection::new(
            LayerAttributes::primary("hull.png").with_scale(200).with_frames(4),
            vec![LayerAttributes::attachment(1, "gun.png").with_offset(10, -5).with_scale(32)],
        );
        collection.set_frame(2);

        let html = page(&collection, Path::new("units"), false);

        assert!(html.contains(
            "style=\"left: calc(50% + 0px); top: calc(50% + 0px); z-index: 1; width: 50px;\""
        ));
        assert!(html.contains("src=\"units/hull.png\" style=\"width: 200px; transform: translateX(-100px);\""));
        assert!(html.contains("left: calc(50% + 10px); top: calc(50% + -5px); z-index: 2; width: 32px;"));
        assert!(html.contains("data-section=\"turret_1\""));

        let main = html.find("main-container").unwrap();
        let turret = html.find("turret-container").unwrap();
        assert!(main < turret);
    }

    #[test]
    fn test_natural_width_without_probe_has_no_width() {
        let collection = LayerCollection::new(LayerAttributes::primary("hull.png"), vec![]);

        let html = page(&collection, Path::new("units"), false);

        assert!(html.contains("z-index: 1;\"><img"));
        assert!(html.contains("style=\"\"></div>"));
    }

    #[test]
    fn test_natural_width_probed_from_asset() {
        let dir = tempdir().unwrap();
        RgbaImage::from_pixel(60, 10, Rgba([1, 2, 3, 255]))
            .save(dir.path().join("hull.png"))
            .unwrap();
        let collection = LayerCollection::new(LayerAttributes::primary("hull.png").with_frames(3), vec![]);

        let html = page(&collection, dir.path(), true);

        assert!(html.contains("width: 20px;"));
        assert!(html.contains("width: 60px; transform: translateX(-0px);"));
    }

    #[test]
    fn test_zoom_script_uses_settings() {
        let collection = LayerCollection::new(LayerAttributes::primary("hull.png"), vec![]);
        let labels = Labels {
            title: "Tank <preview>".to_string(),
            zoom: "Zoom".to_string(),
        };
        let zoom = ZoomState::new(ZoomSettings {
            max: 8.0,
            ..Default::default()
        });
        let description = compose(&collection, &resolve_layout(&collection), Path::new(".")).with_zoom(zoom);

        let html = html_page(
            &description,
            &Verbatim,
            &HtmlOptions {
                labels: &labels,
                probe_assets: false,
            },
        );

        assert!(html.contains("const MIN = 0.1, MAX = 8, STEP_IN = 1.1, STEP_OUT = 0.9;"));
        assert!(html.contains("const LABEL = \"Zoom\";"));
        assert!(html.contains("<title>Tank &lt;preview&gt;</title>"));
        assert!(html.contains(">Zoom: 100%</div>"));
    }

    #[test]
    fn test_empty_description_still_renders_page() {
        let collection = LayerCollection::default();

        let html = page(&collection, Path::new("."), false);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(!html.contains("layer-container main"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a&b \"c\" <d>"), "a&amp;b &quot;c&quot; &lt;d&gt;");
    }

    #[test]
    fn test_write_html_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/out/tank.html");

        write_html(&path, "<html></html>").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "<html></html>");
    }
}
