//! Render description - the surface-independent output of the compositor.
//!
//! The compositor turns a layer collection and its resolved layout into an
//! ordered list of placed layers: where each image comes from, where its
//! centre sits relative to the document centre, how wide it is drawn, and
//! which frame of its strip is visible.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::layout::{Position, ResolvedLayout};
use crate::types::{LayerAttributes, LayerCollection, LayerKind, SectionId};

use super::zoom::ZoomState;

/// Horizontal geometry of one frame of a strip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameGeometry {
    /// Width of the whole strip on screen.
    pub display_width: f32,
    /// Width of the visible window (one frame).
    pub frame_width: f32,
    /// How far the strip is shifted left to show the current frame.
    pub crop_offset: f32,
}

impl FrameGeometry {
    pub fn compute(display_width: u32, total_frames: u32, current_frame: u32) -> Self {
        let display_width = display_width as f32;
        let frame_width = display_width / total_frames.max(1) as f32;
        Self {
            display_width,
            frame_width,
            crop_offset: current_frame as f32 * frame_width,
        }
    }
}

/// One layer, ready for a surface to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLayer {
    pub kind: LayerKind,
    pub section: SectionId,
    /// Asset path: the unit's directory joined with the layer's file name.
    pub source: PathBuf,
    /// Centre of the visible frame, relative to the document centre.
    pub offset: Position,
    /// Requested strip width. `None` = the asset's natural width.
    pub display_width: Option<u32>,
    pub total_frames: u32,
    pub current_frame: u32,
    pub z_index: u32,
}

impl PlacedLayer {
    fn new(layer: &LayerAttributes, offset: Position, base_dir: &Path) -> Self {
        Self {
            kind: layer.kind,
            section: layer.section.clone(),
            source: base_dir.join(&layer.file_name),
            offset,
            display_width: (layer.scale_to > 0).then_some(layer.scale_to),
            total_frames: layer.total_frames.max(1),
            current_frame: layer.current_frame,
            z_index: layer.kind.z_index(),
        }
    }

    /// Frame geometry, using `natural_width` when no width was requested.
    ///
    /// `None` when neither is known; surfaces then draw without a width
    /// constraint.
    pub fn geometry(&self, natural_width: Option<u32>) -> Option<FrameGeometry> {
        let width = self.display_width.or(natural_width)?;
        Some(FrameGeometry::compute(width, self.total_frames, self.current_frame))
    }
}

/// Everything a surface needs to draw a unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderDescription {
    /// Layers in stacking order, bottom first.
    pub layers: Vec<PlacedLayer>,
    pub zoom: ZoomState,
}

impl RenderDescription {
    pub fn with_zoom(mut self, zoom: ZoomState) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// Compose a collection and its layout into a render description.
///
/// The primary comes first and sits exactly at the document centre; its own
/// `x`/`y` are not applied. A primary without an image is left out.
pub fn compose(collection: &LayerCollection, layout: &ResolvedLayout, base_dir: &Path) -> RenderDescription {
    let mut layers = Vec::with_capacity(collection.len());

    let primary = collection.primary();
    if primary.has_image() {
        layers.push(PlacedLayer::new(primary, Position::ORIGIN, base_dir));
    }

    for (attachment, resolution) in collection.attachments().iter().zip(&layout.attachments) {
        layers.push(PlacedLayer::new(attachment, resolution.position, base_dir));
    }

    // Stable: primary stays first, attachments keep document order
    layers.sort_by_key(|l| l.z_index);

    RenderDescription {
        layers,
        zoom: ZoomState::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::resolve_layout;

    fn compose_simple(collection: &LayerCollection) -> RenderDescription {
        compose(collection, &resolve_layout(collection), Path::new("units/tank"))
    }

    #[test]
    fn test_frame_cropping() {
        let geometry = FrameGeometry::compute(200, 4, 2);

        assert_eq!(geometry.display_width, 200.0);
        assert_eq!(geometry.frame_width, 50.0);
        assert_eq!(geometry.crop_offset, 100.0);
    }

    #[test]
    fn test_single_frame_geometry() {
        let geometry = FrameGeometry::compute(64, 1, 0);
        assert_eq!(geometry.frame_width, 64.0);
        assert_eq!(geometry.crop_offset, 0.0);
    }

    #[test]
    fn test_primary_anchored_at_centre() {
        let collection = LayerCollection::new(
            LayerAttributes::primary("hull.png").with_offset(30, 30),
            vec![LayerAttributes::attachment(1, "gun.png").with_offset(10, -5)],
        );

        let description = compose_simple(&collection);

        assert_eq!(description.layers.len(), 2);
        assert_eq!(description.layers[0].kind, LayerKind::Primary);
        assert_eq!(description.layers[0].offset, Position::ORIGIN);
        assert_eq!(description.layers[1].offset, Position::new(10, -5));
        assert!(description.layers[0].z_index < description.layers[1].z_index);
    }

    #[test]
    fn test_source_joined_with_base_dir() {
        let collection = LayerCollection::new(LayerAttributes::primary("gfx/hull.png"), vec![]);

        let description = compose_simple(&collection);

        assert_eq!(description.layers[0].source, Path::new("units/tank/gfx/hull.png"));
    }

    #[test]
    fn test_blank_primary_omitted() {
        let collection = LayerCollection::new(
            LayerCollection::default().primary().clone(),
            vec![LayerAttributes::attachment(1, "gun.png")],
        );

        let description = compose_simple(&collection);

        assert_eq!(description.layers.len(), 1);
        assert_eq!(description.layers[0].kind, LayerKind::Attachment);
    }

    #[test]
    fn test_zero_scale_means_natural_width() {
        let collection = LayerCollection::new(LayerAttributes::primary("hull.png").with_frames(2), vec![]);

        let description = compose_simple(&collection);
        let layer = &description.layers[0];

        assert_eq!(layer.display_width, None);
        assert_eq!(layer.geometry(None), None);
        assert_eq!(layer.geometry(Some(80)).unwrap().frame_width, 40.0);
    }

    #[test]
    fn test_explicit_scale_overrides_natural_width() {
        let mut collection = LayerCollection::new(
            LayerAttributes::primary("hull.png").with_scale(200).with_frames(4),
            vec![],
        );
        collection.set_frame(2);

        let description = compose_simple(&collection);
        let geometry = description.layers[0].geometry(Some(999)).unwrap();

        assert_eq!(geometry.frame_width, 50.0);
        assert_eq!(geometry.crop_offset, 100.0);
    }
}
