//! Visual layers of a unit.
//!
//! A unit is drawn as one primary body plus an ordered list of attachments
//! (turrets). Attachments are offset either from the primary or, through
//! `attached_to`, from another attachment.

use serde::Serialize;

use super::section::SectionId;

/// Role of a layer in the unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Primary,
    Attachment,
}

impl LayerKind {
    /// Name used for CSS classes and listings.
    pub fn name(self) -> &'static str {
        match self {
            LayerKind::Primary => "main",
            LayerKind::Attachment => "turret",
        }
    }

    /// Stacking order. Attachments always sit above the primary body.
    pub fn z_index(self) -> u32 {
        match self {
            LayerKind::Primary => 1,
            LayerKind::Attachment => 2,
        }
    }
}

/// Attributes of one visual layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerAttributes {
    /// Image path relative to the unit file's directory. Empty = nothing to draw.
    pub file_name: String,
    /// Number of frames packed horizontally into the image (always >= 1).
    pub total_frames: u32,
    /// Frame currently displayed. Render-time state, never parsed.
    pub current_frame: u32,
    /// Target width in pixels of the whole strip. 0 = natural width.
    pub scale_to: u32,
    pub x: i32,
    pub y: i32,
    pub kind: LayerKind,
    pub section: SectionId,
    /// 1-based index into the surviving attachments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attached_to: Option<usize>,
}

impl LayerAttributes {
    /// Default attributes for a layer of the given kind.
    pub fn new(kind: LayerKind, section: SectionId) -> Self {
        Self {
            file_name: String::new(),
            total_frames: 1,
            current_frame: 0,
            scale_to: 0,
            x: 0,
            y: 0,
            kind,
            section,
            attached_to: None,
        }
    }

    /// A primary layer showing `file_name`.
    pub fn primary(file_name: impl Into<String>) -> Self {
        Self::new(LayerKind::Primary, SectionId::Graphics).with_file(file_name)
    }

    /// An attachment layer from `[turret_<number>]` showing `file_name`.
    pub fn attachment(number: u32, file_name: impl Into<String>) -> Self {
        Self::new(LayerKind::Attachment, SectionId::Turret(number)).with_file(file_name)
    }

    pub fn with_file(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn with_offset(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_frames(mut self, total_frames: u32) -> Self {
        self.total_frames = total_frames.max(1);
        self
    }

    pub fn with_scale(mut self, scale_to: u32) -> Self {
        self.scale_to = scale_to;
        self
    }

    pub fn with_parent(mut self, slot: usize) -> Self {
        self.attached_to = Some(slot);
        self
    }

    /// Whether the layer has an image to draw.
    pub fn has_image(&self) -> bool {
        !self.file_name.is_empty()
    }

    /// Select a frame, wrapping into `0..total_frames`.
    pub fn set_frame(&mut self, frame: u32) {
        self.current_frame = frame % self.total_frames.max(1);
    }
}

/// The primary layer plus its ordered attachments.
///
/// Built fresh for every preview; only `current_frame` changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerCollection {
    primary: LayerAttributes,
    attachments: Vec<LayerAttributes>,
}

impl LayerCollection {
    pub fn new(primary: LayerAttributes, attachments: Vec<LayerAttributes>) -> Self {
        Self {
            primary,
            attachments,
        }
    }

    pub fn primary(&self) -> &LayerAttributes {
        &self.primary
    }

    pub fn attachments(&self) -> &[LayerAttributes] {
        &self.attachments
    }

    /// Look up an attachment by its 1-based slot.
    pub fn attachment(&self, slot: usize) -> Option<&LayerAttributes> {
        slot.checked_sub(1).and_then(|i| self.attachments.get(i))
    }

    /// Number of layers, primary included.
    pub fn len(&self) -> usize {
        1 + self.attachments.len()
    }

    /// Never true: a collection always carries a primary.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over the primary then every attachment, in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &LayerAttributes> {
        std::iter::once(&self.primary).chain(self.attachments.iter())
    }

    /// Show the same frame index on every layer (wrapped per layer).
    pub fn set_frame(&mut self, frame: u32) {
        self.primary.set_frame(frame);
        for layer in &mut self.attachments {
            layer.set_frame(frame);
        }
    }
}

impl Default for LayerCollection {
    fn default() -> Self {
        Self::new(LayerAttributes::new(LayerKind::Primary, SectionId::Graphics), vec![])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_collection_has_blank_primary() {
        let collection = LayerCollection::default();

        assert_eq!(collection.len(), 1);
        assert!(!collection.primary().has_image());
        assert_eq!(collection.primary().total_frames, 1);
        assert!(collection.attachments().is_empty());
    }

    #[test]
    fn test_attachment_slots_are_one_based() {
        let collection = LayerCollection::new(
            LayerAttributes::primary("hull.png"),
            vec![
                LayerAttributes::attachment(1, "a.png"),
                LayerAttributes::attachment(4, "b.png"),
            ],
        );

        assert!(collection.attachment(0).is_none());
        assert_eq!(collection.attachment(1).unwrap().file_name, "a.png");
        assert_eq!(collection.attachment(2).unwrap().file_name, "b.png");
        assert!(collection.attachment(3).is_none());
    }

    #[test]
    fn test_frames_wrap_per_layer() {
        let mut collection = LayerCollection::new(
            LayerAttributes::primary("hull.png").with_frames(4),
            vec![LayerAttributes::attachment(1, "gun.png").with_frames(3)],
        );

        collection.set_frame(5);
        assert_eq!(collection.primary().current_frame, 1);
        assert_eq!(collection.attachments()[0].current_frame, 2);

        collection.set_frame(6);
        assert_eq!(collection.primary().current_frame, 2);
        assert_eq!(collection.attachments()[0].current_frame, 0);
    }

    #[test]
    fn test_with_frames_never_zero() {
        let layer = LayerAttributes::primary("a.png").with_frames(0);
        assert_eq!(layer.total_frames, 1);
    }

    #[test]
    fn test_iter_draw_order() {
        let collection = LayerCollection::new(
            LayerAttributes::primary("hull.png"),
            vec![LayerAttributes::attachment(2, "gun.png")],
        );

        let kinds: Vec<LayerKind> = collection.iter().map(|l| l.kind).collect();
        assert_eq!(kinds, vec![LayerKind::Primary, LayerKind::Attachment]);
    }
}
