//! Layer attribute extraction.
//!
//! Second pass of the parser: turns one section into `LayerAttributes`,
//! or explains why the section is not a visual layer.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::types::{LayerAttributes, LayerKind, Section, SectionId};

use super::values::{is_no_image, parse_bool, parse_int, strip_shared};

/// Recognized keys.
pub mod keys {
    /// Image reference. Matched ignoring ASCII case.
    pub const IMAGE: &str = "image";
    pub const TOTAL_FRAMES: &str = "total_frames";
    pub const PRIMARY_SCALE: &str = "scaleImagesTo";
    pub const ATTACHMENT_SCALE: &str = "scaleTurretImagesTo";
    pub const X: &str = "x";
    pub const Y: &str = "y";
    pub const ATTACHED_TO: &str = "attachedTo";
    pub const PROJECTILE: &str = "projectile";
    pub const CAN_SHOOT: &str = "canShoot";
    pub const INVISIBLE: &str = "invisible";
    pub const SLAVE: &str = "slave";
}

/// Why a section produced no layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Exclusion {
    /// Not `[graphics]` and not `[turret_N]`.
    NotALayer,
    /// Missing, empty, or sentinel image reference.
    NoImage,
    /// Declares a projectile and can shoot: a weapon emitter.
    Emitter,
    /// Flagged `invisible: true`.
    Invisible,
    /// Flagged `slave: true`.
    Slaved,
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Exclusion::NotALayer => "not a layer section",
            Exclusion::NoImage => "no image",
            Exclusion::Emitter => "projectile emitter",
            Exclusion::Invisible => "invisible",
            Exclusion::Slaved => "slaved to another layer",
        };
        f.write_str(text)
    }
}

/// Parse a section into layer attributes.
///
/// Returns `None` when the section is not a visual layer.
pub fn parse_attributes(section: &Section) -> Option<LayerAttributes> {
    classify_section(section).ok()
}

/// Parse a section into layer attributes, reporting why it was excluded.
pub fn classify_section(section: &Section) -> Result<LayerAttributes, Exclusion> {
    let kind = match section.id {
        SectionId::Graphics => LayerKind::Primary,
        SectionId::Turret(_) => LayerKind::Attachment,
        SectionId::Other(_) => return Err(Exclusion::NotALayer),
    };

    if kind == LayerKind::Attachment {
        if let Err(reason) = check_visible(section) {
            debug!(section = %section.id, %reason, "skipping attachment");
            return Err(reason);
        }
    }

    let attributes = extract(section, kind);
    debug!(
        section = %section.id,
        image = %attributes.file_name,
        x = attributes.x,
        y = attributes.y,
        "parsed layer"
    );
    Ok(attributes)
}

/// Visibility rules for attachments.
fn check_visible(section: &Section) -> Result<(), Exclusion> {
    match section.get_ignore_case(keys::IMAGE) {
        Some(image) if !is_no_image(image) => {}
        _ => return Err(Exclusion::NoImage),
    }

    if section.has(keys::PROJECTILE) && flag(section, keys::CAN_SHOOT) {
        return Err(Exclusion::Emitter);
    }

    if flag(section, keys::INVISIBLE) {
        return Err(Exclusion::Invisible);
    }
    if flag(section, keys::SLAVE) {
        return Err(Exclusion::Slaved);
    }

    Ok(())
}

fn extract(section: &Section, kind: LayerKind) -> LayerAttributes {
    let mut attributes = LayerAttributes::new(kind, section.id.clone());

    if let Some(image) = section.get_ignore_case(keys::IMAGE) {
        if !is_no_image(image) {
            attributes.file_name = strip_shared(image).to_string();
        }
    }

    if let Some(frames) = int(section, keys::TOTAL_FRAMES).and_then(|n| u32::try_from(n).ok()) {
        if frames >= 1 {
            attributes.total_frames = frames;
        }
    }

    let scale_key = match kind {
        LayerKind::Primary => keys::PRIMARY_SCALE,
        LayerKind::Attachment => keys::ATTACHMENT_SCALE,
    };
    if let Some(scale) = int(section, scale_key).and_then(|n| u32::try_from(n).ok()) {
        attributes.scale_to = scale;
    }

    attributes.x = int(section, keys::X)
        .and_then(|n| i32::try_from(n).ok())
        .unwrap_or(0);
    attributes.y = int(section, keys::Y)
        .and_then(|n| i32::try_from(n).ok())
        .unwrap_or(0);

    if kind == LayerKind::Attachment {
        attributes.attached_to = int(section, keys::ATTACHED_TO)
            .filter(|&n| n >= 1)
            .and_then(|n| usize::try_from(n).ok());
    }

    attributes
}

fn int(section: &Section, key: &str) -> Option<i64> {
    section.get(key).and_then(parse_int)
}

fn flag(section: &Section, key: &str) -> bool {
    section.get(key).and_then(parse_bool).unwrap_or(false)
}
