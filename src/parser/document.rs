//! Unit document parsing.
//!
//! Builds the layer collection of a unit: the first `[graphics]` section is
//! the primary body, and every `[turret_N]` section that survives the
//! visibility rules becomes an attachment, in document order.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::{Result, UnitError};
use crate::types::{LayerAttributes, LayerCollection, Section, SectionId};

use super::attributes::{classify_section, Exclusion};
use super::sections::split_sections;

/// An attachment section that produced no layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedSection {
    pub section: SectionId,
    /// Line number of the section header.
    pub line: usize,
    pub reason: Exclusion,
}

/// Everything learned from one unit file.
#[derive(Debug, Clone)]
pub struct ParsedUnit {
    /// All sections in document order, layer or not.
    pub sections: Vec<Section>,
    pub layers: LayerCollection,
    /// Attachment sections dropped by the visibility rules.
    pub skipped: Vec<SkippedSection>,
}

impl ParsedUnit {
    /// Whether the document has a `[graphics]` section at all.
    pub fn has_primary_section(&self) -> bool {
        self.sections.iter().any(|s| s.id.is_primary())
    }
}

/// Parse unit text into its layer collection.
pub fn parse_document(source: &str) -> LayerCollection {
    parse_unit(source).layers
}

/// Parse unit text, keeping the raw sections and the skipped attachments.
///
/// Never fails: malformed content degrades to defaults or exclusions.
pub fn parse_unit(source: &str) -> ParsedUnit {
    let sections = split_sections(source);

    let mut primary = None;
    let mut attachments = Vec::new();
    let mut skipped = Vec::new();

    for section in &sections {
        match section.id {
            SectionId::Graphics => {
                if primary.is_some() {
                    debug!(line = section.line, "ignoring repeated [graphics] section");
                    continue;
                }
                primary = classify_section(section).ok();
            }
            SectionId::Turret(_) => match classify_section(section) {
                Ok(attrs) => attachments.push(attrs),
                Err(reason) => skipped.push(SkippedSection {
                    section: section.id.clone(),
                    line: section.line,
                    reason,
                }),
            },
            SectionId::Other(_) => {}
        }
    }

    let primary = primary.unwrap_or_else(blank_primary);
    debug!(
        attachments = attachments.len(),
        skipped = skipped.len(),
        "parsed unit"
    );

    ParsedUnit {
        layers: LayerCollection::new(primary, attachments),
        sections,
        skipped,
    }
}

/// Read and parse a unit file.
pub fn load_unit(path: &Path) -> Result<ParsedUnit> {
    let source = fs::read_to_string(path)
        .map_err(|e| UnitError::io(path, "Failed to read unit file", e))?;
    Ok(parse_unit(&source))
}

/// Primary layer used when a unit has no `[graphics]` section.
pub fn blank_primary() -> LayerAttributes {
    LayerCollection::default().primary().clone()
}
