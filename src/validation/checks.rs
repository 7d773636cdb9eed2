//! Validation checks for a parsed unit.
//!
//! Each check takes the parsed unit (and, for file checks, the directory
//! images are resolved against) and returns a `ValidationResult`.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use crate::layout::{resolve_layout, Anchor};
use crate::parser::values::{parse_int, strip_shared, SHARED_PREFIX};
use crate::parser::{classify_section, keys, ParsedUnit};
use crate::types::{LayerCollection, Section, SectionId};

use super::warning::{Diagnostic, ValidationResult};

/// Warn when there is no `[graphics]` section or it names no image.
pub fn check_primary(unit: &ParsedUnit) -> ValidationResult {
    let mut result = ValidationResult::new();

    let Some(graphics) = unit.sections.iter().find(|s| s.id.is_primary()) else {
        result.push(
            Diagnostic::warning(
                "unitview::validate::missing-graphics",
                "Unit has no [graphics] section",
            )
            .with_help("The preview falls back to a blank body; add [graphics] with an image"),
        );
        return result;
    };

    if !unit.layers.primary().has_image() {
        result.push(
            Diagnostic::warning(
                "unitview::validate::no-primary-image",
                "[graphics] has no usable image",
            )
            .with_help("Set `image:` to a PNG file relative to the unit")
            .at(&graphics.id, graphics.line),
        );
    }

    result
}

/// Warn about repeated `[turret_N]` numbers.
pub fn check_duplicate_attachments(unit: &ParsedUnit) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut first_seen: HashMap<u32, usize> = HashMap::new();

    for section in &unit.sections {
        let SectionId::Turret(n) = section.id else {
            continue;
        };
        if let Some(&line) = first_seen.get(&n) {
            result.push(
                Diagnostic::warning(
                    "unitview::validate::duplicate-attachment",
                    format!("[{}] repeats the section on line {}", section.id, line),
                )
                .with_help("attachedTo counts surviving sections in order, not section numbers")
                .at(&section.id, section.line),
            );
        } else {
            first_seen.insert(n, section.line);
        }
    }

    result
}

/// Warn about numeric values that don't parse or fall out of range.
pub fn check_numeric_values(unit: &ParsedUnit) -> ValidationResult {
    let mut result = ValidationResult::new();

    for section in &unit.sections {
        let numeric: &[&str] = match section.id {
            SectionId::Graphics => &[keys::TOTAL_FRAMES, keys::PRIMARY_SCALE],
            SectionId::Turret(_) => &[
                keys::TOTAL_FRAMES,
                keys::ATTACHMENT_SCALE,
                keys::X,
                keys::Y,
                keys::ATTACHED_TO,
            ],
            SectionId::Other(_) => continue,
        };

        for entry in section.entries.iter().filter(|e| numeric.contains(&e.key.as_str())) {
            let problem = match parse_int(&entry.value) {
                None => Some("is not a number"),
                Some(n) => range_problem(&entry.key, n),
            };

            if let Some(problem) = problem {
                result.push(
                    Diagnostic::warning(
                        "unitview::validate::bad-number",
                        format!("{}: '{}' {}", entry.key, entry.value, problem),
                    )
                    .with_help("The value is ignored and the default used")
                    .at(&section.id, entry.line),
                );
            }
        }
    }

    result
}

/// Range rules matching what the attribute parser accepts.
fn range_problem(key: &str, n: i64) -> Option<&'static str> {
    if key == keys::X || key == keys::Y {
        return i32::try_from(n).is_err().then_some("is out of range");
    }
    if n < 0 {
        return Some("must not be negative");
    }
    if key == keys::TOTAL_FRAMES && n < 1 {
        return Some("must be at least 1");
    }
    // Large parents are reported as dangling.
    if key == keys::ATTACHED_TO {
        return None;
    }
    u32::try_from(n).is_err().then_some("is out of range")
}

/// Warn about attachments whose `attachedTo` names no surviving slot.
pub fn check_dangling_parents(unit: &ParsedUnit) -> ValidationResult {
    let mut result = ValidationResult::new();
    let layers = &unit.layers;

    for attachment in layers.attachments() {
        let Some(parent) = attachment.attached_to else {
            continue;
        };
        if layers.attachment(parent).is_none() {
            result.push(
                Diagnostic::warning(
                    "unitview::validate::dangling-parent",
                    format!(
                        "[{}] is attached to slot {}, but only {} attachment(s) survive",
                        attachment.section,
                        parent,
                        layers.attachments().len()
                    ),
                )
                .with_help("Hidden and emitter sections don't count toward attachedTo")
                .at(&attachment.section, header_line(unit, &attachment.section)),
            );
        }
    }

    result
}

/// Error on `attachedTo` reference cycles.
pub fn check_cycles(unit: &ParsedUnit) -> ValidationResult {
    let layout = resolve_layout(&unit.layers);
    let mut cycles: BTreeSet<Vec<usize>> = BTreeSet::new();

    for resolution in &layout.attachments {
        if let Anchor::Cycle { members } = &resolution.anchor {
            cycles.insert(canonical(members));
        }
    }

    cycles
        .into_iter()
        .map(|members| {
            let first = section_of(&unit.layers, members[0]);
            let path: Vec<String> = members
                .iter()
                .chain(std::iter::once(&members[0]))
                .map(|&slot| format!("[{}]", section_of(&unit.layers, slot)))
                .collect();

            Diagnostic::error(
                "unitview::validate::parent-cycle",
                format!("attachedTo cycle: {}", path.join(" -> ")),
            )
            .with_help("Layers in the cycle are drawn at their own offsets")
            .at(&first, header_line(unit, &first))
        })
        .collect()
}

/// Warn about image files that don't exist next to the unit.
///
/// Shared assets live in the game install and are not checked.
pub fn check_image_files(unit: &ParsedUnit, base_dir: &Path) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut seen_primary = false;

    for section in &unit.sections {
        if section.id.is_primary() {
            if seen_primary {
                continue;
            }
            seen_primary = true;
        }

        let Ok(layer) = classify_section(section) else {
            continue;
        };
        if !layer.has_image() || is_shared(section) {
            continue;
        }

        let path = base_dir.join(&layer.file_name);
        if !path.is_file() {
            result.push(
                Diagnostic::warning(
                    "unitview::validate::missing-image",
                    format!("Image '{}' not found", layer.file_name),
                )
                .with_help(format!("Looked for {}", path.display()))
                .at(&section.id, image_line(section)),
            );
        }
    }

    result
}

/// Rotate a cycle so its smallest slot comes first.
fn canonical(members: &[usize]) -> Vec<usize> {
    let start = members
        .iter()
        .enumerate()
        .min_by_key(|(_, &slot)| slot)
        .map_or(0, |(i, _)| i);
    members[start..].iter().chain(&members[..start]).copied().collect()
}

fn section_of(layers: &LayerCollection, slot: usize) -> SectionId {
    layers
        .attachment(slot)
        .map_or_else(|| SectionId::Other(format!("slot {slot}")), |a| a.section.clone())
}

fn header_line(unit: &ParsedUnit, id: &SectionId) -> usize {
    unit.sections
        .iter()
        .find(|s| &s.id == id)
        .map_or(0, |s| s.line)
}

fn image_line(section: &Section) -> usize {
    section
        .entries
        .iter()
        .find(|e| e.key.eq_ignore_ascii_case(keys::IMAGE))
        .map_or(section.line, |e| e.line)
}

fn is_shared(section: &Section) -> bool {
    section
        .get_ignore_case(keys::IMAGE)
        .is_some_and(|v| v.trim().starts_with(SHARED_PREFIX) && !strip_shared(v).is_empty())
}
