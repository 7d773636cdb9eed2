//! Section splitting.
//!
//! First pass of the parser: turns raw text into `[section]` blocks of
//! `key: value` entries. Nothing here fails; lines that don't fit the
//! dialect are dropped.

use crate::types::{Entry, Section, SectionId};

/// Delimiter for multi-line values and block comments.
const TRIPLE_QUOTE: &str = "\"\"\"";

/// Split a unit file into sections, in document order.
///
/// Lines before the first header are ignored, as are `#` comments,
/// `"""` comment blocks, and lines without a `:`. Multi-line values opened
/// with `"""` run until the closing `"""` and are joined with newlines.
pub fn split_sections(source: &str) -> Vec<Section> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);

    let mut sections: Vec<Section> = Vec::new();
    let mut lines = source.lines().enumerate().map(|(i, l)| (i + 1, l));

    while let Some((line_no, raw)) = lines.next() {
        let line = raw.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Standalone """ opens a comment block
        if let Some(rest) = line.strip_prefix(TRIPLE_QUOTE) {
            if !rest.contains(TRIPLE_QUOTE) {
                skip_until_closing(&mut lines);
            }
            continue;
        }

        if let Some(name) = header_name(line) {
            sections.push(Section::new(SectionId::parse(name), line_no));
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        let value = value.trim();
        let value = match value.strip_prefix(TRIPLE_QUOTE) {
            Some(rest) => match rest.find(TRIPLE_QUOTE) {
                Some(end) => rest[..end].to_string(),
                None => collect_block(rest, &mut lines),
            },
            None => value.to_string(),
        };

        // Entries before any header belong to no section
        if let Some(section) = sections.last_mut() {
            section.entries.push(Entry {
                key: key.to_string(),
                value,
                line: line_no,
            });
        }
    }

    sections
}

/// Extract the name from a `[name]` header line.
fn header_name(line: &str) -> Option<&str> {
    let inner = line.strip_prefix('[')?;
    let end = inner.find(']')?;
    Some(inner[..end].trim())
}

fn skip_until_closing<'a>(lines: &mut impl Iterator<Item = (usize, &'a str)>) {
    for (_, raw) in lines {
        if raw.contains(TRIPLE_QUOTE) {
            break;
        }
    }
}

fn collect_block<'a>(first: &str, lines: &mut impl Iterator<Item = (usize, &'a str)>) -> String {
    let mut parts = vec![first.trim().to_string()];
    for (_, raw) in lines {
        if let Some(end) = raw.find(TRIPLE_QUOTE) {
            parts.push(raw[..end].trim().to_string());
            break;
        }
        parts.push(raw.trim().to_string());
    }
    parts.join("\n").trim().to_string()
}
