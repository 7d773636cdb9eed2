//! Raw sections of a unit file.
//!
//! A section is a `[name]` header followed by `key: value` lines. Sections
//! keep every entry in source order so that lookups can honour
//! first-occurrence precedence and validation can point at line numbers.

use std::fmt;

use serde::{Serialize, Serializer};

/// Reserved name of the primary body section.
pub const PRIMARY_SECTION: &str = "graphics";

/// Prefix of numbered attachment sections (`turret_1`, `turret_2`, ...).
pub const ATTACHMENT_PREFIX: &str = "turret_";

/// Identifier of a section, classified by naming convention.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SectionId {
    /// The `[graphics]` section describing the primary body.
    Graphics,
    /// A `[turret_N]` section. `N` is the number written in the header.
    Turret(u32),
    /// Any other section (`[core]`, `[movement]`, ...).
    Other(String),
}

impl SectionId {
    /// Classify a header name (without brackets).
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        if name == PRIMARY_SECTION {
            return SectionId::Graphics;
        }

        if let Some(digits) = name.strip_prefix(ATTACHMENT_PREFIX) {
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                if let Ok(number) = digits.parse() {
                    return SectionId::Turret(number);
                }
            }
        }

        SectionId::Other(name.to_string())
    }

    /// Whether this section can describe a visual layer at all.
    pub fn is_layer(&self) -> bool {
        !matches!(self, SectionId::Other(_))
    }

    pub fn is_primary(&self) -> bool {
        matches!(self, SectionId::Graphics)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionId::Graphics => write!(f, "{}", PRIMARY_SECTION),
            SectionId::Turret(n) => write!(f, "{}{}", ATTACHMENT_PREFIX, n),
            SectionId::Other(name) => write!(f, "{}", name),
        }
    }
}

impl Serialize for SectionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single `key: value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
    /// Line number (1-indexed) in the source document.
    pub line: usize,
}

/// A parsed section with its entries in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: SectionId,
    /// Line number (1-indexed) of the `[header]`.
    pub line: usize,
    pub entries: Vec<Entry>,
}

impl Section {
    pub fn new(id: SectionId, line: usize) -> Self {
        Self {
            id,
            line,
            entries: Vec::new(),
        }
    }

    /// First entry with the given key. Later duplicates are ignored.
    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// First value with the given key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entry(key).map(|e| e.value.as_str())
    }

    /// First value whose key matches ignoring ASCII case.
    pub fn get_ignore_case(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key.eq_ignore_ascii_case(key))
            .map(|e| e.value.as_str())
    }

    /// Whether the key appears at all, regardless of its value.
    pub fn has(&self, key: &str) -> bool {
        self.entry(key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_id_parse() {
        assert_eq!(SectionId::parse("graphics"), SectionId::Graphics);
        assert_eq!(SectionId::parse("turret_3"), SectionId::Turret(3));
        assert_eq!(SectionId::parse(" turret_12 "), SectionId::Turret(12));
        assert_eq!(SectionId::parse("turret_"), SectionId::Other("turret_".to_string()));
        assert_eq!(SectionId::parse("turret_1a"), SectionId::Other("turret_1a".to_string()));
        assert_eq!(SectionId::parse("core"), SectionId::Other("core".to_string()));
    }

    #[test]
    fn test_section_id_display_normalizes_number() {
        assert_eq!(SectionId::parse("turret_01").to_string(), "turret_1");
        assert_eq!(SectionId::Graphics.to_string(), "graphics");
    }

    #[test]
    fn test_first_entry_wins() {
        let mut section = Section::new(SectionId::Turret(1), 1);
        section.entries.push(Entry { key: "x".into(), value: "4".into(), line: 2 });
        section.entries.push(Entry { key: "x".into(), value: "9".into(), line: 3 });

        assert_eq!(section.get("x"), Some("4"));
        assert_eq!(section.entry("x").map(|e| e.line), Some(2));
        assert!(section.has("x"));
        assert!(!section.has("y"));
    }

    #[test]
    fn test_get_ignore_case() {
        let mut section = Section::new(SectionId::Graphics, 1);
        section.entries.push(Entry { key: "IMAGE".into(), value: "a.png".into(), line: 2 });

        assert_eq!(section.get("image"), None);
        assert_eq!(section.get_ignore_case("image"), Some("a.png"));
    }
}
