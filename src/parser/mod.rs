//! Parser for unit definition files.
//!
//! Unit files are INI-like: `[section]` headers followed by `key: value`
//! lines. Parsing runs in two passes:
//!
//! 1. [`split_sections`] cuts the text into sections of ordered entries.
//! 2. [`parse_attributes`] reads the layer attributes of each section,
//!    applying the visibility rules to attachments.
//!
//! [`parse_unit`] ties both together into a [`LayerCollection`].
//!
//! # Usage
//!
//! ```ignore
//! use unitview::parser::parse_document;
//!
//! let source = std::fs::read_to_string("units/tank.ini")?;
//! let layers = parse_document(&source);
//!
//! for layer in layers.iter() {
//!     println!("{} -> {}", layer.section, layer.file_name);
//! }
//! ```
//!
//! [`LayerCollection`]: crate::types::LayerCollection

pub mod attributes;
mod document;
mod sections;
pub mod values;

pub use attributes::{classify_section, keys, parse_attributes, Exclusion};
pub use document::{blank_primary, load_unit, parse_document, parse_unit, ParsedUnit, SkippedSection};
pub use sections::split_sections;
