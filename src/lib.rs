//! unitview - Layered previews for unit definition files
//!
//! Reads INI-like unit files, stacks the body and attachment images at their
//! resolved offsets, and renders the result as an HTML page or a PNG.

pub mod cli;
pub mod discovery;
pub mod error;
pub mod layout;
pub mod output;
pub mod parser;
pub mod render;
pub mod types;
pub mod validation;

pub use discovery::{collect_units, scan_directory, Config, Labels};
pub use error::{Result, UnitError};
pub use layout::{resolve_layout, resolve_position, Anchor, LayerRef, Position, Resolution, ResolvedLayout};
pub use parser::{load_unit, parse_attributes, parse_document, parse_unit, ParsedUnit};
pub use render::{
    compose, composite, html_page, write_html, write_png, Canvas, HtmlOptions, RenderDescription, ZoomSettings,
    ZoomState,
};
pub use types::{LayerAttributes, LayerCollection, LayerKind, Section, SectionId};
pub use validation::{validate_file, validate_unit, Diagnostic, Severity, ValidationResult};
