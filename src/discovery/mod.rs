//! Config lookup and unit file discovery.

mod config;
mod scanner;

pub use config::{Config, Labels, CONFIG_FILENAME};
pub use scanner::{collect_units, is_unit_file, scan_directory, UNIT_EXTENSION};
