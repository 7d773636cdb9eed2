//! Project configuration (unitview.yaml).
//!
//! Every field is optional; a missing file means all defaults.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::error::{Result, UnitError};
use crate::render::ZoomSettings;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILENAME: &str = "unitview.yaml";

/// Preview configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory for generated previews.
    pub output: PathBuf,

    /// PNG canvas size [width, height].
    pub canvas: [u32; 2],

    /// PNG background as a hex colour. Transparent when unset.
    pub background: Option<String>,

    pub zoom: ZoomSettings,

    pub labels: Labels,

    /// Directory names or path suffixes skipped when scanning for units.
    pub excludes: Vec<String>,
}

/// Text shown by the HTML preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Labels {
    pub title: String,
    pub zoom: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            title: "Unit preview".to_string(),
            zoom: "Zoom".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: PathBuf::from("preview"),
            canvas: [512, 512],
            background: None,
            zoom: ZoomSettings::default(),
            labels: Labels::default(),
            excludes: vec![],
        }
    }
}

impl Config {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| UnitError::io(path, "Failed to read config", e))?;
        Self::parse(&content)
    }

    /// Parse and check config from YAML text.
    pub fn parse(content: &str) -> Result<Self> {
        // An empty file deserializes as null
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(content).map_err(|e| UnitError::Config {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })?;
        config.check()?;
        Ok(config)
    }

    /// Use `explicit` when given, else `unitview.yaml` in `dir` if present,
    /// else defaults.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    fn check(&self) -> Result<()> {
        self.zoom.check().map_err(|message| UnitError::Config {
            message,
            help: Some("Defaults are min 0.1, max 5.0, step_in 1.1, step_out 0.9".to_string()),
        })?;

        if self.canvas.contains(&0) {
            return Err(UnitError::Config {
                message: "canvas dimensions must be non-zero".to_string(),
                help: None,
            });
        }

        self.background_rgba()?;
        Ok(())
    }

    /// Background colour as RGBA.
    pub fn background_rgba(&self) -> Result<[u8; 4]> {
        let Some(value) = self.background.as_deref() else {
            return Ok([0, 0, 0, 0]);
        };

        if value.trim().eq_ignore_ascii_case("transparent") {
            return Ok([0, 0, 0, 0]);
        }

        let rgb = Srgb::<u8>::from_str(value.trim()).map_err(|e| UnitError::Config {
            message: format!("Invalid background colour '{}': {}", value, e),
            help: Some("Use a hex colour like #1e1e1e".to_string()),
        })?;
        Ok([rgb.red, rgb.green, rgb.blue, 255])
    }

    /// Whether a path is excluded from unit scanning.
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.excludes.iter().any(|pattern| {
            let pattern = pattern.trim_end_matches('/');
            path.components().any(|c| c.as_os_str() == pattern)
                || path.to_string_lossy().replace('\\', "/").ends_with(pattern)
        })
    }
}
