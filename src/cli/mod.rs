pub mod completions;
pub mod inspect;
pub mod preview;
pub mod render;
pub mod validate;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::warn;

use crate::discovery::Config;
use crate::error::{Result, UnitError};
use crate::parser::{load_unit, ParsedUnit};
use crate::validation::validate_unit;

/// unitview - Layered previews for unit definition files
#[derive(Parser, Debug)]
#[command(name = "unitview")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: unitview.yaml in the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Only print warnings and errors
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write an HTML preview of a unit
    Preview(preview::PreviewArgs),

    /// Composite a unit's layers into a PNG
    Render(render::RenderArgs),

    /// Show a unit's layers and resolved positions
    Inspect(inspect::InspectArgs),

    /// Check unit files for problems without rendering
    Validate(validate::ValidateArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Load the config named on the command line, or the one in the working
/// directory.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let cwd = std::env::current_dir().map_err(|e| UnitError::io(".", "Failed to read working directory", e))?;
    Config::resolve(explicit, &cwd)
}

/// A unit file loaded for rendering.
#[derive(Debug)]
pub struct LoadedUnit {
    pub path: PathBuf,
    /// Directory image references resolve against.
    pub base_dir: PathBuf,
    pub unit: ParsedUnit,
}

/// Load a unit without validating it.
pub fn read_unit(path: &Path) -> Result<LoadedUnit> {
    let unit = load_unit(path)?;
    let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

    Ok(LoadedUnit {
        path: path.to_path_buf(),
        base_dir,
        unit,
    })
}

/// Load a unit, logging any validation findings as warnings.
pub fn open_unit(path: &Path) -> Result<LoadedUnit> {
    let loaded = read_unit(path)?;

    for d in validate_unit(&loaded.unit, &loaded.base_dir).iter() {
        warn!(code = %d.code, line = ?d.line, "{}", d.message);
    }

    Ok(loaded)
}

/// Default output path: `<dir>/<unit stem>.<ext>`.
pub fn default_output(dir: &Path, unit: &Path, ext: &str) -> PathBuf {
    let stem = unit
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unit".to_string());
    dir.join(format!("{}.{}", stem, ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["unitview", "inspect", "tank.ini", "--config", "alt.yaml", "-q"]);

        assert_eq!(cli.config, Some(PathBuf::from("alt.yaml")));
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Inspect(_)));
    }

    #[test]
    fn test_default_output() {
        assert_eq!(
            default_output(Path::new("preview"), Path::new("units/tank.ini"), "html"),
            PathBuf::from("preview/tank.html")
        );
    }

    #[test]
    fn test_open_unit_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tank.ini");
        std::fs::write(&path, "[graphics]\nimage: hull.png\n").unwrap();

        let loaded = open_unit(&path).unwrap();

        assert_eq!(loaded.base_dir, dir.path());
        assert_eq!(loaded.unit.layers.primary().file_name, "hull.png");
    }

    #[test]
    fn test_read_unit_keeps_findings_for_caller() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loop.ini");
        std::fs::write(&path, "[turret_1]\nimage: a.png\nattachedTo: 1\n").unwrap();

        let loaded = read_unit(&path).unwrap();
        let diagnostics = validate_unit(&loaded.unit, &loaded.base_dir);

        assert_eq!(loaded.path, path);
        assert_eq!(loaded.base_dir, dir.path());
        assert_eq!(diagnostics.error_count(), 1);
    }

    #[test]
    fn test_read_unit_missing_file() {
        assert!(matches!(
            read_unit(Path::new("/nonexistent/tank.ini")),
            Err(UnitError::Io { .. })
        ));
    }
}
