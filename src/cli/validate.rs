//! Validate command implementation.

use std::path::PathBuf;

use clap::Args;

use crate::discovery::{collect_units, Config};
use crate::error::{Result, UnitError};
use crate::output::{display_path, Printer};
use crate::validation::{print_diagnostics, print_summary, validate_file};

/// Check unit files for problems without rendering
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Unit files or directories to scan for *.ini files
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Returns `UnitError::Invalid` when any unit has errors.
pub fn run(args: ValidateArgs, config: &Config, printer: &Printer) -> Result<()> {
    let units = collect_units(&args.paths, config)?;

    let mut errors = 0;
    let mut warnings = 0;

    for unit in &units {
        printer.status("Checking", &display_path(unit));
        let result = validate_file(unit)?;
        print_diagnostics(unit, &result, printer);

        errors += result.error_count();
        warnings += result.warning_count();
    }

    print_summary(units.len(), errors, warnings, printer);

    let failures = if args.strict { errors + warnings } else { errors };
    if failures > 0 {
        return Err(UnitError::Invalid(failures));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn validate(paths: Vec<PathBuf>, strict: bool) -> Result<()> {
        run(
            ValidateArgs { paths, strict },
            &Config::default(),
            &Printer::plain().quiet(true),
        )
    }

    #[test]
    fn test_clean_directory_passes() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("hull.png"), b"").unwrap();
        fs::write(dir.path().join("tank.ini"), "[graphics]\nimage: hull.png\n").unwrap();

        assert!(validate(vec![dir.path().to_path_buf()], false).is_ok());
    }

    #[test]
    fn test_cycle_fails() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("loop.ini"),
            "[graphics]\nimage: SHARED:hull.png\n[turret_1]\nimage: SHARED:a.png\nattachedTo: 1\n",
        )
        .unwrap();

        let result = validate(vec![dir.path().to_path_buf()], false);

        assert!(matches!(result, Err(UnitError::Invalid(1))));
    }

    #[test]
    fn test_warnings_fail_only_when_strict() {
        let dir = tempdir().unwrap();
        let unit = dir.path().join("tank.ini");
        fs::write(&unit, "[graphics]\nimage: missing.png\n").unwrap();

        assert!(validate(vec![unit.clone()], false).is_ok());
        assert!(matches!(validate(vec![unit], true), Err(UnitError::Invalid(1))));
    }

    #[test]
    fn test_missing_path_errors() {
        let result = validate(vec![PathBuf::from("/nonexistent/units")], false);
        assert!(matches!(result, Err(UnitError::Io { .. })));
    }
}
