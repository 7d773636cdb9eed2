//! Validation for unit files.
//!
//! Runs a suite of checks against a parsed unit and reports errors and
//! warnings. Used by `unitview validate`; `preview` and `render` log the
//! same diagnostics as warnings.

mod checks;
mod warning;

pub use warning::{Diagnostic, Severity, ValidationResult};

use std::path::Path;

use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::parser::{load_unit, ParsedUnit};

/// Run all checks against a parsed unit. Images resolve against `base_dir`.
pub fn validate_unit(unit: &ParsedUnit, base_dir: &Path) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_primary(unit));
    result.merge(checks::check_duplicate_attachments(unit));
    result.merge(checks::check_numeric_values(unit));
    result.merge(checks::check_dangling_parents(unit));
    result.merge(checks::check_cycles(unit));
    result.merge(checks::check_image_files(unit, base_dir));

    result.sort();
    result
}

/// Load and validate a unit file.
pub fn validate_file(path: &Path) -> Result<ValidationResult> {
    let unit = load_unit(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(validate_unit(&unit, base_dir))
}

/// Print one file's diagnostics to stderr.
pub fn print_diagnostics(path: &Path, result: &ValidationResult, printer: &Printer) {
    let file = display_path(path);

    for d in result.iter() {
        let location = match d.line {
            Some(line) => format!("{}:{}", file, line),
            None => file.clone(),
        };
        eprintln!(
            "{}[{}]: {}",
            printer.severity(&d.severity.to_string(), d.is_error()),
            d.code,
            d.message
        );
        eprintln!("  {} {}", printer.dim("-->"), printer.cyan(&location));
        if let Some(help) = &d.help {
            eprintln!("  {} {}", printer.dim("help:"), help);
        }
    }
}

/// Print the closing summary line for a validation run.
pub fn print_summary(files: usize, errors: usize, warnings: usize, printer: &Printer) {
    let checked = plural(files, "unit", "units");
    if errors > 0 {
        printer.error(
            "Failed",
            &format!(
                "{}: {}, {}",
                checked,
                plural(errors, "error", "errors"),
                plural(warnings, "warning", "warnings")
            ),
        );
    } else if warnings > 0 {
        printer.warning("Checked", &format!("{} ({})", checked, plural(warnings, "warning", "warnings")));
    } else {
        printer.success("Checked", &checked);
    }
}
