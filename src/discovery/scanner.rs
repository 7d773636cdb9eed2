//! File system scanner for unit definition files.
//!
//! Recursively walks directories looking for `.ini` files, skipping hidden
//! directories and anything the config excludes.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::{Result, UnitError};

use super::config::Config;

/// Extension of unit definition files.
pub const UNIT_EXTENSION: &str = "ini";

/// Whether a path looks like a unit definition file.
pub fn is_unit_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(UNIT_EXTENSION))
}

/// Scan a directory for unit files, sorted by path.
pub fn scan_directory(root: &Path, config: &Config) -> Vec<PathBuf> {
    let mut units: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_unit_file(p) && !config.is_excluded(p))
        .collect();

    units.sort();
    units
}

/// Expand a list of files and directories into unit files.
///
/// Files are taken as given (whatever their extension); directories are
/// scanned. A path that doesn't exist is an error.
pub fn collect_units(paths: &[PathBuf], config: &Config) -> Result<Vec<PathBuf>> {
    let mut units = Vec::new();

    for path in paths {
        if path.is_dir() {
            units.extend(scan_directory(path, config));
        } else if path.is_file() {
            units.push(path.clone());
        } else {
            return Err(UnitError::Io {
                path: path.clone(),
                message: "No such file or directory".to_string(),
            });
        }
    }

    Ok(units)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "[graphics]\n").unwrap();
    }

    #[test]
    fn test_scan_finds_ini_files() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "units/tank.ini");
        touch(dir.path(), "units/air/heli.INI");
        touch(dir.path(), "units/tank.png");
        touch(dir.path(), "mod-info.txt");

        let units = scan_directory(dir.path(), &Config::default());

        assert_eq!(units.len(), 2);
        assert!(units.iter().all(|p| is_unit_file(p)));
    }

    #[test]
    fn test_scan_skips_hidden_and_excluded() {
        let dir = tempdir().unwrap();
        touch(dir.path(), ".git/config.ini");
        touch(dir.path(), "backup/tank.ini");
        touch(dir.path(), "units/tank.ini");

        let config = Config {
            excludes: vec!["backup".to_string()],
            ..Default::default()
        };
        let units = scan_directory(dir.path(), &config);

        assert_eq!(units, vec![dir.path().join("units/tank.ini")]);
    }

    #[test]
    fn test_scan_missing_directory_is_empty() {
        let units = scan_directory(Path::new("/nonexistent/mod"), &Config::default());
        assert!(units.is_empty());
    }

    #[test]
    fn test_collect_mixes_files_and_dirs() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "units/a.ini");
        touch(dir.path(), "units/b.ini");
        touch(dir.path(), "single.txt");

        let paths = vec![dir.path().join("units"), dir.path().join("single.txt")];
        let units = collect_units(&paths, &Config::default()).unwrap();

        assert_eq!(units.len(), 3);
        assert_eq!(units[2], dir.path().join("single.txt"));
    }

    #[test]
    fn test_collect_missing_path_errors() {
        let result = collect_units(&[PathBuf::from("/nonexistent/unit.ini")], &Config::default());
        assert!(result.is_err());
    }
}
