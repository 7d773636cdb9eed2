//! Asset path resolution for surfaces that reference images by URL.

use std::path::{Component, Path, PathBuf};

/// Turns an asset path into a form a display surface can load.
pub trait AssetLocator {
    fn locate(&self, path: &Path) -> String;
}

/// Uses the path as written, with forward slashes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl AssetLocator for Verbatim {
    fn locate(&self, path: &Path) -> String {
        slashed(path)
    }
}

/// Absolute `file://` URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileUrl;

impl AssetLocator for FileUrl {
    fn locate(&self, path: &Path) -> String {
        let absolute = absolute(path);
        let mut url = slashed(&absolute);
        if !url.starts_with('/') {
            // Drive-letter paths need a leading slash
            url.insert(0, '/');
        }
        format!("file://{}", encode(&url))
    }
}

/// Relative to a directory (where the page is written) when the asset is
/// inside it, an absolute `file://` URL otherwise.
#[derive(Debug, Clone)]
pub struct RelativeTo {
    root: PathBuf,
}

impl RelativeTo {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetLocator for RelativeTo {
    fn locate(&self, path: &Path) -> String {
        let root = absolute(&self.root);
        match absolute(path).strip_prefix(&root) {
            Ok(relative) => encode(&slashed(relative)),
            Err(_) => FileUrl.locate(path),
        }
    }
}

fn absolute(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    normalize(&joined)
}

/// Remove `.` and `..` components without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

fn slashed(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Percent-encode the characters that break a URL inside an attribute.
fn encode(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            ' ' => out.push_str("%20"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '%' => out.push_str("%25"),
            _ => out.push(c),
        }
    }
    out
}
