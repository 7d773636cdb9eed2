//! Preview command implementation.
//!
//! Writes a standalone HTML page for a unit, and with `--watch` rewrites it
//! whenever the unit or one of its images changes.

use std::path::{Path, PathBuf};
use std::sync::mpsc;

use clap::Args;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use tracing::debug;

use crate::discovery::Config;
use crate::error::Result;
use crate::layout::resolve_layout;
use crate::output::{display_path, plural, Printer};
use crate::render::{compose, html_page, write_html, HtmlOptions, RelativeTo, ZoomState};

use super::{default_output, open_unit};

/// Write an HTML preview of a unit
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Unit file to preview
    pub unit: PathBuf,

    /// Output file (default: <output dir>/<unit>.html)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Animation frame to show
    #[arg(long, default_value = "0")]
    pub frame: u32,

    /// Rewrite the preview when the unit or its images change
    #[arg(long)]
    pub watch: bool,
}

pub fn run(args: PreviewArgs, config: &Config, printer: &Printer) -> Result<()> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&config.output, &args.unit, "html"));

    let sources = write_preview(&args, &output, config, printer)?;

    if args.watch {
        watch(&args, &output, sources, config, printer)?;
    }

    Ok(())
}

/// Build and write the page. Returns the image paths it references.
fn write_preview(args: &PreviewArgs, output: &Path, config: &Config, printer: &Printer) -> Result<Vec<PathBuf>> {
    let mut loaded = open_unit(&args.unit)?;
    loaded.unit.layers.set_frame(args.frame);

    let layers = &loaded.unit.layers;
    let description = compose(layers, &resolve_layout(layers), &loaded.base_dir)
        .with_zoom(ZoomState::new(config.zoom));

    let page_dir = output.parent().map(Path::to_path_buf).unwrap_or_default();
    let page = html_page(
        &description,
        &RelativeTo::new(page_dir),
        &HtmlOptions {
            labels: &config.labels,
            probe_assets: true,
        },
    );
    write_html(output, &page)?;

    printer.success(
        "Previewed",
        &format!(
            "{} ({}) -> {}",
            display_path(&args.unit),
            plural(description.layers.len(), "layer", "layers"),
            display_path(output)
        ),
    );

    Ok(description.layers.into_iter().map(|l| l.source).collect())
}

fn watch(args: &PreviewArgs, output: &Path, mut sources: Vec<PathBuf>, config: &Config, printer: &Printer) -> Result<()> {
    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = notify::recommended_watcher(tx)?;

    // Editors often replace files on save, so watch directories, not files
    let mut dirs = watched_dirs(&args.unit, &sources);
    for dir in &dirs {
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
    }
    printer.info("Watching", &format!("{} (ctrl-c to stop)", display_path(&args.unit)));

    for event in rx {
        let event = event?;
        if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
            continue;
        }
        if !event.paths.iter().any(|p| is_relevant(p, &args.unit, &sources)) {
            continue;
        }
        debug!(paths = ?event.paths, "change detected");

        match write_preview(args, output, config, printer) {
            Ok(updated) => {
                sources = updated;
                for dir in watched_dirs(&args.unit, &sources) {
                    if !dirs.contains(&dir) {
                        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
                        dirs.push(dir);
                    }
                }
            }
            Err(e) => printer.error("Failed", &e.to_string()),
        }
    }

    Ok(())
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Existing directories holding the unit and its images, deduplicated.
fn watched_dirs(unit: &Path, sources: &[PathBuf]) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = std::iter::once(unit)
        .chain(sources.iter().map(PathBuf::as_path))
        .map(parent_dir)
        .filter(|d| d.is_dir())
        .collect();
    dirs.sort();
    dirs.dedup();
    dirs
}

fn is_relevant(changed: &Path, unit: &Path, sources: &[PathBuf]) -> bool {
    let same = |a: &Path, b: &Path| match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a.file_name() == b.file_name(),
    };
    same(changed, unit) || sources.iter().any(|s| same(changed, s))
}
