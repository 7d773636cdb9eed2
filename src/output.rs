//! Terminal output for the unitview CLI.
//!
//! Status lines go to stderr with a right-aligned coloured verb, the way
//! Cargo prints them. Stdout is kept for machine-readable output such as
//! `inspect --json` and shell completions.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Width of the verb column.
const VERB_WIDTH: usize = 12;

/// Colour of a status verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Done,
    Info,
    Warn,
    Fail,
}

impl Tone {
    fn code(self) -> &'static str {
        match self {
            Tone::Done => "\x1b[32m",
            Tone::Info => "\x1b[36m",
            Tone::Warn => "\x1b[33m",
            Tone::Fail => "\x1b[31m",
        }
    }
}

/// Status printer. Colour is on when stderr is a terminal.
#[derive(Debug, Clone)]
pub struct Printer {
    color: bool,
    quiet: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
            quiet: false,
        }
    }

    /// No colour, for tests and piped output.
    pub fn plain() -> Self {
        Self {
            color: false,
            quiet: false,
        }
    }

    /// Suppress everything except warnings and errors.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// e.g. "   Rendering units/tank.ini"
    pub fn status(&self, verb: &str, message: &str) {
        if !self.quiet {
            self.line(Tone::Done, verb, message);
        }
    }

    pub fn success(&self, verb: &str, message: &str) {
        self.status(verb, message);
    }

    pub fn info(&self, verb: &str, message: &str) {
        if !self.quiet {
            self.line(Tone::Info, verb, message);
        }
    }

    pub fn warning(&self, verb: &str, message: &str) {
        self.line(Tone::Warn, verb, message);
    }

    pub fn error(&self, verb: &str, message: &str) {
        self.line(Tone::Fail, verb, message);
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    pub fn cyan(&self, text: &str) -> String {
        self.paint(Tone::Info.code(), text)
    }

    /// Severity label for diagnostics: bold red for errors, yellow otherwise.
    pub fn severity(&self, label: &str, is_error: bool) -> String {
        let tone = if is_error { Tone::Fail } else { Tone::Warn };
        if self.color {
            format!("{BOLD}{}{label}{RESET}", tone.code())
        } else {
            label.to_string()
        }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn line(&self, tone: Tone, verb: &str, message: &str) {
        let _ = writeln!(io::stderr().lock(), "{}", self.format_line(tone, verb, message));
    }

    fn format_line(&self, tone: Tone, verb: &str, message: &str) -> String {
        if self.color {
            format!("{BOLD}{}{verb:>VERB_WIDTH$}{RESET} {message}", tone.code())
        } else {
            format!("{verb:>VERB_WIDTH$} {message}")
        }
    }
}

/// `plural(1, "unit", "units")` → "1 unit".
pub fn plural(n: usize, singular: &str, many: &str) -> String {
    format!("{} {}", n, if n == 1 { singular } else { many })
}

/// Path relative to the working directory when it is inside it.
pub fn display_path(path: &Path) -> String {
    let relative = std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf));

    match relative {
        Some(r) if r.as_os_str().is_empty() => ".".to_string(),
        Some(r) => r.display().to_string(),
        None => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "unit", "units"), "1 unit");
        assert_eq!(plural(0, "unit", "units"), "0 units");
        assert_eq!(plural(3, "layer", "layers"), "3 layers");
    }

    #[test]
    fn test_display_path_outside_cwd() {
        let p = Path::new("/nonexistent/mod/tank.ini");
        assert_eq!(display_path(p), "/nonexistent/mod/tank.ini");
    }

    #[test]
    fn test_plain_line_alignment() {
        let printer = Printer::plain();
        assert_eq!(
            printer.format_line(Tone::Done, "Rendered", "tank.png"),
            "    Rendered tank.png"
        );
        assert_eq!(printer.severity("error", true), "error");
    }
}
