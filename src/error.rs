use miette::Diagnostic;
use thiserror::Error;

/// Main error type for unitview operations
#[derive(Error, Diagnostic, Debug)]
pub enum UnitError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(unitview::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Config error: {message}")]
    #[diagnostic(code(unitview::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Render error: {message}")]
    #[diagnostic(code(unitview::render))]
    Render {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Watch error: {0}")]
    #[diagnostic(code(unitview::watch))]
    Watch(#[from] notify::Error),

    #[error("Validation failed with {0} error(s)")]
    #[diagnostic(code(unitview::validate))]
    Invalid(usize),
}

impl UnitError {
    /// Wrap an I/O failure on a specific path.
    pub fn io(path: impl Into<std::path::PathBuf>, context: &str, err: impl std::fmt::Display) -> Self {
        Self::Io {
            path: path.into(),
            message: format!("{}: {}", context, err),
        }
    }
}

pub type Result<T> = std::result::Result<T, UnitError>;
