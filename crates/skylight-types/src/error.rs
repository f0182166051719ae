//! Error types for Skylight.

use std::io;

/// Errors produced by the Skylight crates.
#[derive(Debug, thiserror::Error)]
pub enum SkylightError {
    #[error("config error: {0}")]
    Config(String),

    /// Album file syntax or interpretation error, with source location.
    #[error("{file}:{line}: {message}")]
    Parse {
        file: String,
        line: usize,
        message: String,
    },

    /// Gallery data model failed the consistency check.
    #[error("gallery check failed: {0}")]
    Check(String),

    #[error("markup error: {0}")]
    Markup(String),

    #[error("fetch error: {0}")]
    Fetch(String),

    #[error("unsupported url scheme: {0}")]
    UnsupportedScheme(String),

    /// An external tool ran but exited non-zero.
    #[error("{name} exited with status {status}")]
    Tool { name: String, status: i32 },

    /// An external tool could not be started at all.
    #[error("{name} is not installed: {reason}")]
    MissingTool { name: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl SkylightError {
    /// Build a [`SkylightError::Parse`] for a location in an album file.
    pub fn parse(file: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            line,
            message: message.into(),
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, SkylightError>;
