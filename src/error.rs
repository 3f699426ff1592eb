use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("Invalid cursor position \"{input}\" (expected LINE:COL or end)")]
    InvalidCursor { input: String },

    #[error("Cursor {line}:{column} is outside the document")]
    CursorOutOfRange { line: usize, column: usize },

    #[error("Invalid value \"{value}\" for setting {key}")]
    InvalidSettingValue { key: &'static str, value: String },

    #[error("No settings location available (set --settings)")]
    NoSettingsPath,

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to encode settings: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to read prompt input: {0}")]
    Prompt(std::io::Error),

    #[error("{0}")]
    Format(#[from] FormatError),
}

#[derive(Debug, Error)]
pub(crate) enum FormatError {
    #[error("Invalid format pattern \"{pattern}\"")]
    InvalidPattern { pattern: String },
}
