use thiserror::Error;
use wgram_core::WindowgramError;

/// Failures surfaced at the command line.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Command not found: {0}")]
    UnknownCommand(String),

    #[error("Command argument mismatch: {0}")]
    ArgumentMismatch(String),

    #[error("There were warnings or errors when processing: {command}\n{details}")]
    CommandFailed { command: String, details: String },

    #[error("invalid screen size `{0}`, expected WIDTHxHEIGHT")]
    InvalidScreen(String),

    #[error("failed to read {path}: {source}")]
    Io { path: String, source: std::io::Error },

    #[error(transparent)]
    Windowgram(#[from] WindowgramError),

    #[error("failed to encode split plan: {0}")]
    Plan(#[from] serde_json::Error),
}
