//! Command notices and results.

use std::fmt;

use wgram_core::Windowgram;

/// How serious a notice is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The command took effect (possibly as a no-op); something is worth
    /// knowing.
    Warning,
    /// The command was rejected; the windowgram is unchanged.
    Error,
}

/// A warning or error attached to a command's result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    severity: Severity,
    message: String,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self { severity: Severity::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { severity: Severity::Error, message: message.into() }
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Warning => write!(f, "warning: {}", self.message),
            Severity::Error => write!(f, "error: {}", self.message),
        }
    }
}

/// A command's outcome: the windowgram to keep plus any notices.
///
/// When any notice is an error the windowgram is byte-identical to the
/// command's input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlexResult {
    pub windowgram: Windowgram,
    pub notices: Vec<Notice>,
}

impl FlexResult {
    /// True when the command was rejected.
    #[must_use]
    pub fn failed(&self) -> bool {
        self.notices.iter().any(Notice::is_error)
    }
}
