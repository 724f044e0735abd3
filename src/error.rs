//! Error types for insertgen.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for insertgen operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The source file does not exist or could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source text is not valid in the scanned language.
    #[error("Syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a syntax error at the given byte offset of `source`.
    pub fn syntax(source: &str, offset: usize, message: impl Into<String>) -> Self {
        let (line, column) = line_column(source, offset);
        Self::Syntax {
            line,
            column,
            message: message.into(),
        }
    }

    /// Whether this error means "the file could not be parsed".
    ///
    /// Reading and syntax failures are reported the same way by the
    /// extractor: once, and with an empty result.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Syntax { .. })
    }
}

/// 1-based line and column (in chars) of a byte offset.
fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

/// Result type alias for insertgen operations.
pub type Result<T> = std::result::Result<T, Error>;
