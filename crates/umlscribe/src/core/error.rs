//! Core error types for record rendering
//!
//! This module defines the error kinds surfaced by the normalize → render
//! pipeline and by the glue that feeds it.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A record line that does not have the shape its section expects
///
/// Malformed records are recoverable: the scanner skips the offending line,
/// keeps one of these on the render output, and carries on with the next
/// line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRecord {
    /// 1-based position of the line in the input stream
    pub line_number: usize,
    /// The trimmed line text
    pub line: String,
    /// Entity the line was attributed to, if one was open
    pub entity: Option<String>,
    pub reason: String,
}

impl MalformedRecord {
    pub fn new(
        line_number: usize,
        line: impl Into<String>,
        entity: Option<&str>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            line_number,
            line: line.into(),
            entity: entity.map(str::to_string),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for MalformedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.entity {
            Some(entity) => write!(
                f,
                "line {} in {}: {} ({:?})",
                self.line_number, entity, self.reason, self.line
            ),
            None => write!(
                f,
                "line {}: {} ({:?})",
                self.line_number, self.reason, self.line
            ),
        }
    }
}

/// Core error types for record rendering
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Unsupported notation: {notation}")]
    UnsupportedNotation { notation: String },

    #[error("Malformed record: {0}")]
    MalformedRecord(MalformedRecord),

    #[error("Unreadable record source '{}': {source}", .path.display())]
    UnreadableSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Create a new unsupported notation error
    pub fn unsupported_notation(notation: impl Into<String>) -> Self {
        Self::UnsupportedNotation {
            notation: notation.into(),
        }
    }

    /// Create a new unreadable source error
    pub fn unreadable_source(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::UnreadableSource {
            path: path.into(),
            source,
        }
    }
}

impl From<MalformedRecord> for DiagramError {
    fn from(record: MalformedRecord) -> Self {
        Self::MalformedRecord(record)
    }
}
