//! Record stream grammar
//!
//! The extractor writes one entity per block, each block a run of sentinel
//! lines and the content lines that belong to them:
//!
//! ```text
//! -----------------------------------------------------
//! Class: com.acme.Widget
//! Extends: com.acme.Part
//! Implements:
//!   - java.io.Serializable
//! Fields:
//!   - private int size
//! Constructors:
//!   - public Widget(int)
//! Methods:
//!   - public int getSize()
//! ----------------------------------------------------
//! ```
//!
//! This module classifies single lines into [`RecordLine`] values. It has no
//! state; the normalizer and the scanner each drive their own state machine
//! off the classified lines.

use std::fmt;

/// The universal root type; never recorded as a superclass edge
pub const ROOT_OBJECT: &str = "java.lang.Object";

/// Minimum run of dashes that counts as a block separator
pub const SEPARATOR_MIN_RUN: usize = 4;

const CLASS: &str = "Class:";
const INTERFACE: &str = "Interface:";
const ANNOTATION: &str = "Annotation:";
const EXTENDS: &str = "Extends:";
const IMPLEMENTS: &str = "Implements:";
const CONSTRUCTORS: &str = "Constructors:";
const METHODS: &str = "Methods:";
const FIELDS: &str = "Fields:";

/// Kind of entity a block describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Class,
    Interface,
    Annotation,
}

impl EntityKind {
    /// Keyword used for this kind in block-style notations
    pub fn keyword(self) -> &'static str {
        match self {
            EntityKind::Class => "class",
            EntityKind::Interface => "interface",
            EntityKind::Annotation => "annotation",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One classified line of the record stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLine<'a> {
    /// `Class:`, `Interface:` or `Annotation:` with the qualified name
    EntityHeader { kind: EntityKind, name: &'a str },
    /// `Extends:` with the qualified superclass name
    Extends(&'a str),
    Implements,
    Constructors,
    Methods,
    Fields,
    /// A run of dashes closing the block
    Separator,
    /// Anything else, owned by the section opened last
    Content(&'a str),
}

impl<'a> RecordLine<'a> {
    /// Classify a line. Surrounding whitespace is ignored.
    pub fn classify(line: &'a str) -> Self {
        let line = line.trim();

        if let Some(name) = line.strip_prefix(CLASS) {
            return RecordLine::EntityHeader {
                kind: EntityKind::Class,
                name: name.trim(),
            };
        }
        if let Some(name) = line.strip_prefix(INTERFACE) {
            return RecordLine::EntityHeader {
                kind: EntityKind::Interface,
                name: name.trim(),
            };
        }
        if let Some(name) = line.strip_prefix(ANNOTATION) {
            return RecordLine::EntityHeader {
                kind: EntityKind::Annotation,
                name: name.trim(),
            };
        }
        if let Some(parent) = line.strip_prefix(EXTENDS) {
            return RecordLine::Extends(parent.trim());
        }
        if line.starts_with(IMPLEMENTS) {
            return RecordLine::Implements;
        }
        if line.starts_with(CONSTRUCTORS) {
            return RecordLine::Constructors;
        }
        if line.starts_with(METHODS) {
            return RecordLine::Methods;
        }
        if line.starts_with(FIELDS) {
            return RecordLine::Fields;
        }
        if is_separator(line) {
            return RecordLine::Separator;
        }

        RecordLine::Content(line)
    }

    /// Whether this line opens a new entity block
    pub fn is_entity_header(&self) -> bool {
        matches!(self, RecordLine::EntityHeader { .. })
    }
}

/// A separator is a trimmed line made only of dashes
pub fn is_separator(line: &str) -> bool {
    let line = line.trim();
    line.len() >= SEPARATOR_MIN_RUN && line.bytes().all(|b| b == b'-')
}

/// Strip the package qualifier: everything up to and including the last `.`
pub fn simple_name(qualified: &str) -> &str {
    match qualified.rfind('.') {
        Some(pos) => &qualified[pos + 1..],
        None => qualified,
    }
}

/// Strip the leading `-` bullet the extractor puts before content lines
pub fn strip_bullet(line: &str) -> &str {
    let line = line.trim();
    line.strip_prefix('-').map(str::trim_start).unwrap_or(line)
}
