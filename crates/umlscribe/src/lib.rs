//! umlscribe - Turn class record streams into class diagrams
//!
//! An extractor (outside this crate) walks compiled classes and writes one
//! record block per class, interface or annotation. This crate reads those
//! blocks and renders them as PlantUML or yUML class diagrams.
//!
//! # Quick Start
//!
//! ```rust
//! use umlscribe::render_text;
//!
//! let records = "\
//! Class: com.acme.Foo
//! Extends: com.acme.Bar
//! Fields:
//!   - public Widget w
//! -----------------------------------------------------";
//!
//! let output = render_text(records, "plantuml").unwrap();
//! assert!(output.lines.contains(&"Bar <|-- Foo".to_string()));
//! assert!(output.lines.contains(&"Foo ---> Widget".to_string()));
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use std::collections::HashSet;
//! use umlscribe::prelude::*;
//!
//! let lines: Vec<String> = ["Class: a.Keep", "-----", "Class: a.Skip", "-----"]
//!     .iter()
//!     .map(|l| l.to_string())
//!     .collect();
//!
//! // Drop ignored entities
//! let ignored: HashSet<String> = ["Skip".to_string()].into_iter().collect();
//! let kept = normalize(&lines, &ignored);
//!
//! // Render with a specific notation
//! let output = YumlRenderer::new().render(&kept).unwrap();
//! assert_eq!(output.lines, vec!["[Keep]"]);
//! ```

pub mod core;
pub mod plugins;

use std::collections::HashSet;

pub use crate::core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        normalize, DiagramError, EntityKind, MalformedRecord, NotationWriter, Relation,
        RelationKind, RenderOutput, Renderer, Scanner, Visibility,
    };
    pub use crate::plugins::plantuml::PlantUmlRenderer;
    pub use crate::plugins::registry::NotationRegistry;
    pub use crate::plugins::yuml::YumlRenderer;
}

/// Render a record stream with the notation registered under `notation`
///
/// # Returns
/// * `Ok(RenderOutput)` - Diagram lines plus any skipped malformed records
/// * `Err` - [`DiagramError::UnsupportedNotation`] for an unknown key
///
/// # Example
/// ```rust
/// use umlscribe::render;
///
/// let lines = vec!["Class: a.Foo".to_string()];
/// let output = render(&lines, "yuml").unwrap();
/// assert_eq!(output.lines, vec!["[Foo]"]);
/// ```
pub fn render(lines: &[String], notation: &str) -> anyhow::Result<RenderOutput> {
    use crate::plugins::registry::NotationRegistry;

    NotationRegistry::with_default_notations().render(notation, lines)
}

/// Render a record stream after dropping the blocks of `ignored` entities
///
/// Names are simple names (`Widget`, not `com.acme.Widget`).
pub fn render_with_ignored(
    lines: &[String],
    notation: &str,
    ignored: &HashSet<String>,
) -> anyhow::Result<RenderOutput> {
    use crate::plugins::registry::NotationRegistry;

    NotationRegistry::with_default_notations().render_with_ignored(notation, lines, ignored)
}

/// Render record text as read from an extractor's output file
pub fn render_text(text: &str, notation: &str) -> anyhow::Result<RenderOutput> {
    render(&split_records(text), notation)
}

/// Split record text into lines
pub fn split_records(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}
