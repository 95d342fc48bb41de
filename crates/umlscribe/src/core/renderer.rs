//! Core renderer trait for record streams
//!
//! A renderer turns the (optionally normalized) record stream into the lines
//! of one diagram notation. Renderers hold no mutable state, so one
//! instance can serve any number of calls, from any thread.

use anyhow::Result;

use super::error::MalformedRecord;

/// Result of one render call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOutput {
    /// Diagram lines: entity blocks, then relations, inside any header/footer
    pub lines: Vec<String>,
    /// Lines that were skipped because their shape was wrong
    pub malformed: Vec<MalformedRecord>,
    /// Number of entity blocks emitted
    pub entity_count: usize,
    /// Number of relation lines emitted
    pub relation_count: usize,
}

impl RenderOutput {
    /// Join the lines with newlines
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_clean(&self) -> bool {
        self.malformed.is_empty()
    }
}

/// Core trait for notation renderers
///
/// # Example
/// ```
/// use umlscribe::core::Renderer;
/// use umlscribe::plugins::plantuml::PlantUmlRenderer;
///
/// let lines = vec!["Class: a.Foo".to_string()];
/// let output = PlantUmlRenderer::new().render(&lines).unwrap();
/// assert_eq!(output.lines, vec!["@startuml", "class Foo {", "}", "@enduml"]);
/// ```
pub trait Renderer: Send + Sync {
    /// Render a record stream into notation lines
    fn render(&self, lines: &[String]) -> Result<RenderOutput>;

    /// Registry key of this renderer
    fn name(&self) -> &'static str;

    /// Get the version of this renderer
    fn version(&self) -> &'static str;

    /// Layout style of the notation (`block` or `bracket`)
    fn format(&self) -> &'static str;
}
