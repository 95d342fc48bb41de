//! Notation registry
//!
//! Maps notation keys to renderer instances and runs the
//! normalize → render pipeline for a chosen key.

use std::collections::{BTreeMap, HashSet};

use anyhow::Result;
use tracing::{debug, info, span, warn, Level};

use crate::core::{normalize, DiagramError, RenderOutput, Renderer};
use crate::plugins::plantuml::PlantUmlRenderer;
use crate::plugins::yuml::YumlRenderer;

/// Lookup from notation key to renderer
///
/// Keys are matched case-insensitively. Renderers are stateless, so the
/// registry can be shared between threads and reused across calls.
pub struct NotationRegistry {
    renderers: BTreeMap<String, Box<dyn Renderer>>,
}

impl NotationRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            renderers: BTreeMap::new(),
        }
    }

    /// Create a registry holding the `plantuml` and `yuml` renderers
    pub fn with_default_notations() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(PlantUmlRenderer::new()));
        registry.register(Box::new(YumlRenderer::new()));
        registry
    }

    /// Register a renderer under its own name, replacing any previous one
    pub fn register(&mut self, renderer: Box<dyn Renderer>) {
        let key = renderer.name().to_lowercase();
        debug!(notation = %key, "Registering renderer");
        self.renderers.insert(key, renderer);
    }

    /// Registered keys, sorted
    pub fn notations(&self) -> Vec<&str> {
        self.renderers.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, notation: &str) -> bool {
        self.renderers.contains_key(&notation.to_lowercase())
    }

    /// Look up a renderer by key
    pub fn get(&self, notation: &str) -> Result<&dyn Renderer, DiagramError> {
        match self.renderers.get(&notation.to_lowercase()) {
            Some(renderer) => Ok(&**renderer),
            None => {
                warn!(notation, "Unsupported notation requested");
                Err(DiagramError::unsupported_notation(notation))
            }
        }
    }

    /// Render a record stream with the renderer registered under `notation`
    ///
    /// The lookup happens before any line is scanned, so an unknown key
    /// fails without producing partial output.
    pub fn render(&self, notation: &str, lines: &[String]) -> Result<RenderOutput> {
        self.render_with_ignored(notation, lines, &HashSet::new())
    }

    /// Drop the blocks of `ignored` entities, then render
    pub fn render_with_ignored(
        &self,
        notation: &str,
        lines: &[String],
        ignored: &HashSet<String>,
    ) -> Result<RenderOutput> {
        let pipeline_span = span!(
            Level::INFO,
            "render_pipeline",
            notation,
            line_count = lines.len()
        );
        let _enter = pipeline_span.enter();

        let renderer = self.get(notation)?;

        let output = if ignored.is_empty() {
            renderer.render(lines)?
        } else {
            let normalized = normalize(lines, ignored);
            debug!(
                before = lines.len(),
                after = normalized.len(),
                "Applied ignore list"
            );
            renderer.render(&normalized)?
        };

        info!(
            notation = renderer.name(),
            output_lines = output.lines.len(),
            malformed = output.malformed.len(),
            "Pipeline completed"
        );
        Ok(output)
    }
}

impl Default for NotationRegistry {
    fn default() -> Self {
        Self::with_default_notations()
    }
}
