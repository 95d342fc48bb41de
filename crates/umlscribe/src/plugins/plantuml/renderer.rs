//! PlantUML renderer
//!
//! Blocks are written eagerly: the opening line when the entity opens,
//! members as they are scanned, `}` when it closes.

use anyhow::Result;
use tracing::{info, span, Level};

use crate::core::{
    EntityKind, FieldRecord, MemberSignature, NotationWriter, Relation, RelationKind,
    RenderOutput, Renderer, Scanner,
};

const HEADER: &str = "@startuml";
const FOOTER: &str = "@enduml";
const ABSTRACT_MARKER: &str = "{abstract}";

struct PlantUmlWriter {
    lines: Vec<String>,
}

impl PlantUmlWriter {
    fn new() -> Self {
        Self {
            lines: vec![HEADER.to_string()],
        }
    }
}

impl NotationWriter for PlantUmlWriter {
    fn abstract_marker(&self) -> Option<&'static str> {
        Some(ABSTRACT_MARKER)
    }

    fn open_entity(&mut self, kind: EntityKind, name: &str) {
        self.lines.push(format!("{} {} {{", kind.keyword(), name));
    }

    fn constructor(&mut self, member: &MemberSignature) {
        self.lines.push(member.render(None));
    }

    fn method(&mut self, member: &MemberSignature) {
        self.lines.push(member.render(self.abstract_marker()));
    }

    fn field(&mut self, field: &FieldRecord) {
        self.lines.push(field.render());
    }

    fn close_entity(&mut self) {
        self.lines.push("}".to_string());
    }

    fn relation(&self, relation: &Relation) -> String {
        let Relation {
            kind,
            owner,
            target,
        } = relation;
        match kind {
            RelationKind::Inheritance => format!("{} <|-- {}", target, owner),
            RelationKind::Realization => format!("{} <|.. {}", target, owner),
            RelationKind::Composition => format!("{} ---> {}", owner, target),
        }
    }

    fn finish(mut self, relations: &[Relation]) -> Vec<String> {
        let relation_lines: Vec<String> = relations.iter().map(|r| self.relation(r)).collect();
        self.lines.extend(relation_lines);
        self.lines.push(FOOTER.to_string());
        self.lines
    }
}

/// Renders record streams as PlantUML class diagrams
pub struct PlantUmlRenderer;

impl PlantUmlRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlantUmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlantUmlRenderer {
    fn render(&self, lines: &[String]) -> Result<RenderOutput> {
        let render_span = span!(Level::INFO, "render_plantuml", line_count = lines.len());
        let _enter = render_span.enter();

        let output = Scanner::scan(PlantUmlWriter::new(), lines);
        info!(
            entity_count = output.entity_count,
            relation_count = output.relation_count,
            "Rendered PlantUML diagram"
        );
        Ok(output)
    }

    fn name(&self) -> &'static str {
        "plantuml"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn format(&self) -> &'static str {
        "block"
    }
}
