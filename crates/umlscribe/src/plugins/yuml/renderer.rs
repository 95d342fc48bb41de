//! yUML renderer
//!
//! Entity text is buffered while the block is open and written as one
//! bracketed line when it closes.
//!
//! Member and relation text is written as is. A type such as `String[]`
//! keeps its brackets, which yUML reads as nested boxes.

use anyhow::Result;
use tracing::{info, span, Level};

use crate::core::{
    EntityKind, FieldRecord, MemberSignature, NotationWriter, Relation, RelationKind,
    RenderOutput, Renderer, Scanner,
};

/// Entity being buffered: name and member texts
struct PendingEntity {
    name: String,
    members: Vec<String>,
}

impl PendingEntity {
    /// `[Name]`, or `[Name|a;b;c]` when there are members
    fn into_line(self) -> String {
        if self.members.is_empty() {
            format!("[{}]", self.name)
        } else {
            format!("[{}|{}]", self.name, self.members.join(";"))
        }
    }
}

struct YumlWriter {
    lines: Vec<String>,
    pending: Option<PendingEntity>,
}

impl YumlWriter {
    fn new() -> Self {
        Self {
            lines: Vec::new(),
            pending: None,
        }
    }

    fn push_member(&mut self, text: String) {
        if let Some(pending) = self.pending.as_mut() {
            pending.members.push(text);
        }
    }
}

impl NotationWriter for YumlWriter {
    fn open_entity(&mut self, _kind: EntityKind, name: &str) {
        self.pending = Some(PendingEntity {
            name: name.to_string(),
            members: Vec::new(),
        });
    }

    fn constructor(&mut self, member: &MemberSignature) {
        self.push_member(member.render(None));
    }

    fn method(&mut self, member: &MemberSignature) {
        self.push_member(member.render(self.abstract_marker()));
    }

    fn field(&mut self, field: &FieldRecord) {
        self.push_member(field.render());
    }

    fn close_entity(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.lines.push(pending.into_line());
        }
    }

    fn relation(&self, relation: &Relation) -> String {
        let glyph = match relation.kind {
            RelationKind::Inheritance => "^-",
            RelationKind::Realization => "^.-",
            RelationKind::Composition => "->",
        };
        format!("[{}]{}[{}]", relation.owner, glyph, relation.target)
    }

    fn finish(mut self, relations: &[Relation]) -> Vec<String> {
        let relation_lines: Vec<String> = relations.iter().map(|r| self.relation(r)).collect();
        self.lines.extend(relation_lines);
        self.lines
    }
}

/// Renders record streams as yUML class diagrams
pub struct YumlRenderer;

impl YumlRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for YumlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for YumlRenderer {
    fn render(&self, lines: &[String]) -> Result<RenderOutput> {
        let render_span = span!(Level::INFO, "render_yuml", line_count = lines.len());
        let _enter = render_span.enter();

        let output = Scanner::scan(YumlWriter::new(), lines);
        info!(
            entity_count = output.entity_count,
            relation_count = output.relation_count,
            "Rendered yUML diagram"
        );
        Ok(output)
    }

    fn name(&self) -> &'static str {
        "yuml"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn format(&self) -> &'static str {
        "bracket"
    }
}
