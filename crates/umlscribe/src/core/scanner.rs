//! Record stream scanner
//!
//! Every notation renders from the same single pass over the record stream.
//! The scanner tracks the open entity and the open member section, records
//! relations, and hands entity and member events to a [`NotationWriter`]
//! that owns the notation's syntax.

use tracing::{debug, span, trace, warn, Level};

use super::error::MalformedRecord;
use super::member::{FieldRecord, MemberSignature};
use super::record::{simple_name, strip_bullet, EntityKind, RecordLine, ROOT_OBJECT};
use super::relation::Relation;
use super::renderer::RenderOutput;

/// Member section opened by the last sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionMode {
    #[default]
    None,
    Interfaces,
    Constructors,
    Methods,
    Fields,
}

impl SectionMode {
    /// Closed transition table over classified lines
    pub fn next(self, line: &RecordLine<'_>) -> Self {
        match line {
            RecordLine::EntityHeader { .. } | RecordLine::Separator => SectionMode::None,
            RecordLine::Implements => SectionMode::Interfaces,
            RecordLine::Constructors => SectionMode::Constructors,
            RecordLine::Methods => SectionMode::Methods,
            RecordLine::Fields => SectionMode::Fields,
            RecordLine::Extends(_) | RecordLine::Content(_) => self,
        }
    }
}

/// Notation syntax plugged into the scanner
///
/// The scanner calls `open_entity`/`close_entity` around each block and
/// the member hooks in between. Relations are handed over once, to
/// `finish`, after the last block closed.
pub trait NotationWriter {
    /// Replacement for the `abstract` keyword on methods, if any
    fn abstract_marker(&self) -> Option<&'static str> {
        None
    }

    fn open_entity(&mut self, kind: EntityKind, name: &str);

    fn constructor(&mut self, member: &MemberSignature);

    fn method(&mut self, member: &MemberSignature);

    fn field(&mut self, field: &FieldRecord);

    fn close_entity(&mut self);

    /// Format one relation line
    fn relation(&self, relation: &Relation) -> String;

    /// Produce the final lines: blocks, then relations, inside any
    /// header/footer
    fn finish(self, relations: &[Relation]) -> Vec<String>;
}

struct OpenEntity {
    kind: EntityKind,
    name: String,
}

/// Single-pass scanner driving one [`NotationWriter`]
pub struct Scanner<W: NotationWriter> {
    writer: W,
    entity: Option<OpenEntity>,
    mode: SectionMode,
    relations: Vec<Relation>,
    malformed: Vec<MalformedRecord>,
    entity_count: usize,
}

impl<W: NotationWriter> Scanner<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            entity: None,
            mode: SectionMode::None,
            relations: Vec::new(),
            malformed: Vec::new(),
            entity_count: 0,
        }
    }

    /// Scan a whole stream and finish the writer
    pub fn scan<S: AsRef<str>>(writer: W, lines: &[S]) -> RenderOutput {
        let scan_span = span!(Level::DEBUG, "scan_records", line_count = lines.len());
        let _enter = scan_span.enter();

        let mut scanner = Self::new(writer);
        for (index, line) in lines.iter().enumerate() {
            scanner.feed(index + 1, line.as_ref());
        }
        scanner.finish()
    }

    /// Process one line; `line_number` is 1-based
    pub fn feed(&mut self, line_number: usize, raw: &str) {
        let text = raw.trim();
        if text.is_empty() {
            return;
        }

        let line = RecordLine::classify(text);
        match line {
            RecordLine::EntityHeader { kind, name } => {
                self.close_entity();
                let name = simple_name(name);
                if name.is_empty() {
                    // Members up to the next header belong to no entity
                    self.reject(line_number, text, "missing entity name");
                } else {
                    self.open_entity(kind, name);
                }
            }
            RecordLine::Extends(parent) => self.extends(line_number, text, parent),
            RecordLine::Separator => self.close_entity(),
            RecordLine::Content(content) => self.content(line_number, content),
            RecordLine::Implements
            | RecordLine::Constructors
            | RecordLine::Methods
            | RecordLine::Fields => {}
        }

        let next = self.mode.next(&line);
        if next != self.mode {
            trace!(from = ?self.mode, to = ?next, "Section transition");
        }
        self.mode = next;
    }

    /// Close any open entity and produce the output
    pub fn finish(mut self) -> RenderOutput {
        self.close_entity();

        for record in &self.malformed {
            warn!(%record, "Skipped malformed record");
        }
        debug!(
            entity_count = self.entity_count,
            relation_count = self.relations.len(),
            malformed_count = self.malformed.len(),
            "Scan completed"
        );

        let relation_count = self.relations.len();
        let lines = self.writer.finish(&self.relations);
        RenderOutput {
            lines,
            malformed: self.malformed,
            entity_count: self.entity_count,
            relation_count,
        }
    }

    fn open_entity(&mut self, kind: EntityKind, name: &str) {
        trace!(%kind, entity = name, "Opening entity");
        self.writer.open_entity(kind, name);
        self.entity = Some(OpenEntity {
            kind,
            name: name.to_string(),
        });
    }

    fn close_entity(&mut self) {
        if let Some(entity) = self.entity.take() {
            trace!(kind = %entity.kind, entity = %entity.name, "Closing entity");
            self.writer.close_entity();
            self.entity_count += 1;
        }
    }

    fn entity_name(&self) -> Option<&str> {
        self.entity.as_ref().map(|e| e.name.as_str())
    }

    fn reject(&mut self, line_number: usize, line: &str, reason: &str) {
        let record = MalformedRecord::new(line_number, line, self.entity_name(), reason);
        self.malformed.push(record);
    }

    fn extends(&mut self, line_number: usize, text: &str, parent: &str) {
        if self.entity.is_none() {
            self.reject(line_number, text, "superclass outside of an entity");
            return;
        }
        if parent.is_empty() {
            self.reject(line_number, text, "missing superclass name");
            return;
        }
        if parent == ROOT_OBJECT {
            return;
        }

        if let Some(owner) = self.entity_name() {
            let relation = Relation::inheritance(owner, simple_name(parent));
            self.relations.push(relation);
        }
    }

    fn content(&mut self, line_number: usize, text: &str) {
        if self.mode == SectionMode::None {
            trace!(line_number, "Ignoring line outside of a member section");
            return;
        }
        let Some(owner) = self.entity_name().map(str::to_string) else {
            self.reject(line_number, text, "member line outside of an entity");
            return;
        };

        match self.mode {
            SectionMode::None => {}
            SectionMode::Interfaces => {
                let interface = simple_name(strip_bullet(text));
                if interface.is_empty() {
                    self.reject(line_number, text, "missing interface name");
                } else {
                    self.relations.push(Relation::realization(owner, interface));
                }
            }
            SectionMode::Constructors => match MemberSignature::parse(text) {
                Some(member) => self.writer.constructor(&member),
                None => self.reject(line_number, text, "missing constructor signature"),
            },
            SectionMode::Methods => match MemberSignature::parse(text) {
                Some(member) => self.writer.method(&member),
                None => self.reject(line_number, text, "missing method signature"),
            },
            SectionMode::Fields => match FieldRecord::parse(text) {
                Some(field) => {
                    if let Some(target) = field.composition_target() {
                        self.relations.push(Relation::composition(owner, target));
                    }
                    self.writer.field(&field);
                }
                None => self.reject(line_number, text, "expected `modifier type name`"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::relation::RelationKind;

    /// Writer that records events as plain strings
    #[derive(Default)]
    struct EventLog {
        events: Vec<String>,
    }

    impl NotationWriter for EventLog {
        fn abstract_marker(&self) -> Option<&'static str> {
            Some("*")
        }

        fn open_entity(&mut self, kind: EntityKind, name: &str) {
            self.events.push(format!("open {} {}", kind, name));
        }

        fn constructor(&mut self, member: &MemberSignature) {
            self.events
                .push(format!("ctor {}", member.render(self.abstract_marker())));
        }

        fn method(&mut self, member: &MemberSignature) {
            self.events
                .push(format!("method {}", member.render(self.abstract_marker())));
        }

        fn field(&mut self, field: &FieldRecord) {
            self.events.push(format!("field {}", field.render()));
        }

        fn close_entity(&mut self) {
            self.events.push("close".to_string());
        }

        fn relation(&self, relation: &Relation) -> String {
            format!("{:?} {} {}", relation.kind, relation.owner, relation.target)
        }

        fn finish(mut self, relations: &[Relation]) -> Vec<String> {
            let lines: Vec<String> = relations.iter().map(|r| self.relation(r)).collect();
            self.events.extend(lines);
            self.events
        }
    }

    fn scan(lines: &[&str]) -> RenderOutput {
        Scanner::scan(EventLog::default(), lines)
    }

    #[test]
    fn test_section_transitions() {
        let mode = SectionMode::None;
        assert_eq!(mode.next(&RecordLine::Implements), SectionMode::Interfaces);
        assert_eq!(mode.next(&RecordLine::Fields), SectionMode::Fields);
        assert_eq!(
            SectionMode::Fields.next(&RecordLine::Content("- int x")),
            SectionMode::Fields
        );
        assert_eq!(
            SectionMode::Methods.next(&RecordLine::Extends("a.B")),
            SectionMode::Methods
        );
        assert_eq!(SectionMode::Methods.next(&RecordLine::Separator), SectionMode::None);
        assert_eq!(
            SectionMode::Fields.next(&RecordLine::EntityHeader {
                kind: EntityKind::Class,
                name: "a.B"
            }),
            SectionMode::None
        );
    }

    #[test]
    fn test_events_in_order() {
        let output = scan(&[
            "Class: a.Foo",
            "Extends: a.Base",
            "Implements:",
            "  - a.Port",
            "Fields:",
            "  - private Widget w",
            "Constructors:",
            "  - public Foo()",
            "Methods:",
            "  - public abstract void run()",
            "--------",
        ]);

        assert_eq!(
            output.lines,
            vec![
                "open class Foo",
                "field - w : Widget",
                "ctor + Foo()",
                "method + * void run()",
                "close",
                "Inheritance Foo Base",
                "Realization Foo Port",
                "Composition Foo Widget",
            ]
        );
        assert_eq!(output.entity_count, 1);
        assert_eq!(output.relation_count, 3);
        assert!(output.is_clean());
    }

    #[test]
    fn test_root_object_has_no_edge() {
        let output = scan(&["Class: a.Foo", "Extends: java.lang.Object"]);
        assert_eq!(output.relation_count, 0);
        assert_eq!(output.lines, vec!["open class Foo", "close"]);
    }

    #[test]
    fn test_open_entity_closed_at_end_of_stream() {
        let output = scan(&["Class: a.Foo", "Class: a.Bar"]);
        assert_eq!(
            output.lines,
            vec!["open class Foo", "close", "open class Bar", "close"]
        );
        assert_eq!(output.entity_count, 2);
    }

    #[test]
    fn test_separator_resets_section() {
        // The member line after the separator belongs to no section
        let output = scan(&["Class: a.Foo", "Fields:", "------", "  - private int x"]);
        assert_eq!(output.lines, vec!["open class Foo", "close"]);
        assert!(output.is_clean());
    }

    #[test]
    fn test_malformed_field_is_skipped() {
        let output = scan(&[
            "Class: a.Foo",
            "Fields:",
            "  - Widget",
            "  - private int x",
            "------",
            "Class: a.Bar",
        ]);

        assert_eq!(output.malformed.len(), 1);
        let record = &output.malformed[0];
        assert_eq!(record.line_number, 3);
        assert_eq!(record.line, "- Widget");
        assert_eq!(record.entity.as_deref(), Some("Foo"));
        assert_eq!(output.entity_count, 2);
        assert!(output.lines.contains(&"field - x : int".to_string()));
    }

    #[test]
    fn test_members_without_entity() {
        let output = scan(&["Fields:", "  - private Widget w", "Extends: a.Base"]);
        assert_eq!(output.malformed.len(), 2);
        assert!(output.malformed.iter().all(|r| r.entity.is_none()));
        assert!(output.lines.is_empty());
    }

    #[test]
    fn test_relations_not_deduplicated() {
        let output = scan(&[
            "Class: a.Foo",
            "Fields:",
            "  - private Widget a",
            "  - private Widget b",
        ]);
        let compositions = output
            .lines
            .iter()
            .filter(|l| l.starts_with(&format!("{:?}", RelationKind::Composition)))
            .count();
        assert_eq!(compositions, 2);
    }

    #[test]
    fn test_header_without_name_opens_no_entity() {
        let output = scan(&["Class: a.Foo", "Class: a.b.", "Fields:", "  - private Widget w"]);
        assert_eq!(output.lines, vec!["open class Foo", "close"]);
        assert_eq!(output.entity_count, 1);
        assert_eq!(output.relation_count, 0);

        let reasons: Vec<&str> = output.malformed.iter().map(|r| r.reason.as_str()).collect();
        assert_eq!(reasons, vec!["missing entity name", "member line outside of an entity"]);
        assert!(output.malformed.iter().all(|r| r.entity.is_none()));
    }

    #[test]
    fn test_blank_lines_ignored() {
        let output = scan(&["", "Class: a.Foo", "   ", "Fields:", "", "  - int x"]);
        assert!(output.is_clean());
        assert_eq!(
            output.lines,
            vec!["open class Foo", "field ~ x : int", "close"]
        );
    }
}
