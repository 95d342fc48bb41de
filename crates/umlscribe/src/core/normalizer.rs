//! Record stream normalizer
//!
//! Removes whole entity blocks for ignored names before rendering. The pass
//! is a four-state machine over classified lines; see [`NormalizerState`].

use std::collections::HashSet;

use tracing::{debug, span, trace, Level};

use super::record::{simple_name, RecordLine};

/// State of the normalizer between two lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizerState {
    /// Lines are emitted as they come
    #[default]
    Passthrough,
    /// Inside an ignored block; everything up to the separator is dropped
    SkippingIgnoredEntity,
    /// After a `Fields:` sentinel
    SkippingFieldsTail,
    /// After a `Methods:` sentinel
    SkippingMethodsTail,
}

/// What to do with the line that caused a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Disposition {
    Emit,
    Drop,
}

impl NormalizerState {
    /// Closed transition table.
    ///
    /// The two tail states emit every line they see. They only record which
    /// member section is open; no section content is ever trimmed.
    fn next(self, line: &RecordLine<'_>, ignored: &HashSet<String>) -> (Self, Disposition) {
        use NormalizerState::*;

        match (self, line) {
            (_, RecordLine::EntityHeader { name, .. }) => {
                if ignored.contains(simple_name(name)) {
                    (SkippingIgnoredEntity, Disposition::Drop)
                } else {
                    (Passthrough, Disposition::Emit)
                }
            }
            (SkippingIgnoredEntity, RecordLine::Separator) => (Passthrough, Disposition::Drop),
            (SkippingIgnoredEntity, _) => (SkippingIgnoredEntity, Disposition::Drop),
            (_, RecordLine::Separator) => (Passthrough, Disposition::Emit),
            (_, RecordLine::Fields) => (SkippingFieldsTail, Disposition::Emit),
            (_, RecordLine::Methods) => (SkippingMethodsTail, Disposition::Emit),
            (state, _) => (state, Disposition::Emit),
        }
    }
}

/// Drop the blocks of every entity whose simple name is in `ignored`.
///
/// A block goes as a unit: header, member sections and its trailing
/// separator. With an empty ignore set the output equals the input.
pub fn normalize<S: AsRef<str>>(lines: &[S], ignored: &HashSet<String>) -> Vec<String> {
    let normalize_span = span!(
        Level::DEBUG,
        "normalize_records",
        line_count = lines.len(),
        ignored_count = ignored.len()
    );
    let _enter = normalize_span.enter();

    let mut state = NormalizerState::default();
    let mut output = Vec::with_capacity(lines.len());
    let mut dropped_blocks = 0usize;

    for raw in lines {
        let raw = raw.as_ref();
        let line = RecordLine::classify(raw);
        let (next, disposition) = state.next(&line, ignored);

        if next == NormalizerState::SkippingIgnoredEntity
            && state != NormalizerState::SkippingIgnoredEntity
        {
            dropped_blocks += 1;
        }
        if next != state {
            trace!(from = ?state, to = ?next, "Normalizer transition");
        }
        if let (RecordLine::EntityHeader { name, .. }, Disposition::Drop) = (&line, disposition) {
            trace!(entity = simple_name(name), "Dropping ignored entity");
        }

        if disposition == Disposition::Emit {
            output.push(raw.to_string());
        }
        state = next;
    }

    debug!(
        dropped_blocks,
        kept_lines = output.len(),
        "Normalization completed"
    );
    output
}
