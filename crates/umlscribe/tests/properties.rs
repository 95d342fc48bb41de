//! Property tests over generated record streams

use std::collections::HashSet;

use proptest::prelude::*;
use umlscribe::prelude::*;

const KINDS: &[&str] = &["Class", "Interface", "Annotation"];
const ACCESS: &[&str] = &["public ", "private ", "protected ", ""];
const KEYWORDS: &[&str] = &[
    "public", "private", "protected", "static", "final", "abstract", "native", "default",
    "sealed",
];

fn arb_name() -> impl Strategy<Value = String> {
    "[A-Z][a-zA-Z0-9]{0,8}"
}

fn arb_field() -> impl Strategy<Value = String> {
    (
        prop::sample::select(ACCESS),
        "[a-zA-Z][a-zA-Z0-9]{0,6}".prop_filter("type must not be a modifier", |t| {
            !KEYWORDS.contains(&t.as_str())
        }),
        "[a-z][a-zA-Z0-9]{0,6}",
    )
        .prop_map(|(access, type_name, name)| format!("  - {}{} {}", access, type_name, name))
}

/// One record block with a header, optional superclass and fields
fn arb_block(name: String) -> impl Strategy<Value = Vec<String>> {
    (
        prop::sample::select(KINDS),
        prop::option::of(prop_oneof![Just("java.lang.Object".to_string()), arb_name()]),
        prop::collection::vec(arb_field(), 0..4),
    )
        .prop_map(move |(kind, parent, fields)| {
            let mut block = vec![format!("{}: com.acme.{}", kind, name)];
            if let Some(parent) = parent {
                block.push(format!("Extends: {}", parent));
            }
            if !fields.is_empty() {
                block.push("Fields:".to_string());
                block.extend(fields);
            }
            block.push("-".repeat(52));
            block
        })
}

/// A stream of blocks with distinct entity names
fn arb_stream() -> impl Strategy<Value = (Vec<String>, Vec<String>)> {
    prop::collection::hash_set(arb_name(), 0..6)
        .prop_flat_map(|names| {
            let names: Vec<String> = names.into_iter().collect();
            let blocks: Vec<_> = names.iter().cloned().map(arb_block).collect();
            (Just(names), blocks)
        })
        .prop_map(|(names, blocks)| (names, blocks.concat()))
}

fn is_block_opener(line: &str) -> bool {
    ["class ", "interface ", "annotation "]
        .iter()
        .any(|kind| line.starts_with(kind))
        && line.ends_with(" {")
}

proptest! {
    /// Every header yields exactly one entity block in either notation.
    #[test]
    fn test_one_block_per_entity((names, stream) in arb_stream()) {
        let plantuml = PlantUmlRenderer::new().render(&stream).unwrap();
        let openers = plantuml.lines.iter().filter(|l| is_block_opener(l)).count();
        prop_assert_eq!(openers, names.len());
        prop_assert_eq!(plantuml.entity_count, names.len());

        let yuml = YumlRenderer::new().render(&stream).unwrap();
        prop_assert_eq!(yuml.entity_count, names.len());
        prop_assert_eq!(yuml.lines.len(), names.len() + yuml.relation_count);
    }

    /// An empty ignore set leaves the stream untouched.
    #[test]
    fn test_normalize_identity((_names, stream) in arb_stream()) {
        prop_assert_eq!(normalize(&stream, &HashSet::new()), stream);
    }

    /// Ignored entities never open a block in the rendered output.
    #[test]
    fn test_ignored_entities_absent(
        (names, stream) in arb_stream(),
        keep_mask in prop::collection::vec(any::<bool>(), 6),
    ) {
        let ignored: HashSet<String> = names
            .iter()
            .zip(&keep_mask)
            .filter(|(_, keep)| !**keep)
            .map(|(name, _)| name.clone())
            .collect();

        let registry = NotationRegistry::with_default_notations();
        let output = registry.render_with_ignored("plantuml", &stream, &ignored).unwrap();
        prop_assert_eq!(output.entity_count, names.len() - ignored.len());
        for name in &ignored {
            let opener = format!(" {} {{", name);
            prop_assert!(!output.lines.iter().any(|l| is_block_opener(l) && l.ends_with(&opener)));
        }
    }

    /// The root object type is never drawn as a superclass.
    #[test]
    fn test_root_object_has_no_edge(name in arb_name()) {
        let stream = vec![
            format!("Class: a.{}", name),
            "Extends: java.lang.Object".to_string(),
        ];
        let output = YumlRenderer::new().render(&stream).unwrap();
        prop_assert_eq!(output.relation_count, 0);
        prop_assert_eq!(output.lines, vec![format!("[{}]", name)]);
    }

    /// Composition edges follow the case of the field type's first letter.
    #[test]
    fn test_composition_follows_type_case(
        type_name in "[a-zA-Z][a-zA-Z0-9]{0,6}",
        field in "[a-z][a-z0-9]{0,6}",
    ) {
        let stream = vec![
            "Class: a.Owner".to_string(),
            "Fields:".to_string(),
            format!("  - private {} {}", type_name, field),
        ];
        let output = PlantUmlRenderer::new().render(&stream).unwrap();
        let edge = format!("Owner ---> {}", type_name);
        let uppercase = type_name.starts_with(|c: char| c.is_ascii_uppercase());
        prop_assert_eq!(output.lines.contains(&edge), uppercase);
    }

    /// Every member line starts with one of the four visibility glyphs.
    #[test]
    fn test_visibility_glyph_total(field in arb_field()) {
        let stream = vec!["Class: a.Owner".to_string(), "Fields:".to_string(), field];
        let output = PlantUmlRenderer::new().render(&stream).unwrap();
        prop_assert!(output.is_clean());
        let member = &output.lines[2];
        prop_assert!(
            ['+', '-', '#', '~'].iter().any(|g| member.starts_with(*g)),
            "unexpected member line {:?}",
            member
        );
    }
}
