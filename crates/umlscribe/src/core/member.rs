//! Member line rewriting
//!
//! Content lines under `Constructors:`, `Methods:` and `Fields:` carry a
//! bullet, the member's modifiers, then its type and name:
//!
//! ```text
//! - public abstract void run()
//! - private List<Widget> parts
//! ```
//!
//! These types pull the access keyword out as a [`Visibility`] glyph and
//! keep the rest in a shape every notation can print.

use std::fmt;

use super::record::strip_bullet;

/// Modifier keywords the extractor can write before a member's type
const MODIFIERS: &[&str] = &[
    "public",
    "private",
    "protected",
    "static",
    "final",
    "abstract",
    "synchronized",
    "native",
    "transient",
    "volatile",
    "strictfp",
    "default",
    "sealed",
    "non-sealed",
];

const ABSTRACT: &str = "abstract";

/// Visibility modifier for class members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    Public,    // +
    Private,   // -
    Protected, // #
    #[default]
    Package, // ~
}

impl Visibility {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "public" => Some(Visibility::Public),
            "private" => Some(Visibility::Private),
            "protected" => Some(Visibility::Protected),
            _ => None,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Visibility::Public => '+',
            Visibility::Private => '-',
            Visibility::Protected => '#',
            Visibility::Package => '~',
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Split leading modifier keywords off a token list.
///
/// The first access keyword becomes the visibility; the remaining modifiers
/// are kept in order.
fn take_modifiers<'a>(tokens: &[&'a str]) -> (Visibility, Vec<&'a str>, usize) {
    let mut visibility = None;
    let mut modifiers = Vec::new();
    let mut consumed = 0;

    for token in tokens {
        if !MODIFIERS.iter().any(|m| m == token) {
            break;
        }
        match Visibility::from_keyword(token) {
            Some(v) if visibility.is_none() => visibility = Some(v),
            _ => modifiers.push(*token),
        }
        consumed += 1;
    }

    (visibility.unwrap_or_default(), modifiers, consumed)
}

fn write_modifiers(
    out: &mut String,
    modifiers: &[String],
    abstract_marker: Option<&str>,
) {
    for modifier in modifiers {
        out.push(' ');
        match abstract_marker {
            Some(marker) if modifier == ABSTRACT => out.push_str(marker),
            _ => out.push_str(modifier),
        }
    }
}

/// A constructor or method line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSignature {
    pub visibility: Visibility,
    pub modifiers: Vec<String>,
    /// Return type, name and parameter list as written by the extractor
    pub signature: String,
}

impl MemberSignature {
    /// Parse a bullet line; `None` when nothing follows the modifiers
    pub fn parse(line: &str) -> Option<Self> {
        let tokens: Vec<&str> = strip_bullet(line).split_whitespace().collect();
        let (visibility, modifiers, consumed) = take_modifiers(&tokens);
        let rest = &tokens[consumed..];
        if rest.is_empty() {
            return None;
        }

        Some(Self {
            visibility,
            modifiers: modifiers.into_iter().map(str::to_string).collect(),
            signature: rest.join(" "),
        })
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.iter().any(|m| m == ABSTRACT)
    }

    /// Render as `glyph modifiers signature`, swapping the `abstract`
    /// keyword for `abstract_marker` when the notation has one
    pub fn render(&self, abstract_marker: Option<&str>) -> String {
        let mut out = String::new();
        out.push(self.visibility.glyph());
        write_modifiers(&mut out, &self.modifiers, abstract_marker);
        out.push(' ');
        out.push_str(&self.signature);
        out
    }
}

/// A field line: modifiers, type, name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRecord {
    pub visibility: Visibility,
    pub modifiers: Vec<String>,
    pub type_name: String,
    pub name: String,
}

impl FieldRecord {
    /// Parse a bullet line.
    ///
    /// Needs at least three tokens overall and both a type and a name after
    /// the modifiers. Tokens between the modifiers and the name all belong
    /// to the type, so `Map<String, Integer> index` keeps its full type.
    pub fn parse(line: &str) -> Option<Self> {
        if line.split_whitespace().count() < 3 {
            return None;
        }

        let tokens: Vec<&str> = strip_bullet(line).split_whitespace().collect();
        let (visibility, modifiers, consumed) = take_modifiers(&tokens);
        let rest = &tokens[consumed..];
        let (name, type_tokens) = rest.split_last()?;
        if type_tokens.is_empty() {
            return None;
        }

        Some(Self {
            visibility,
            modifiers: modifiers.into_iter().map(str::to_string).collect(),
            type_name: type_tokens.join(" "),
            name: name.to_string(),
        })
    }

    /// Render as `glyph [modifiers] name : type`
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push(self.visibility.glyph());
        write_modifiers(&mut out, &self.modifiers, None);
        out.push(' ');
        out.push_str(&self.name);
        out.push_str(" : ");
        out.push_str(&self.type_name);
        out
    }

    /// Entity this field points at, if its type looks like one
    pub fn composition_target(&self) -> Option<&str> {
        composition_target(&self.type_name)
    }
}

/// Whether a type token names another entity.
///
/// Lexical heuristic: an uppercase first letter. Lowercase custom types are
/// missed and type parameters such as `T` are caught; both are accepted.
pub fn is_entity_reference(type_name: &str) -> bool {
    type_name.chars().next().is_some_and(char::is_uppercase)
}

/// Composition target for a field type.
///
/// A generic instantiation points at its argument, the text between the
/// first `<` and the trailing `>`: `Box<Widget>` targets `Widget`.
pub fn composition_target(type_name: &str) -> Option<&str> {
    if !is_entity_reference(type_name) {
        return None;
    }

    let target = match type_name.strip_suffix('>') {
        Some(head) => {
            let start = head.find('<').map(|pos| pos + 1).unwrap_or(0);
            &head[start..]
        }
        None => type_name,
    };

    if target.is_empty() {
        None
    } else {
        Some(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_conversion() {
        assert_eq!(Visibility::from_keyword("public"), Some(Visibility::Public));
        assert_eq!(Visibility::from_keyword("private"), Some(Visibility::Private));
        assert_eq!(Visibility::from_keyword("protected"), Some(Visibility::Protected));
        assert_eq!(Visibility::from_keyword("static"), None);

        assert_eq!(Visibility::Public.glyph(), '+');
        assert_eq!(Visibility::Private.glyph(), '-');
        assert_eq!(Visibility::Protected.glyph(), '#');
        assert_eq!(Visibility::Package.glyph(), '~');
    }

    #[test]
    fn test_constructor_signature() {
        let member = MemberSignature::parse("- public Widget(int, String)").unwrap();
        assert_eq!(member.visibility, Visibility::Public);
        assert!(member.modifiers.is_empty());
        assert_eq!(member.signature, "Widget(int, String)");
        assert_eq!(member.render(None), "+ Widget(int, String)");
    }

    #[test]
    fn test_abstract_method_marker() {
        let member = MemberSignature::parse("- protected abstract void run()").unwrap();
        assert!(member.is_abstract());
        assert_eq!(member.render(Some("{abstract}")), "# {abstract} void run()");
        assert_eq!(member.render(None), "# abstract void run()");
    }

    #[test]
    fn test_package_private_method() {
        let member = MemberSignature::parse("- static void helper()").unwrap();
        assert_eq!(member.visibility, Visibility::Package);
        assert_eq!(member.render(None), "~ static void helper()");
    }

    #[test]
    fn test_empty_signature() {
        assert!(MemberSignature::parse("- public").is_none());
        assert!(MemberSignature::parse("-").is_none());
    }

    #[test]
    fn test_field_record() {
        let field = FieldRecord::parse("- public Widget w").unwrap();
        assert_eq!(field.visibility, Visibility::Public);
        assert_eq!(field.type_name, "Widget");
        assert_eq!(field.name, "w");
        assert_eq!(field.render(), "+ w : Widget");
    }

    #[test]
    fn test_field_with_extra_modifiers() {
        let field = FieldRecord::parse("- private static final int MAX").unwrap();
        assert_eq!(field.visibility, Visibility::Private);
        assert_eq!(field.modifiers, vec!["static", "final"]);
        assert_eq!(field.render(), "- static final MAX : int");
    }

    #[test]
    fn test_field_with_spaced_generic_type() {
        let field = FieldRecord::parse("- private Map<String, Integer> index").unwrap();
        assert_eq!(field.type_name, "Map<String, Integer>");
        assert_eq!(field.name, "index");
    }

    #[test]
    fn test_malformed_fields() {
        assert!(FieldRecord::parse("- Widget").is_none());
        assert!(FieldRecord::parse("Widget w").is_none());
        assert!(FieldRecord::parse("- public w").is_none());
        assert!(FieldRecord::parse("- final int").is_none());
        assert!(FieldRecord::parse("").is_none());
    }

    #[test]
    fn test_entity_reference_predicate() {
        assert!(is_entity_reference("Widget"));
        assert!(is_entity_reference("T"));
        assert!(!is_entity_reference("int"));
        assert!(!is_entity_reference("widget"));
        assert!(!is_entity_reference(""));
    }

    #[test]
    fn test_composition_target() {
        assert_eq!(composition_target("Widget"), Some("Widget"));
        assert_eq!(composition_target("Box<Widget>"), Some("Widget"));
        assert_eq!(composition_target("List<Box<Widget>>"), Some("Box<Widget>"));
        assert_eq!(composition_target("Widget[]"), Some("Widget[]"));
        assert_eq!(composition_target("int"), None);
        assert_eq!(composition_target("Box<>"), None);
    }
}
