//! Relations between entities
//!
//! Relations are collected while scanning and printed after every entity
//! block. They are kept in encounter order and never deduplicated.

/// Relation kind between two entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// `Extends:` superclass
    Inheritance,
    /// `Implements:` interface
    Realization,
    /// Field whose type names another entity
    Composition,
}

/// A directed relation recorded for the entity that declared it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub kind: RelationKind,
    /// Entity whose record produced the relation
    pub owner: String,
    /// Superclass, interface or field type on the other end
    pub target: String,
}

impl Relation {
    pub fn new(kind: RelationKind, owner: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            kind,
            owner: owner.into(),
            target: target.into(),
        }
    }

    pub fn inheritance(owner: impl Into<String>, parent: impl Into<String>) -> Self {
        Self::new(RelationKind::Inheritance, owner, parent)
    }

    pub fn realization(owner: impl Into<String>, interface: impl Into<String>) -> Self {
        Self::new(RelationKind::Realization, owner, interface)
    }

    pub fn composition(owner: impl Into<String>, part: impl Into<String>) -> Self {
        Self::new(RelationKind::Composition, owner, part)
    }
}
