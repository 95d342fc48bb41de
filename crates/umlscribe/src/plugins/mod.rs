//! Notation plugins
//!
//! One module per output notation, plus the registry that selects between
//! them by key.

pub mod plantuml;
pub mod registry;
pub mod yuml;

pub use plantuml::*;
pub use registry::*;
pub use yuml::*;
