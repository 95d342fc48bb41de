//! Core abstractions for record rendering
//!
//! The record grammar, member rewriting, the normalizer and the scanner are
//! shared by every notation. Notations only plug a
//! [`NotationWriter`] into the scanner.

mod error;
pub mod logging;
mod member;
mod normalizer;
mod record;
mod relation;
mod renderer;
mod scanner;

pub use error::*;
pub use logging::*;
pub use member::*;
pub use normalizer::*;
pub use record::*;
pub use relation::*;
pub use renderer::*;
pub use scanner::*;
