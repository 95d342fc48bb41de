//! yUML notation plugin
//!
//! Bracket-style output: each entity is a single `[Name|member;member]`
//! line, followed by the relation lines. No header or footer.

mod renderer;

pub use renderer::YumlRenderer;
