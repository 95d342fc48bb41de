//! PlantUML notation plugin
//!
//! Block-style output: one `class Name { ... }` block per entity, relation
//! lines after the last block, all wrapped in `@startuml`/`@enduml`.

mod renderer;

pub use renderer::PlantUmlRenderer;
