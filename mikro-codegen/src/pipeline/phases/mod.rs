//! Built-in pipeline phases.

mod introspect;
mod queries;
mod relations;
mod render;

pub use introspect::IntrospectPhase;
pub use queries::QueriesPhase;
pub use relations::RelationsPhase;
pub use render::RenderPhase;
