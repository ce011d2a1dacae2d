//! Schema introspection: classifying declared attributes for synthesis.

mod attribute;
mod introspect;

pub use attribute::{AttributeModel, SemanticType};
pub use introspect::{Schema, SchemaIntrospector, schema_variable};
