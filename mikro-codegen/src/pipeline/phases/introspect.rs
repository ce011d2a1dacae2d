//! Introspect phase - classifies the schema's attributes.

use crate::{
    Result,
    pipeline::{CompilationContext, Diagnostic, Phase},
    schema::SchemaIntrospector,
};

pub struct IntrospectPhase;

impl Phase for IntrospectPhase {
    fn name(&self) -> &'static str {
        "introspect"
    }

    fn description(&self) -> &'static str {
        "Classify schema attributes"
    }

    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let schema = SchemaIntrospector::introspect(&ctx.schema_name, ctx.manifest)?;

        if schema.primary_key.is_none() {
            ctx.add_diagnostic(
                Diagnostic::warning(
                    self.name(),
                    format!(
                        "schema '{}' has no primary key, list ordering renders without one",
                        schema.name
                    ),
                )
                .at(format!("schemas.{}", schema.name)),
            );
        }

        ctx.schema = Some(schema);
        Ok(())
    }
}
