//! Render phase - substitutes the compiled parts into the model templates.

use crate::{
    Error, Result,
    pipeline::{CompilationContext, Diagnostic, Phase},
    registry::GeneratedModule,
    template::{ModelInputs, ModelSynthesizer},
};

pub struct RenderPhase;

impl Phase for RenderPhase {
    fn name(&self) -> &'static str {
        "render"
    }

    fn description(&self) -> &'static str {
        "Render the model module"
    }

    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let schema = ctx.require_schema(self.name())?;
        let relations = ctx.relations.as_ref().ok_or(Error::PhaseOrder {
            phase: self.name(),
            missing: "the relations",
        })?;
        let queries = ctx.queries.as_ref().ok_or(Error::PhaseOrder {
            phase: self.name(),
            missing: "the query clauses",
        })?;

        let inputs = ModelInputs {
            schema,
            policy: ctx.policy,
            version: ctx.version,
            relations,
            queries,
        };
        let rendered = ModelSynthesizer::new(ctx.renderer).synthesize(&inputs)?;
        let module = GeneratedModule {
            schema_name: schema.name.clone(),
            source_text: rendered.text,
            dependent_schemas: inputs
                .bound_schemas()
                .into_iter()
                .map(|(name, _)| name.to_string())
                .collect(),
        };

        let location = ctx.policy_location();
        for warning in rendered.warnings {
            ctx.add_diagnostic(Diagnostic::warning(self.name(), warning).at(location.clone()));
        }
        ctx.module = Some(module);
        Ok(())
    }
}
