//! Relations phase - compiles association statements and includes.

use crate::{
    Result,
    pipeline::{CompilationContext, Diagnostic, Phase},
    relation::RelationCompiler,
    schema::schema_variable,
};

pub struct RelationsPhase;

impl Phase for RelationsPhase {
    fn name(&self) -> &'static str {
        "relations"
    }

    fn description(&self) -> &'static str {
        "Compile association statements and eager-load includes"
    }

    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let policy = ctx.policy;
        let compiled = RelationCompiler::compile(
            &schema_variable(&ctx.schema_name),
            policy.relations(),
            policy.include.as_deref(),
            ctx.version,
        );

        let location = ctx.policy_location();
        for alias in compiled.duplicate_aliases() {
            ctx.add_diagnostic(
                Diagnostic::warning(
                    self.name(),
                    format!(
                        "alias '{}' is used by more than one eager relation, the last association wins at load time",
                        alias
                    ),
                )
                .at(location.clone()),
            );
        }
        for target in &compiled.unaliased {
            ctx.add_diagnostic(
                Diagnostic::warning(
                    self.name(),
                    format!(
                        "eager relation to '{}' declares no `as` alias and is left out of the include list",
                        target
                    ),
                )
                .at(location.clone()),
            );
        }

        ctx.relations = Some(compiled);
        Ok(())
    }
}
