//! Queries phase - builds the per-attribute query clauses.

use crate::{
    Result,
    pipeline::{CompilationContext, Phase},
    query::QueryClauseBuilder,
};

pub struct QueriesPhase;

impl Phase for QueriesPhase {
    fn name(&self) -> &'static str {
        "queries"
    }

    fn description(&self) -> &'static str {
        "Build select, list, update and remove clauses"
    }

    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let schema = ctx.require_schema(self.name())?;
        let clauses = QueryClauseBuilder::new(ctx.version).build(&schema.attributes);

        ctx.queries = Some(clauses);
        Ok(())
    }
}
