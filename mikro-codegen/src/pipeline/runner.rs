//! Pipeline orchestrator.

use mikrogen_manifest::Manifest;
use tracing::debug;

use super::{
    CompilationContext, Phase,
    phases::{IntrospectPhase, QueriesPhase, RelationsPhase, RenderPhase},
};
use crate::{Result, template::TemplateRenderer};

/// The synthesis pipeline orchestrator.
///
/// Runs the introspect, relations, queries and render phases in order.
///
/// # Example
///
/// ```ignore
/// let ctx = Pipeline::new().run(&manifest, "post", TemplateRenderer::lenient())?;
/// ```
pub struct Pipeline {
    phases: Vec<Box<dyn Phase>>,
}

impl Pipeline {
    /// Create a pipeline with the built-in phases.
    pub fn new() -> Self {
        Self {
            phases: vec![
                Box::new(IntrospectPhase),
                Box::new(RelationsPhase),
                Box::new(QueriesPhase),
                Box::new(RenderPhase),
            ],
        }
    }

    /// Synthesize the model of the crud policy `schema_name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the policy is undeclared or any phase fails fatally.
    pub fn run<'a>(
        &self,
        manifest: &'a Manifest,
        schema_name: &str,
        renderer: TemplateRenderer,
    ) -> Result<CompilationContext<'a>> {
        let mut ctx = CompilationContext::new(manifest, schema_name, renderer)?;

        for phase in &self.phases {
            debug!(
                phase = phase.name(),
                schema = schema_name,
                "{}",
                phase.description()
            );
            phase.run(&mut ctx)?;
        }

        Ok(ctx)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn make_test_manifest() -> Manifest {
        r#"
        [module]
        name = "blog"

        [schemas.post.attributes.id]
        type = "INTEGER"
        primary_key = true

        [schemas.post.attributes.title]
        type = "STRING"

        [schemas.note.attributes.body]
        type = "TEXT"

        [cruds.post]

        [cruds.note]

        [cruds.ghost]
        "#
        .parse()
        .expect("Failed to parse test manifest")
    }

    #[test]
    fn test_pipeline_runs_phases() {
        let manifest = make_test_manifest();
        let ctx = Pipeline::new()
            .run(&manifest, "post", TemplateRenderer::lenient())
            .expect("pipeline should succeed");

        assert!(ctx.schema.is_some());
        assert!(ctx.relations.is_some());
        assert!(ctx.queries.is_some());
        let module = ctx.module.as_ref().unwrap();
        assert_eq!(module.schema_name, "post");
        assert_eq!(module.dependent_schemas, vec!["post"]);
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_relation_alias_warnings() {
        let manifest: Manifest = r#"
        [module]
        name = "library"

        [schemas.shelf.attributes.id]
        type = "INTEGER"
        primary_key = true

        [schemas.book.attributes.id]
        type = "INTEGER"
        primary_key = true

        [schemas.cover.attributes.id]
        type = "INTEGER"
        primary_key = true

        [cruds.shelf]
        schema = ["book", "cover"]

        [[cruds.shelf.migration]]
        kind = "hasMany"
        target = "book"
        options = { as = "items" }

        [[cruds.shelf.migration]]
        kind = "hasMany"
        target = "cover"
        options = { as = "items" }

        [[cruds.shelf.migration]]
        kind = "hasOne"
        target = "cover"
        "#
        .parse()
        .unwrap();

        let ctx = Pipeline::new()
            .run(&manifest, "shelf", TemplateRenderer::lenient())
            .unwrap();

        let warnings: Vec<_> = ctx.warnings().collect();
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| w.phase == "relations"));
        assert!(warnings
            .iter()
            .all(|w| w.location.as_deref() == Some("cruds.shelf")));
        assert!(warnings[0].message.starts_with("alias 'items' is used by more than one eager relation"));
        assert!(warnings[1].message.starts_with("eager relation to 'cover' declares no `as` alias"));

        let text = ctx.module.unwrap().source_text;
        assert_eq!(text.matches("{ association: 'items' },").count(), 2);
        assert!(text.contains("shelfSchema.hasOne(coverSchema, {});"));
    }

    #[test]
    fn test_missing_primary_key_warns() {
        let manifest = make_test_manifest();
        let ctx = Pipeline::new()
            .run(&manifest, "note", TemplateRenderer::strict())
            .unwrap();

        let warnings: Vec<_> = ctx.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].phase, "introspect");
        assert_eq!(warnings[0].location.as_deref(), Some("schemas.note"));
        assert!(ctx
            .module
            .unwrap()
            .source_text
            .contains("        [, query.sort || 'ASC'],"));
    }

    #[test]
    fn test_policy_without_schema_fails() {
        let manifest = make_test_manifest();
        let err = Pipeline::new()
            .run(&manifest, "ghost", TemplateRenderer::lenient())
            .unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
    }
}
