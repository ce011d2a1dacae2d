//! Compilation context passed through pipeline phases.

use mikrogen_manifest::{CrudPolicy, Manifest, PolicyVersion};

use super::diagnostic::{Diagnostic, Severity};
use crate::{
    Error, Result,
    query::QueryClauses,
    registry::GeneratedModule,
    relation::CompiledRelations,
    schema::Schema,
    template::TemplateRenderer,
};

/// State of one model synthesis, filled in phase by phase.
#[derive(Debug)]
pub struct CompilationContext<'a> {
    pub manifest: &'a Manifest,
    pub schema_name: String,
    pub policy: &'a CrudPolicy,
    /// Effective policy version
    pub version: PolicyVersion,
    pub renderer: TemplateRenderer,
    /// Populated by the introspect phase.
    pub schema: Option<Schema>,
    /// Populated by the relations phase.
    pub relations: Option<CompiledRelations>,
    /// Populated by the queries phase.
    pub queries: Option<QueryClauses>,
    /// Populated by the render phase.
    pub module: Option<GeneratedModule>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> CompilationContext<'a> {
    /// Create a context for the crud policy named `schema_name`.
    pub fn new(
        manifest: &'a Manifest,
        schema_name: &str,
        renderer: TemplateRenderer,
    ) -> Result<Self> {
        let policy = manifest
            .policy(schema_name)
            .ok_or_else(|| Error::UndefinedPolicy(schema_name.to_string()))?;

        Ok(Self {
            manifest,
            schema_name: schema_name.to_string(),
            policy,
            version: manifest.policy_version(schema_name),
            renderer,
            schema: None,
            relations: None,
            queries: None,
            module: None,
            diagnostics: Vec::new(),
        })
    }

    /// Manifest location of the crud policy, for diagnostics.
    pub fn policy_location(&self) -> String {
        format!("cruds.{}", self.schema_name)
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    /// The introspected schema, or an error naming the phase that needed it.
    pub fn require_schema(&self, phase: &'static str) -> Result<&Schema> {
        self.schema.as_ref().ok_or(Error::PhaseOrder {
            phase,
            missing: "the schema",
        })
    }

    /// Take the synthesized module out of the context.
    pub fn take_module(&mut self) -> Result<GeneratedModule> {
        self.module.take().ok_or(Error::PhaseOrder {
            phase: "take_module",
            missing: "the module",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_manifest() -> Manifest {
        r#"
        [module]
        name = "blog"
        policy = "v2"

        [schemas.post.attributes.id]
        type = "INTEGER"
        primary_key = true

        [cruds.post]
        migration = []
        "#
        .parse()
        .expect("Failed to parse test manifest")
    }

    #[test]
    fn test_context_creation() {
        let manifest = make_test_manifest();
        let ctx = CompilationContext::new(&manifest, "post", TemplateRenderer::lenient()).unwrap();

        assert_eq!(ctx.version, PolicyVersion::V2);
        assert_eq!(ctx.policy_location(), "cruds.post");
        assert!(ctx.schema.is_none());
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_undefined_policy() {
        let manifest = make_test_manifest();
        let err = CompilationContext::new(&manifest, "tag", TemplateRenderer::lenient()).unwrap_err();
        assert!(matches!(err, Error::UndefinedPolicy(ref name) if name == "tag"));
    }

    #[test]
    fn test_context_diagnostics() {
        let manifest = make_test_manifest();
        let mut ctx = CompilationContext::new(&manifest, "post", TemplateRenderer::lenient()).unwrap();

        ctx.add_diagnostic(Diagnostic::warning("relations", "duplicate alias"));
        ctx.add_diagnostic(Diagnostic::error("render", "no module"));

        let warnings: Vec<_> = ctx.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, "duplicate alias");
    }

    #[test]
    fn test_missing_phase_output() {
        let manifest = make_test_manifest();
        let mut ctx = CompilationContext::new(&manifest, "post", TemplateRenderer::lenient()).unwrap();

        assert!(matches!(
            ctx.require_schema("queries"),
            Err(Error::PhaseOrder { phase: "queries", .. })
        ));
        assert!(ctx.take_module().is_err());
    }
}
