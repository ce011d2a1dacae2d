//! Model module synthesis from compiled schema parts.

use mikrogen_core::to_camel_case;
use mikrogen_manifest::{CrudPolicy, Operation, PolicyVersion};

use super::{Fragments, Placeholder, Rendered, Template, TemplateRenderer};
use crate::{
    Result,
    builder::CodeBuilder,
    query::QueryClauses,
    relation::CompiledRelations,
    schema::{Schema, schema_variable},
};

/// Everything a model module is synthesized from.
#[derive(Debug, Clone, Copy)]
pub struct ModelInputs<'a> {
    pub schema: &'a Schema,
    pub policy: &'a CrudPolicy,
    pub version: PolicyVersion,
    pub relations: &'a CompiledRelations,
    pub queries: &'a QueryClauses,
}

impl ModelInputs<'_> {
    /// Schemas the model binds through `schema(...)`: its own first, then
    /// the related schemas in declaration order, without repeats.
    pub fn bound_schemas(&self) -> Vec<(&str, Option<&str>)> {
        let mut bound: Vec<(&str, Option<&str>)> = vec![(self.schema.name.as_str(), None)];
        for reference in &self.policy.schema {
            if bound.iter().all(|(name, _)| *name != reference.name()) {
                bound.push((reference.name(), reference.qualifier()));
            }
        }
        bound
    }
}

/// Renders model modules with a [`TemplateRenderer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelSynthesizer {
    renderer: TemplateRenderer,
}

impl ModelSynthesizer {
    pub fn new(renderer: TemplateRenderer) -> Self {
        Self { renderer }
    }

    /// Render the model module. Warnings of every rendered template are
    /// collected in order.
    pub fn synthesize(&self, inputs: &ModelInputs<'_>) -> Result<Rendered> {
        let mut fragments = self.fragments(inputs);
        let mut warnings = Vec::new();
        let mut bodies = Vec::new();
        let mut exports = CodeBuilder::javascript();

        for (export, template) in operation_templates(inputs) {
            let rendered = self.renderer.render(&template, &fragments)?;
            warnings.extend(rendered.warnings);
            bodies.push(rendered.text.trim_end().to_string());
            exports.push_line(&format!("{},", export));
        }

        fragments
            .set(Placeholder::Operations, bodies.join("\n\n"))
            .set(Placeholder::Exports, exports.build_fragment());

        let mut rendered = self.renderer.render(&Template::MODEL, &fragments)?;
        for warning in rendered.warnings.drain(..) {
            if !warnings.contains(&warning) {
                warnings.push(warning);
            }
        }
        rendered.warnings = warnings;
        Ok(rendered)
    }

    /// Fragments shared by the model shell and the operation templates.
    pub fn fragments(&self, inputs: &ModelInputs<'_>) -> Fragments {
        let schema = inputs.schema;
        let primary_key = schema
            .primary_key
            .as_ref()
            .map(|key| format!("'{}'", key))
            .unwrap_or_default();

        Fragments::new()
            .with(
                Placeholder::Function,
                to_camel_case(&format!("model_{}", schema.name)),
            )
            .with(Placeholder::Schema, schema.variable())
            .with(Placeholder::SchemaName, schema.name.as_str())
            .with(Placeholder::PrimaryKey, primary_key)
            .with(Placeholder::Schemas, schema_bindings(inputs))
            .with(Placeholder::Migrations, inputs.relations.associations.as_str())
            .with(Placeholder::Includes, inputs.relations.includes.as_str())
            .with(Placeholder::QueriesSelect, inputs.queries.select.as_str())
            .with(Placeholder::QueriesList, inputs.queries.list.as_str())
            .with(Placeholder::QueriesUpdate, inputs.queries.update.as_str())
            .with(Placeholder::QueriesRemove, inputs.queries.remove.as_str())
    }
}

fn schema_bindings(inputs: &ModelInputs<'_>) -> String {
    CodeBuilder::javascript()
        .each(inputs.bound_schemas(), |b, (name, connection)| {
            let variable = schema_variable(name);
            match connection {
                Some(connection) => b.line(&format!(
                    "const {} = schema('{}', '{}');",
                    variable, name, connection
                )),
                None => b.line(&format!("const {} = schema('{}');", variable, name)),
            }
        })
        .build_fragment()
}

/// Operation templates for the enabled operations, with their export names.
fn operation_templates(inputs: &ModelInputs<'_>) -> Vec<(&'static str, Template)> {
    let mut templates = Vec::new();
    for op in inputs.policy.crud.enabled() {
        match op {
            Operation::Create => templates.push(("add", Template::ADD)),
            Operation::Read if inputs.version.unified_find() => {
                templates.push(("find", Template::FIND))
            }
            Operation::Read => {
                templates.push(("select", Template::SELECT));
                templates.push(("list", Template::LIST));
            }
            Operation::Update => templates.push(("update", Template::UPDATE)),
            Operation::Delete => templates.push(("remove", Template::REMOVE)),
        }
    }
    templates
}
