//! Relation compilation: association statements and eager-load includes.

use mikrogen_manifest::{PolicyVersion, RelationDecl};

use crate::{
    builder::CodeBuilder,
    json::{pretty, table_to_json},
    schema::schema_variable,
};

/// Output of [`RelationCompiler::compile`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledRelations {
    /// One association statement per relation, in declaration order
    pub associations: String,
    /// The `include: [...]` entry of the read options, or empty
    pub includes: String,
    /// Aliases of eager relations, in declaration order
    pub aliases: Vec<String>,
    /// Eager relations that declare no `as` alias, by target name
    pub unaliased: Vec<String>,
}

impl CompiledRelations {
    /// Aliases declared by more than one eager relation.
    pub fn duplicate_aliases(&self) -> Vec<&str> {
        let mut duplicates: Vec<&str> = Vec::new();
        for (i, alias) in self.aliases.iter().enumerate() {
            if self.aliases[..i].contains(alias) && !duplicates.contains(&alias.as_str()) {
                duplicates.push(alias);
            }
        }
        duplicates
    }
}

pub struct RelationCompiler;

impl RelationCompiler {
    /// Compile the relations of one model.
    ///
    /// `include` is the caller-supplied include specification; it replaces the
    /// per-relation entries under policy v3 and is ignored otherwise.
    pub fn compile(
        schema_var: &str,
        relations: &[RelationDecl],
        include: Option<&str>,
        version: PolicyVersion,
    ) -> CompiledRelations {
        let associations = relations
            .iter()
            .map(|relation| association_statement(schema_var, relation))
            .collect::<Vec<_>>()
            .join("\n");

        let eager: Vec<&RelationDecl> = relations.iter().filter(|r| r.eager).collect();
        let aliases: Vec<String> = eager
            .iter()
            .filter_map(|r| r.alias().map(str::to_string))
            .collect();
        let unaliased: Vec<String> = eager
            .iter()
            .filter(|r| r.alias().is_none())
            .map(|r| r.target_name().to_string())
            .collect();

        let verbatim = include
            .filter(|_| version.accepts_include())
            .map(str::trim)
            .filter(|spec| !spec.is_empty());

        let includes = match verbatim {
            Some(spec) => verbatim_include(spec),
            None => alias_include(&aliases),
        };

        CompiledRelations {
            associations,
            includes,
            aliases,
            unaliased,
        }
    }
}

fn association_statement(schema_var: &str, relation: &RelationDecl) -> String {
    format!(
        "{}.{}({}, {});",
        schema_var,
        relation.kind.as_str(),
        schema_variable(relation.target_name()),
        pretty(&table_to_json(&relation.options))
    )
}

fn alias_include(aliases: &[String]) -> String {
    if aliases.is_empty() {
        return String::new();
    }

    CodeBuilder::javascript()
        .block_with_close("include: [", "],", |b| {
            b.each(aliases, |b, alias| {
                b.line(&format!("{{ association: '{}' }},", alias))
            })
        })
        .build_fragment()
}

/// `include: <spec>,` with the specification's continuation lines dedented
/// to their common indentation.
fn verbatim_include(spec: &str) -> String {
    let mut lines = spec.lines();
    let first = lines.next().unwrap_or_default();
    let rest: Vec<&str> = lines.collect();

    let common = rest
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| leading_whitespace(line))
        .reduce(common_prefix)
        .unwrap_or_default();

    let mut text = format!("include: {}", first.trim_end());
    for line in &rest {
        text.push('\n');
        if !line.trim().is_empty() {
            text.push_str(line.strip_prefix(common).unwrap_or(line).trim_end());
        }
    }
    text.push(',');
    text
}

fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

/// Longest common prefix of `a` and `b`, ending on a character boundary.
fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let end = a
        .char_indices()
        .zip(b.chars())
        .find(|((_, x), y)| x != y)
        .map_or(a.len().min(b.len()), |((i, _), _)| i);
    &a[..end]
}
