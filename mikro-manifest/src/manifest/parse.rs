//! Manifest parsing from files and strings.

use std::{collections::HashMap, path::Path, str::FromStr};

use mikrogen_core::{to_camel_case, to_kebab_case};

use super::{Manifest, validate::ParseContext};
use crate::{CrudPolicy, Error, Result, error::SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "mikro.toml")
    }
}

impl Manifest {
    /// Parse a mikro.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a mikro.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, content, filename)?;
    Ok(manifest)
}

/// Validate the manifest after parsing.
fn validate_manifest(manifest: &Manifest, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);

    ctx.validate_name(&manifest.module.name, "module")?;

    for name in manifest.databases.keys() {
        ctx.validate_name(name, "database")?;
    }
    validate_distinct_files(&ctx, "database", manifest.database_names())?;

    for (name, schema) in &manifest.schemas {
        ctx.validate_name(name, "schema")?;
        validate_connection(manifest, &schema.connection, &ctx, &format!("[schemas.{}]", name))?;

        let schema_ctx = ctx.push(name);
        for attribute in schema.attributes.keys() {
            schema_ctx.validate_attribute(attribute)?;
        }
    }
    validate_distinct_files(&ctx, "schema", manifest.schema_names())?;

    for (name, policy) in &manifest.cruds {
        ctx.validate_name(name, "crud policy")?;
        validate_policy(manifest, name, policy, &ctx.push(name))?;
    }
    validate_distinct_files(&ctx, "crud policy", manifest.policy_names())?;
    Ok(())
}

/// Reject names of one kind that would share a module file or a generated
/// JavaScript name (e.g. `blog_post` and `blog-post`).
fn validate_distinct_files<'n>(
    ctx: &ParseContext,
    kind: &str,
    names: impl Iterator<Item = &'n str>,
) -> Result<()> {
    let mut files: HashMap<String, &str> = HashMap::new();
    let mut bindings: HashMap<String, &str> = HashMap::new();

    for name in names {
        let file = to_kebab_case(name);
        if let Some(first) = files.insert(file.clone(), name) {
            return Err(ctx.source_context().validation_error(
                format!(
                    "{} '{}' and '{}' share the module file '{}.js'",
                    kind, first, name, file
                ),
                ctx.find_span(name),
            ));
        }

        let binding = to_camel_case(name);
        if let Some(first) = bindings.insert(binding.clone(), name) {
            return Err(ctx.source_context().validation_error(
                format!(
                    "{} '{}' and '{}' share the generated name '{}'",
                    kind, first, name, binding
                ),
                ctx.find_span(name),
            ));
        }
    }

    Ok(())
}

/// Once any database is declared, every connection reference must name one.
fn validate_connection(
    manifest: &Manifest,
    connection: &str,
    ctx: &ParseContext,
    header: &str,
) -> Result<()> {
    if manifest.databases.is_empty() || manifest.database(connection).is_some() {
        return Ok(());
    }

    Err(ctx.source_context().validation_error(
        format!(
            "connection '{}' is not declared under [databases] (declared: {})",
            connection,
            manifest.database_names().collect::<Vec<_>>().join(", ")
        ),
        ctx.find_value_span_in(header, connection),
    ))
}

fn validate_policy(
    manifest: &Manifest,
    name: &str,
    policy: &CrudPolicy,
    ctx: &ParseContext,
) -> Result<()> {
    let version = manifest.policy_version(name);
    let source = ctx.source_context();

    for reference in &policy.schema {
        if reference.is_pair() && !version.allows_pairs() {
            return Err(source.validation_error(
                format!(
                    "crud policy '{}' uses a [name, connection] reference, which policy {} does not support",
                    name, version
                ),
                ctx.find_value_span(reference.name()),
            ));
        }
        if let Some(connection) = reference.qualifier() {
            validate_connection(manifest, connection, ctx, &format!("[cruds.{}]", name))?;
        }
        if manifest.schema(reference.name()).is_none() {
            return Err(source.undeclared_schema_error(
                name,
                reference.name(),
                ctx.find_value_span(reference.name()),
            ));
        }
    }

    if policy.migration.is_none() && version.requires_migration() {
        return Err(source.validation_error(
            format!(
                "crud policy '{}' must declare `migration` under policy {}",
                name, version
            ),
            ctx.find_span(name),
        ));
    }

    for relation in policy.relations() {
        if relation.target.is_pair() && !version.allows_pairs() {
            return Err(source.validation_error(
                format!(
                    "relation target of crud policy '{}' uses a [name, version] pair, which policy {} does not support",
                    name, version
                ),
                ctx.find_value_span(relation.target_name()),
            ));
        }
        let listed = policy
            .schema
            .iter()
            .any(|reference| reference.name() == relation.target_name());
        if !listed {
            return Err(source.unlisted_target_error(
                name,
                relation.target_name(),
                ctx.find_value_span(relation.target_name()),
            ));
        }
    }

    if policy.include.is_some() && !version.accepts_include() {
        return Err(source.validation_error(
            format!(
                "crud policy '{}' declares `include`, which only policy v3 supports",
                name
            ),
            ctx.find_key_span("include"),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PolicyVersion, RelationKind};

    const BLOG: &str = r#"
[module]
name = "blog"

[schemas.post.attributes.id]
type = "INTEGER"
primary_key = true

[schemas.post.attributes.title]
type = "STRING"

[schemas.comment.attributes.id]
type = "INTEGER"
primary_key = true

[cruds.post]
schema = ["comment"]

[[cruds.post.migration]]
kind = "hasMany"
target = "comment"
options = { as = "comments" }
"#;

    #[test]
    fn test_parse_blog() {
        let manifest: Manifest = BLOG.parse().unwrap();

        assert_eq!(manifest.module.name, "blog");
        assert_eq!(manifest.module.policy, PolicyVersion::V1);
        assert!(!manifest.module.strict_templates);
        assert_eq!(
            manifest.schema_names().collect::<Vec<_>>(),
            vec!["post", "comment"]
        );
        let policy = manifest.policy("post").unwrap();
        assert_eq!(policy.relations()[0].kind, RelationKind::HasMany);
        assert_eq!(manifest.policy_version("post"), PolicyVersion::V1);
    }

    #[test]
    fn test_policy_version_override() {
        let src = BLOG.replace("[cruds.post]\n", "[cruds.post]\nversion = \"v3\"\n");
        let manifest: Manifest = src.parse().unwrap();
        assert_eq!(manifest.policy_version("post"), PolicyVersion::V3);
    }

    #[test]
    fn test_undeclared_schema_reference() {
        let src = BLOG.replace(r#"schema = ["comment"]"#, r#"schema = ["comment", "tag"]"#);
        let err = src.parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::UndeclaredSchema { ref reference, .. } if reference == "tag"));
    }

    #[test]
    fn test_pairs_rejected_in_v1() {
        let src = r#"
[module]
name = "blog"

[schemas.post.attributes.id]
type = "INTEGER"

[schemas.user.attributes.id]
type = "INTEGER"

[cruds.post]
schema = [["user", "auth"]]
"#;
        let err = src.parse::<Manifest>().unwrap_err();
        assert!(err.to_string().contains("policy v1 does not support"));
    }

    #[test]
    fn test_pairs_accepted_in_v2() {
        let src = r#"
[module]
name = "blog"
policy = "v2"

[schemas.post.attributes.id]
type = "INTEGER"

[schemas.user.attributes.id]
type = "INTEGER"

[cruds.post]
schema = [["user", "auth"]]
migration = []
"#;
        let manifest: Manifest = src.parse().unwrap();
        assert_eq!(manifest.policy("post").unwrap().schema[0].qualifier(), Some("auth"));
    }

    #[test]
    fn test_v2_requires_migration() {
        let src = BLOG
            .replace("name = \"blog\"", "name = \"blog\"\npolicy = \"v2\"")
            .replace(
                "[[cruds.post.migration]]\nkind = \"hasMany\"\ntarget = \"comment\"\noptions = { as = \"comments\" }\n",
                "",
            );
        let err = src.parse::<Manifest>().unwrap_err();
        assert!(err.to_string().contains("must declare `migration`"));
    }

    #[test]
    fn test_relation_target_must_be_listed() {
        let src = BLOG.replace(r#"schema = ["comment"]"#, "schema = []");
        let err = src.parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::UnlistedRelationTarget { ref target, .. } if target == "comment"));
    }

    #[test]
    fn test_include_outside_v3() {
        let src = BLOG.replace("[cruds.post]\n", "[cruds.post]\ninclude = \"[]\"\n");
        let err = src.parse::<Manifest>().unwrap_err();
        assert!(err.to_string().contains("only policy v3"));
    }

    #[test]
    fn test_invalid_schema_name() {
        let src = "[module]\nname = \"blog\"\n\n[schemas.\"1post\".attributes.id]\ntype = \"INTEGER\"\n";
        let err = src.parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_dashed_attribute_rejected() {
        let src = BLOG.replace(
            "[schemas.post.attributes.title]",
            "[schemas.post.attributes.created-at]",
        );
        let err = src.parse::<Manifest>().unwrap_err();
        assert!(
            matches!(*err, Error::InvalidIdentifier { ref name, ref context, .. }
                if name == "created-at" && context == "attribute in 'post'")
        );
    }

    #[test]
    fn test_colliding_schema_files_rejected() {
        let src = format!(
            "{}\n[schemas.blog_post.attributes.id]\ntype = \"INTEGER\"\n\n[schemas.blog-post.attributes.id]\ntype = \"INTEGER\"\n",
            BLOG
        );
        let err = src.parse::<Manifest>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "schema 'blog_post' and 'blog-post' share the module file 'blog-post.js'"
        );
    }

    #[test]
    fn test_colliding_generated_names_rejected() {
        let src = "[module]\nname = \"blog\"\n\n[cruds.a_b]\n\n[cruds.a__b]\n";
        let err = src.parse::<Manifest>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "crud policy 'a_b' and 'a__b' share the generated name 'aB'"
        );
    }

    #[test]
    fn test_databases_in_document_order() {
        let src = BLOG.replace(
            "[schemas.post.attributes.id]",
            "[databases.default]\n\n[databases.audit_log]\ndatabase = \"audit\"\n\n[schemas.post.attributes.id]",
        );
        let manifest: Manifest = src.parse().unwrap();
        assert_eq!(
            manifest.database_names().collect::<Vec<_>>(),
            vec!["default", "audit_log"]
        );
        assert!(manifest.database("default").unwrap().settings.is_empty());
    }

    #[test]
    fn test_schema_connection_must_be_declared() {
        let src = BLOG.replace(
            "[schemas.post.attributes.id]",
            "[databases.main]\n\n[schemas.post]\nconnection = \"main\"\n\n[schemas.post.attributes.id]",
        );
        // comment still uses the implicit "default" connection
        let err = src.parse::<Manifest>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "connection 'default' is not declared under [databases] (declared: main)"
        );
    }

    #[test]
    fn test_pair_connection_must_be_declared() {
        let src = r#"
[module]
name = "blog"
policy = "v2"

[databases.default]

[schemas.post.attributes.id]
type = "INTEGER"

[schemas.user.attributes.id]
type = "INTEGER"

[cruds.post]
schema = [["user", "auth"]]
migration = []
"#;
        let err = src.parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::Validation { span: Some(_), .. }));
        assert!(err.to_string().starts_with("connection 'auth' is not declared"));

        let declared = src.replace("[databases.default]", "[databases.default]\n\n[databases.auth]");
        assert!(declared.parse::<Manifest>().is_ok());
    }

    #[test]
    fn test_parse_error_has_span() {
        let err = "[module\nname = 1".parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::Parse { span: Some(_), .. }));
    }

    #[test]
    fn test_missing_module_table() {
        let err = "[schemas.post.attributes.id]\ntype = \"INTEGER\"\n"
            .parse::<Manifest>()
            .unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }
}
