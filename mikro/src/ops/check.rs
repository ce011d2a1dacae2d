//! Check operation - manifest validation and a dry synthesis of every policy.

use std::path::Path;

use eyre::Result;
use mikrogen_codegen::{GenerationSession, pipeline::Diagnostic, registry::MemoryStore};
use mikrogen_manifest::Manifest;

use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Every crud policy is synthesized in memory. A policy that fails becomes an
/// error diagnostic at its `cruds.<name>` table; pipeline warnings are kept.
pub fn check(manifest: &Manifest, config_path: &Path, strict: bool) -> Result<CheckReport> {
    let mut session = GenerationSession::open(manifest, MemoryStore::new())?;
    if strict {
        session = session.with_strict(true);
    }

    let mut diagnostics = Vec::new();

    for name in manifest.policy_names() {
        match session.synthesize(name) {
            Ok(synthesis) => diagnostics.extend(synthesis.diagnostics),
            Err(err) => diagnostics
                .push(Diagnostic::error("check", err.to_string()).at(format!("cruds.{}", name))),
        }
    }

    Ok(CheckReport {
        config_path: config_path.to_path_buf(),
        module_name: manifest.module.name.clone(),
        database_count: manifest.databases.len(),
        schema_count: manifest.schemas.len(),
        policy_count: manifest.cruds.len(),
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use mikrogen_codegen::pipeline::Severity;

    use super::*;

    #[test]
    fn test_check_reports_per_policy() {
        let manifest: Manifest = r#"
            [module]
            name = "blog"

            [schemas.post.attributes.id]
            type = "INTEGER"
            primary_key = true

            [schemas.post.attributes.uuid]
            type = "UUID"
            primary_key = true

            [schemas.tag.attributes.label]
            type = "STRING"

            [cruds.post]

            [cruds.tag]
            "#
        .parse()
        .unwrap();

        let report = check(&manifest, Path::new("mikro.toml"), false).unwrap();

        assert!(!report.is_valid());
        assert_eq!(report.error_count(), 1);
        let error = &report.diagnostics[0];
        assert_eq!(error.severity, Severity::Error);
        assert_eq!(
            error.message,
            "schema 'post' declares more than one primary key (id, uuid)"
        );
        assert_eq!(error.location.as_deref(), Some("cruds.post"));

        let warning = &report.diagnostics[1];
        assert_eq!(warning.severity, Severity::Warning);
        assert_eq!(warning.location.as_deref(), Some("schemas.tag"));
        assert_eq!(report.policy_count, 2);
    }

    #[test]
    fn test_policy_without_schema_is_an_error() {
        let manifest: Manifest = r#"
            [module]
            name = "blog"

            [schemas.tag.attributes.id]
            type = "INTEGER"
            primary_key = true

            [cruds.tag]

            [cruds.ghost]
            "#
        .parse()
        .unwrap();

        let report = check(&manifest, Path::new("mikro.toml"), true).unwrap();

        assert_eq!(report.error_count(), 1);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].message, "schema 'ghost' is not declared");
        assert_eq!(report.diagnostics[0].location.as_deref(), Some("cruds.ghost"));
    }
}
