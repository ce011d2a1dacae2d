//! Generate operations - model, schema and database modules from the manifest.

use std::path::Path;

use eyre::Result;
use mikrogen_codegen::{
    GenerationSession, Outcome,
    pipeline::Diagnostic,
    registry::{FsStore, ModuleKind},
};
use mikrogen_manifest::Manifest;
use tracing::error;

use crate::reports::{GenerateReport, PreviewFile, RequestResult};

/// Options for the generate operations.
pub struct GenerateOptions<'a> {
    /// Module root the modules and indexes live under.
    pub root: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
    /// Template strictness override, `None` keeps the manifest setting.
    pub strict: Option<bool>,
}

/// Generate the model of each named crud policy.
///
/// A failing request is recorded in the report and the remaining requests
/// still run.
pub fn crud(manifest: &Manifest, names: &[String], opts: GenerateOptions) -> Result<GenerateReport> {
    let mut session = open_session(manifest, &opts)?;

    let results = names
        .iter()
        .map(|name| {
            let result = if opts.dry_run {
                session.synthesize(name).map(|synthesis| {
                    RequestResult::Preview(PreviewFile {
                        path: ModuleKind::Model.module_path(name),
                        content: synthesis.module.source_text,
                        diagnostics: messages(&synthesis.diagnostics),
                    })
                })
            } else {
                session.generate_model(name).map(written)
            };
            result.unwrap_or_else(|err| failed(ModuleKind::Model, name, err))
        })
        .collect();

    Ok(GenerateReport {
        kind: ModuleKind::Model,
        results,
    })
}

/// Generate the structure module of each named schema.
pub fn schema(
    manifest: &Manifest,
    names: &[String],
    opts: GenerateOptions,
) -> Result<GenerateReport> {
    declared(manifest, names, opts, ModuleKind::Schema)
}

/// Generate the connection module of each named database.
pub fn database(
    manifest: &Manifest,
    names: &[String],
    opts: GenerateOptions,
) -> Result<GenerateReport> {
    declared(manifest, names, opts, ModuleKind::Database)
}

/// Modules rendered straight from their manifest table, without synthesis.
fn declared(
    manifest: &Manifest,
    names: &[String],
    opts: GenerateOptions,
    kind: ModuleKind,
) -> Result<GenerateReport> {
    let mut session = open_session(manifest, &opts)?;

    let results = names
        .iter()
        .map(|name| {
            let result = if opts.dry_run {
                let entry = match kind {
                    ModuleKind::Database => session.database_entry(name),
                    _ => session.schema_entry(name),
                };
                entry.map(|entry| {
                    RequestResult::Preview(PreviewFile {
                        path: kind.module_path(name),
                        content: entry.source_text,
                        diagnostics: Vec::new(),
                    })
                })
            } else {
                let outcome = match kind {
                    ModuleKind::Database => session.generate_database(name),
                    _ => session.generate_schema(name),
                };
                outcome.map(written)
            };
            result.unwrap_or_else(|err| failed(kind, name, err))
        })
        .collect();

    Ok(GenerateReport { kind, results })
}

fn open_session<'m>(
    manifest: &'m Manifest,
    opts: &GenerateOptions,
) -> Result<GenerationSession<'m, FsStore>> {
    let mut session = GenerationSession::open(manifest, FsStore::new(opts.root))?;
    if let Some(strict) = opts.strict {
        session = session.with_strict(strict);
    }
    Ok(session)
}

fn written(outcome: Outcome) -> RequestResult {
    RequestResult::Written {
        name: outcome.name,
        diagnostics: messages(&outcome.diagnostics),
        paths: outcome.written,
    }
}

fn failed(kind: ModuleKind, name: &str, err: mikrogen_codegen::Error) -> RequestResult {
    error!(kind = %kind, name = name, error = %err, "generation failed");
    RequestResult::Failed {
        name: name.to_string(),
        error: err.to_string(),
    }
}

/// Diagnostic messages with their manifest location.
pub(crate) fn messages(diagnostics: &[Diagnostic]) -> Vec<String> {
    diagnostics
        .iter()
        .map(|diag| match &diag.location {
            Some(loc) => format!("{}\n  --> {}", diag.message, loc),
            None => diag.message.clone(),
        })
        .collect()
}
