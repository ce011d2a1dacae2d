//! Index operation - rewrite the index files from the registries on disk.

use std::path::Path;

use eyre::Result;
use mikrogen_codegen::{GenerationSession, registry::FsStore};
use mikrogen_manifest::Manifest;

use crate::reports::IndexReport;

/// Execute the index operation.
pub fn index(manifest: &Manifest, root: &Path) -> Result<IndexReport> {
    let mut session = GenerationSession::open(manifest, FsStore::new(root))?;
    let written = session.rebuild_indexes()?;

    Ok(IndexReport {
        databases: session.databases().len(),
        models: session.models().len(),
        schemas: session.schemas().len(),
        written,
    })
}
