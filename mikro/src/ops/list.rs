//! List operation - declared connections, schemas, policies and registered modules.

use std::path::Path;

use eyre::Result;
use mikrogen_codegen::registry::{FsStore, ModuleKind, ModuleRegistry};
use mikrogen_manifest::Manifest;

use crate::reports::{DatabaseInfo, ListReport, PolicyInfo, SchemaInfo};

/// Execute the list operation.
pub fn list(manifest: &Manifest, root: &Path) -> Result<ListReport> {
    let store = FsStore::new(root);
    let models = ModuleRegistry::open(ModuleKind::Model, &store)?;
    let schema_modules = ModuleRegistry::open(ModuleKind::Schema, &store)?;
    let database_modules = ModuleRegistry::open(ModuleKind::Database, &store)?;

    let databases = manifest
        .databases
        .iter()
        .map(|(name, decl)| DatabaseInfo {
            name: name.clone(),
            dialect: decl.dialect().map(str::to_string),
        })
        .collect();

    let schemas = manifest
        .schemas
        .iter()
        .map(|(name, decl)| SchemaInfo {
            name: name.clone(),
            connection: decl.connection.clone(),
            attributes: decl.attributes.keys().cloned().collect(),
        })
        .collect();

    let policies = manifest
        .cruds
        .iter()
        .map(|(name, policy)| PolicyInfo {
            name: name.clone(),
            version: manifest.policy_version(name).to_string(),
            operations: policy
                .crud
                .enabled()
                .iter()
                .map(|op| op.as_str())
                .collect(),
            relations: policy.relations().len(),
        })
        .collect();

    Ok(ListReport {
        databases,
        schemas,
        policies,
        models: models.names().map(str::to_string).collect(),
        schema_modules: schema_modules.names().map(str::to_string).collect(),
        database_modules: database_modules.names().map(str::to_string).collect(),
    })
}
