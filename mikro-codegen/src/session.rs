//! One generation invocation over a manifest and a module store.

use std::path::PathBuf;

use mikrogen_manifest::Manifest;
use tracing::warn;

use crate::{
    Error, Result, SchemaError,
    pipeline::{Diagnostic, Pipeline},
    registry::{GeneratedModule, ModuleEntry, ModuleKind, ModuleRegistry, ModuleStore, rebuild_root_index},
    render_database_module, render_schema_module,
    template::TemplateRenderer,
};

/// A synthesized model that has not been written.
#[derive(Debug, Clone)]
pub struct Synthesis {
    pub module: GeneratedModule,
    pub diagnostics: Vec<Diagnostic>,
}

/// Result of one generation request.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub kind: ModuleKind,
    pub name: String,
    pub diagnostics: Vec<Diagnostic>,
    /// Files written, the module first
    pub written: Vec<PathBuf>,
}

/// Owns the registries of one module root for the duration of a run.
///
/// Each request is independent: a failing request leaves the registries as
/// they were before it, apart from files it already wrote.
pub struct GenerationSession<'m, S: ModuleStore> {
    manifest: &'m Manifest,
    store: S,
    databases: ModuleRegistry,
    schemas: ModuleRegistry,
    models: ModuleRegistry,
    pipeline: Pipeline,
    renderer: TemplateRenderer,
}

impl<'m, S: ModuleStore> GenerationSession<'m, S> {
    /// Open the registries found in `store`.
    ///
    /// Templates render strictly when the manifest sets `strict_templates`.
    pub fn open(manifest: &'m Manifest, store: S) -> Result<Self> {
        let databases = ModuleRegistry::open(ModuleKind::Database, &store)?;
        let schemas = ModuleRegistry::open(ModuleKind::Schema, &store)?;
        let models = ModuleRegistry::open(ModuleKind::Model, &store)?;

        Ok(Self {
            manifest,
            store,
            databases,
            schemas,
            models,
            pipeline: Pipeline::new(),
            renderer: TemplateRenderer::new(manifest.module.strict_templates),
        })
    }

    /// Override the template strictness.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.renderer = TemplateRenderer::new(strict);
        self
    }

    pub fn manifest(&self) -> &'m Manifest {
        self.manifest
    }

    pub fn databases(&self) -> &ModuleRegistry {
        &self.databases
    }

    pub fn models(&self) -> &ModuleRegistry {
        &self.models
    }

    pub fn schemas(&self) -> &ModuleRegistry {
        &self.schemas
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Synthesize the model of crud policy `name` without writing anything.
    pub fn synthesize(&self, name: &str) -> Result<Synthesis> {
        let mut ctx = self.pipeline.run(self.manifest, name, self.renderer)?;
        let module = ctx.take_module()?;
        Ok(Synthesis {
            module,
            diagnostics: ctx.diagnostics,
        })
    }

    /// Synthesize, write and register the model of crud policy `name`, then
    /// rewrite the model index and the root index.
    pub fn generate_model(&mut self, name: &str) -> Result<Outcome> {
        let Synthesis {
            module,
            diagnostics,
        } = self.synthesize(name)?;
        for diagnostic in &diagnostics {
            warn!(schema = name, "{}", diagnostic);
        }

        let mut written = vec![
            self.models
                .upsert(&mut self.store, ModuleEntry::from(&module))?,
        ];
        written.extend(self.models.rebuild_index(&mut self.store)?);

        Ok(Outcome {
            kind: ModuleKind::Model,
            name: name.to_string(),
            diagnostics,
            written,
        })
    }

    /// The structure module of schema `name`, not yet written.
    pub fn schema_entry(&self, name: &str) -> Result<ModuleEntry> {
        let decl = self
            .manifest
            .schema(name)
            .ok_or_else(|| SchemaError::Undefined(name.to_string()))?;
        Ok(ModuleEntry::schema(
            name,
            &decl.connection,
            render_schema_module(decl),
        ))
    }

    /// Write and register the structure module of schema `name`, then
    /// rewrite the schema index and the root index.
    pub fn generate_schema(&mut self, name: &str) -> Result<Outcome> {
        let entry = self.schema_entry(name)?;

        let mut written = vec![self.schemas.upsert(&mut self.store, entry)?];
        written.extend(self.schemas.rebuild_index(&mut self.store)?);

        Ok(Outcome {
            kind: ModuleKind::Schema,
            name: name.to_string(),
            diagnostics: Vec::new(),
            written,
        })
    }

    /// The connection module of database `name`, not yet written.
    pub fn database_entry(&self, name: &str) -> Result<ModuleEntry> {
        let decl = self
            .manifest
            .database(name)
            .ok_or_else(|| Error::UndefinedDatabase(name.to_string()))?;
        Ok(ModuleEntry::database(name, render_database_module(decl)))
    }

    /// Write and register the connection module of database `name`, then
    /// rewrite the database index and the root index.
    pub fn generate_database(&mut self, name: &str) -> Result<Outcome> {
        let entry = self.database_entry(name)?;

        let mut written = vec![self.databases.upsert(&mut self.store, entry)?];
        written.extend(self.databases.rebuild_index(&mut self.store)?);

        Ok(Outcome {
            kind: ModuleKind::Database,
            name: name.to_string(),
            diagnostics: Vec::new(),
            written,
        })
    }

    /// Rewrite the index of every non-empty registry, then the root index.
    pub fn rebuild_indexes(&mut self) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for registry in [&self.databases, &self.schemas, &self.models] {
            if registry.is_empty() {
                continue;
            }
            for path in registry.rebuild_index(&mut self.store)? {
                if !written.contains(&path) {
                    written.push(path);
                }
            }
        }
        if written.is_empty() {
            written.push(rebuild_root_index(&mut self.store)?);
        }
        Ok(written)
    }
}
