//! Module registries: generated modules of one kind plus their index.
//!
//! A registry mirrors `<dir>/index.js`. Opening it parses the index back, so
//! the insertion order of earlier runs is kept; `upsert` writes the module
//! file and `rebuild_index` rewrites the kind index and then the module root
//! `index.js`.
//!
//! # Example
//!
//! ```ignore
//! let mut store = FsStore::new("blog");
//! let mut models = ModuleRegistry::open(ModuleKind::Model, &store)?;
//!
//! models.upsert(&mut store, ModuleEntry::model("post", text))?;
//! models.rebuild_index(&mut store)?;
//! ```

mod index;
mod store;

use std::{
    fmt,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use mikrogen_core::{GeneratedFile, to_kebab_case};
pub use index::{IndexedName, KindIndex, ModuleFile, ROOT_KINDS, RootIndex, parse_kind_index};
pub use store::{FsStore, MemoryStore, ModuleStore};
use tracing::{info, warn};

use crate::{Error, Result};

/// Kind of generated module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    /// Database connection settings (`databases/`)
    Database,
    /// Data-access models (`models/`)
    Model,
    /// Schema structure modules (`schemas/`)
    Schema,
}

impl ModuleKind {
    /// Directory under the module root.
    pub fn dir(&self) -> &'static str {
        match self {
            ModuleKind::Database => "databases",
            ModuleKind::Model => "models",
            ModuleKind::Schema => "schemas",
        }
    }

    /// Key in the module root index.
    pub fn key(&self) -> &'static str {
        match self {
            ModuleKind::Database => "database",
            ModuleKind::Model => "model",
            ModuleKind::Schema => "schema",
        }
    }

    /// Path of the module file of `name`, relative to the module root.
    pub fn module_path(&self, name: &str) -> PathBuf {
        Path::new(self.dir()).join(format!("{}.js", to_kebab_case(name)))
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A registered module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleEntry {
    pub name: String,
    /// Connection reference, listed in the schema index only
    pub connection: Option<String>,
    pub source_text: String,
}

impl ModuleEntry {
    pub fn model(name: impl Into<String>, source_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            connection: None,
            source_text: source_text.into(),
        }
    }

    pub fn database(name: impl Into<String>, source_text: impl Into<String>) -> Self {
        Self::model(name, source_text)
    }

    pub fn schema(
        name: impl Into<String>,
        connection: impl Into<String>,
        source_text: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            connection: Some(connection.into()),
            source_text: source_text.into(),
        }
    }
}

/// Synthesized model module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModule {
    pub schema_name: String,
    pub source_text: String,
    /// Schemas the module binds, its own first
    pub dependent_schemas: Vec<String>,
}

impl From<&GeneratedModule> for ModuleEntry {
    fn from(module: &GeneratedModule) -> Self {
        ModuleEntry::model(&module.schema_name, &module.source_text)
    }
}

/// Registry of the modules of one kind.
#[derive(Debug, Clone)]
pub struct ModuleRegistry {
    kind: ModuleKind,
    entries: IndexMap<String, ModuleEntry>,
}

impl ModuleRegistry {
    /// An empty registry.
    pub fn new(kind: ModuleKind) -> Self {
        Self {
            kind,
            entries: IndexMap::new(),
        }
    }

    /// Load the registry from its index in `store`.
    ///
    /// Indexed names whose module file is missing are skipped with a warning.
    pub fn open(kind: ModuleKind, store: &dyn ModuleStore) -> Result<Self> {
        let mut registry = Self::new(kind);
        let index_path = KindIndex::relative_path(kind);

        let Some(text) = read(store, &index_path)? else {
            return Ok(registry);
        };

        for indexed in parse_kind_index(kind, &text) {
            let mut entry = ModuleEntry {
                name: indexed.name,
                connection: indexed.connection,
                source_text: String::new(),
            };
            let module_path = kind.module_path(&entry.name);

            match read(store, &module_path)? {
                Some(source_text) => {
                    entry.source_text = source_text;
                    registry.entries.insert(entry.name.clone(), entry);
                }
                None => warn!(
                    kind = %kind,
                    name = %entry.name,
                    path = %module_path.display(),
                    "indexed module file is missing, skipping"
                ),
            }
        }

        Ok(registry)
    }

    pub fn kind(&self) -> ModuleKind {
        self.kind
    }

    /// Registered names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&ModuleEntry> {
        self.entries.get(name)
    }

    pub fn entries(&self) -> impl Iterator<Item = &ModuleEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the module file and register it, replacing any previous text.
    ///
    /// A replaced entry keeps its position.
    pub fn upsert(&mut self, store: &mut dyn ModuleStore, entry: ModuleEntry) -> Result<PathBuf> {
        let file = ModuleFile {
            kind: self.kind,
            entry: &entry,
        };
        let path = write(store, &file)?;
        info!(kind = %self.kind, name = %entry.name, path = %path.display(), "wrote module");

        self.entries.insert(entry.name.clone(), entry);
        Ok(path)
    }

    /// Rewrite the kind index, then the module root index.
    pub fn rebuild_index(&self, store: &mut dyn ModuleStore) -> Result<Vec<PathBuf>> {
        let index = KindIndex {
            kind: self.kind,
            entries: &self.entries,
        };
        let index_path = write(store, &index)?;
        info!(kind = %self.kind, path = %index_path.display(), entries = self.len(), "wrote index");

        let root_path = rebuild_root_index(store)?;
        Ok(vec![index_path, root_path])
    }
}

/// Rewrite the module root `index.js` from the kind indexes present in `store`.
pub fn rebuild_root_index(store: &mut dyn ModuleStore) -> Result<PathBuf> {
    let kinds = ROOT_KINDS
        .into_iter()
        .filter(|(_, dir)| store.exists(&Path::new(dir).join("index.js")))
        .collect();
    let path = write(store, &RootIndex { kinds })?;
    info!(path = %path.display(), "wrote root index");
    Ok(path)
}

fn read(store: &dyn ModuleStore, path: &Path) -> Result<Option<String>> {
    store
        .read(path)
        .map_err(|source| Error::persistence(path, source))
}

fn write(store: &mut dyn ModuleStore, file: &dyn GeneratedFile) -> Result<PathBuf> {
    store
        .write(file)
        .map_err(|source| Error::persistence(file.path(Path::new("")), source))
}
