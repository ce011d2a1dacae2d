//! Manifest types and parsing for mikro.toml files.

mod file;
mod module;
mod parse;
mod validate;
mod version;

use indexmap::IndexMap;
use serde::Deserialize;

pub use file::MikroToml;
pub use module::ModuleConfig;
pub use validate::ParseContext;
pub use version::PolicyVersion;

use crate::{CrudPolicy, DatabaseDecl, SchemaDecl};

/// Root manifest for mikro.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// Module metadata
    pub module: ModuleConfig,

    /// Database connections, in document order
    #[serde(default)]
    pub databases: IndexMap<String, DatabaseDecl>,

    /// Declared schemas, in document order
    #[serde(default)]
    pub schemas: IndexMap<String, SchemaDecl>,

    /// Crud policies keyed by schema name, in document order
    #[serde(default)]
    pub cruds: IndexMap<String, CrudPolicy>,
}

impl Manifest {
    /// Look up a declared database connection.
    pub fn database(&self, name: &str) -> Option<&DatabaseDecl> {
        self.databases.get(name)
    }

    /// Look up a declared schema.
    pub fn schema(&self, name: &str) -> Option<&SchemaDecl> {
        self.schemas.get(name)
    }

    /// Look up a crud policy.
    pub fn policy(&self, name: &str) -> Option<&CrudPolicy> {
        self.cruds.get(name)
    }

    /// Effective version of a crud policy: its own override, else the module default.
    pub fn policy_version(&self, name: &str) -> PolicyVersion {
        self.cruds
            .get(name)
            .and_then(|policy| policy.version)
            .unwrap_or(self.module.policy)
    }

    /// Names of all crud policies, in document order.
    pub fn policy_names(&self) -> impl Iterator<Item = &str> {
        self.cruds.keys().map(String::as_str)
    }

    /// Names of all declared database connections, in document order.
    pub fn database_names(&self) -> impl Iterator<Item = &str> {
        self.databases.keys().map(String::as_str)
    }

    /// Names of all declared schemas, in document order.
    pub fn schema_names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }
}
