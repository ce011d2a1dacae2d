//! CRUD policy declarations (`[cruds.<name>]`).

use std::fmt;

use serde::Deserialize;

use crate::PolicyVersion;

/// Per-schema CRUD policy: which operations to synthesize and how the
/// schema relates to others.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrudPolicy {
    /// Policy version override (falls back to `[module].policy`)
    #[serde(default)]
    pub version: Option<PolicyVersion>,

    /// Enabled operations
    #[serde(default)]
    pub crud: CrudOps,

    /// Related schemas the model binds, in declaration order
    #[serde(default)]
    pub schema: Vec<SchemaRef>,

    /// Relation declarations, in declaration order
    #[serde(default)]
    pub migration: Option<Vec<RelationDecl>>,

    /// Verbatim include specification (v3 only)
    #[serde(default)]
    pub include: Option<String>,
}

impl CrudPolicy {
    /// Relation declarations, empty when `migration` is absent.
    pub fn relations(&self) -> &[RelationDecl] {
        self.migration.as_deref().unwrap_or_default()
    }
}

/// The four CRUD operations, each toggled independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CrudOps {
    #[serde(default = "enabled")]
    pub create: bool,
    #[serde(default = "enabled")]
    pub read: bool,
    #[serde(default = "enabled")]
    pub update: bool,
    #[serde(default = "enabled")]
    pub delete: bool,
}

fn enabled() -> bool {
    true
}

impl Default for CrudOps {
    fn default() -> Self {
        Self {
            create: true,
            read: true,
            update: true,
            delete: true,
        }
    }
}

impl CrudOps {
    /// Check whether an operation is enabled.
    pub fn is_enabled(&self, op: Operation) -> bool {
        match op {
            Operation::Create => self.create,
            Operation::Read => self.read,
            Operation::Update => self.update,
            Operation::Delete => self.delete,
        }
    }

    /// Enabled operations in canonical order (create, read, update, delete).
    pub fn enabled(&self) -> Vec<Operation> {
        Operation::ALL
            .into_iter()
            .filter(|op| self.is_enabled(*op))
            .collect()
    }
}

/// A CRUD operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Create,
        Operation::Read,
        Operation::Update,
        Operation::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reference to a schema, either by bare name or as a `[name, second]` pair.
///
/// For related schemas the second element is a connection reference; for
/// relation targets it is the target alias version.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SchemaRef {
    Plain(String),
    Connected(String, String),
}

impl SchemaRef {
    /// The referenced schema name.
    pub fn name(&self) -> &str {
        match self {
            SchemaRef::Plain(name) | SchemaRef::Connected(name, _) => name,
        }
    }

    /// The second element of a pair reference, if any.
    pub fn qualifier(&self) -> Option<&str> {
        match self {
            SchemaRef::Plain(_) => None,
            SchemaRef::Connected(_, qualifier) => Some(qualifier),
        }
    }

    pub fn is_pair(&self) -> bool {
        matches!(self, SchemaRef::Connected(..))
    }
}

impl fmt::Display for SchemaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaRef::Plain(name) => write!(f, "{}", name),
            SchemaRef::Connected(name, qualifier) => write!(f, "{} ({})", name, qualifier),
        }
    }
}

/// Association kind between two schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationKind {
    HasOne,
    HasMany,
    BelongsTo,
    BelongsToMany,
}

impl RelationKind {
    /// The association method name on the storage layer's schema object.
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::HasOne => "hasOne",
            RelationKind::HasMany => "hasMany",
            RelationKind::BelongsTo => "belongsTo",
            RelationKind::BelongsToMany => "belongsToMany",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One relation declaration (`[[cruds.<name>.migration]]`).
#[derive(Debug, Clone, Deserialize)]
pub struct RelationDecl {
    pub kind: RelationKind,

    /// Target schema, optionally paired with its alias version
    pub target: SchemaRef,

    /// Whether the relation contributes an include entry
    #[serde(default = "enabled")]
    pub eager: bool,

    /// Association options, emitted as JSON
    #[serde(default)]
    pub options: toml::Table,
}

impl RelationDecl {
    pub fn target_name(&self) -> &str {
        self.target.name()
    }

    /// The association alias (`options.as`), if declared.
    pub fn alias(&self) -> Option<&str> {
        self.options.get("as").and_then(|v| v.as_str())
    }
}
