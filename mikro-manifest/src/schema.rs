//! Schema declarations (`[schemas.<name>]`).

use indexmap::IndexMap;
use serde::Deserialize;

/// A schema's structure: its attributes and storage options.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaDecl {
    /// Connection reference the schema is bound to
    #[serde(default = "default_connection")]
    pub connection: String,

    /// Attributes in declaration order
    #[serde(default)]
    pub attributes: IndexMap<String, AttributeDecl>,

    /// Storage options, opaque to the generator (e.g. `tableName`)
    #[serde(default)]
    pub options: toml::Table,
}

fn default_connection() -> String {
    "default".to_string()
}

/// One declared attribute of a schema.
#[derive(Debug, Clone, Deserialize)]
pub struct AttributeDecl {
    /// Declared storage type, e.g. `STRING(255)` or `INTEGER`
    #[serde(rename = "type")]
    pub ty: String,

    /// Whether this attribute is the primary key
    #[serde(default, alias = "primaryKey")]
    pub primary_key: bool,

    /// Whether values must be unique
    #[serde(default)]
    pub unique: bool,

    /// Whether null is allowed (unset means the storage default)
    #[serde(default, alias = "allowNull")]
    pub allow_null: Option<bool>,

    /// Any other attribute option, passed through to the schema module verbatim
    #[serde(flatten)]
    pub extra: IndexMap<String, toml::Value>,
}

impl AttributeDecl {
    /// Whether null is allowed, falling back to the storage default (nullable).
    pub fn is_nullable(&self) -> bool {
        self.allow_null.unwrap_or(true)
    }
}
