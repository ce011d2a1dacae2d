//! Typed placeholders and the fragment map.

use std::fmt;

use indexmap::IndexMap;

/// A named slot in a model template, written `:name` in the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Placeholder {
    /// Factory function name (`modelPost`)
    Function,
    /// Main schema variable (`postSchema`)
    Schema,
    /// Main schema name (`post`)
    SchemaName,
    /// Quoted primary key attribute (`'id'`)
    PrimaryKey,
    /// Schema bindings
    Schemas,
    /// Association statements
    Migrations,
    /// Eager-load include entry
    Includes,
    QueriesSelect,
    QueriesList,
    QueriesUpdate,
    QueriesRemove,
    /// Operation function bodies
    Operations,
    /// Names returned by the factory
    Exports,
}

impl Placeholder {
    pub const ALL: [Placeholder; 13] = [
        Placeholder::Function,
        Placeholder::Schema,
        Placeholder::SchemaName,
        Placeholder::PrimaryKey,
        Placeholder::Schemas,
        Placeholder::Migrations,
        Placeholder::Includes,
        Placeholder::QueriesSelect,
        Placeholder::QueriesList,
        Placeholder::QueriesUpdate,
        Placeholder::QueriesRemove,
        Placeholder::Operations,
        Placeholder::Exports,
    ];

    /// The name as written after the colon.
    pub fn name(&self) -> &'static str {
        match self {
            Placeholder::Function => "function",
            Placeholder::Schema => "schema",
            Placeholder::SchemaName => "schema_name",
            Placeholder::PrimaryKey => "primary_key",
            Placeholder::Schemas => "schemas",
            Placeholder::Migrations => "migrations",
            Placeholder::Includes => "includes",
            Placeholder::QueriesSelect => "queries_select",
            Placeholder::QueriesList => "queries_list",
            Placeholder::QueriesUpdate => "queries_update",
            Placeholder::QueriesRemove => "queries_remove",
            Placeholder::Operations => "operations",
            Placeholder::Exports => "exports",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Optional placeholders render empty when no fragment is supplied.
    pub fn is_optional(&self) -> bool {
        matches!(
            self,
            Placeholder::Migrations
                | Placeholder::Includes
                | Placeholder::QueriesSelect
                | Placeholder::QueriesList
                | Placeholder::QueriesUpdate
                | Placeholder::QueriesRemove
        )
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.name())
    }
}

/// Fragment text keyed by placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragments {
    entries: IndexMap<Placeholder, String>,
}

impl Fragments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a fragment, replacing any previous one.
    pub fn set(&mut self, placeholder: Placeholder, text: impl Into<String>) -> &mut Self {
        self.entries.insert(placeholder, text.into());
        self
    }

    /// Builder-style [`Fragments::set`].
    pub fn with(mut self, placeholder: Placeholder, text: impl Into<String>) -> Self {
        self.set(placeholder, text);
        self
    }

    pub fn get(&self, placeholder: Placeholder) -> Option<&str> {
        self.entries.get(&placeholder).map(String::as_str)
    }

    pub fn contains(&self, placeholder: Placeholder) -> bool {
        self.entries.contains_key(&placeholder)
    }
}
