use std::path::PathBuf;

use thiserror::Error;

/// Result type for synthesis and persistence
pub type Result<T> = std::result::Result<T, Error>;

/// A schema that cannot be introspected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("schema '{0}' is not declared")]
    Undefined(String),

    #[error("schema '{0}' declares no attributes")]
    NoAttributes(String),

    #[error("schema '{schema}' declares more than one primary key ({})", keys.join(", "))]
    MultiplePrimaryKeys { schema: String, keys: Vec<String> },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("no crud policy is declared for '{0}'")]
    UndefinedPolicy(String),

    #[error("database connection '{0}' is not declared")]
    UndefinedDatabase(String),

    #[error("template '{template}' has no fragment for required placeholder ':{placeholder}'")]
    TemplateMismatch {
        template: String,
        placeholder: String,
    },

    #[error("phase '{phase}' ran before {missing} was computed")]
    PhaseOrder {
        phase: &'static str,
        missing: &'static str,
    },

    #[error("failed to access '{path}'")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Persistence {
            path: path.into(),
            source,
        }
    }
}
