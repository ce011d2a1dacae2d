use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename, reducing parameter passing
/// in error factory functions.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error, optionally pointing at a span.
    pub fn validation_error(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    /// Create an invalid identifier error.
    pub fn invalid_identifier_error(
        &self,
        name: impl Into<String>,
        context: impl Into<String>,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidIdentifier {
            src: self.named_source(),
            span,
            name: name.into(),
            context: context.into(),
            reason: reason.into(),
        })
    }

    /// Create an undeclared schema reference error.
    pub fn undeclared_schema_error(
        &self,
        policy: impl Into<String>,
        reference: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::UndeclaredSchema {
            src: self.named_source(),
            span,
            policy: policy.into(),
            reference: reference.into(),
        })
    }

    /// Create an error for a relation whose target is not a related schema.
    pub fn unlisted_target_error(
        &self,
        policy: impl Into<String>,
        target: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::UnlistedRelationTarget {
            src: self.named_source(),
            span,
            policy: policy.into(),
            target: target.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("create a mikro.toml in the module root, or pass --config"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse mikro.toml")]
    #[diagnostic(code(mikro::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(mikro::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("invalid {context} name '{name}'")]
    #[diagnostic(
        code(mikro::invalid_identifier),
        help("{reason}")
    )]
    InvalidIdentifier {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid identifier")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
        reason: String,
    },

    #[error("crud policy '{policy}' references undeclared schema '{reference}'")]
    #[diagnostic(
        code(mikro::undeclared_schema),
        help("declare it under [schemas.{reference}] or remove the reference")
    )]
    UndeclaredSchema {
        #[source_code]
        src: NamedSource<String>,
        #[label("not declared under [schemas]")]
        span: Option<SourceSpan>,
        policy: String,
        reference: String,
    },

    #[error("relation target '{target}' is not listed in the schemas of crud policy '{policy}'")]
    #[diagnostic(
        code(mikro::unlisted_relation_target),
        help("add '{target}' to cruds.{policy}.schema so the model can bind it")
    )]
    UnlistedRelationTarget {
        #[source_code]
        src: NamedSource<String>,
        #[label("relation target")]
        span: Option<SourceSpan>,
        policy: String,
        target: String,
    },
}

impl Error {
    /// Create a validation error with source context
    pub fn validation(message: impl Into<String>, src: &str, filename: &str) -> Box<Self> {
        SourceContext::new(src, filename).validation_error(message, None)
    }
}
