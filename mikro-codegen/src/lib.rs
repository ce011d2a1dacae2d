//! Model synthesis engine for mikro modules.
//!
//! Turns the schemas and crud policies of a `mikro.toml` manifest into
//! JavaScript model modules, schema structure modules, database connection
//! modules and the index files that tie a module together.
//!
//! # Module Organization
//!
//! - [`builder`] - Indented code building (CodeBuilder, Indent)
//! - [`schema`] - Attribute classification and schema introspection
//! - [`relation`] - Association statements and eager-load includes
//! - [`query`] - Per-attribute query clauses (select/list/update/remove)
//! - [`template`] - Placeholder templates and the renderer
//! - [`registry`] - Module registries, index files and storage backends
//! - [`pipeline`] - The phased synthesis pipeline and its diagnostics
//! - [`session`] - One generation invocation over a manifest and a store

pub mod builder;
mod database_module;
mod error;
mod json;
pub mod pipeline;
pub mod query;
pub mod registry;
pub mod relation;
pub mod schema;
mod schema_module;
pub mod session;
pub mod template;

pub use database_module::render_database_module;
pub use error::{Error, Result, SchemaError};
pub use schema_module::render_schema_module;
pub use session::{GenerationSession, Outcome, Synthesis};
