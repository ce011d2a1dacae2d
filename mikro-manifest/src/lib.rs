//! `mikro.toml` manifest types, parsing and validation.
//!
//! A manifest declares the database connections and schemas of one mikro
//! module, and the CRUD policies the model generator synthesizes from.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod crud;
mod database;
mod error;
mod manifest;
mod schema;

pub use crud::{CrudOps, CrudPolicy, Operation, RelationDecl, RelationKind, SchemaRef};
pub use database::DatabaseDecl;
pub use error::{Error, Result};
pub use manifest::{Manifest, MikroToml, ModuleConfig, ParseContext, PolicyVersion};
pub use schema::{AttributeDecl, SchemaDecl};
