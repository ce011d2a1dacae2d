//! Core operations.
//!
//! This module contains the business logic for mikro commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod generate;
pub mod index;
pub mod list;

pub use check::check;
pub use generate::{GenerateOptions, crud, database, schema};
pub use index::index;
pub use list::list;
