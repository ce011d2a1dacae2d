//! Core utilities and types for the mikro model generator.
//!
//! This crate provides the file-writing primitives and identifier helpers
//! shared by the manifest, codegen and CLI crates.

mod file;
mod utils;

// File operations
pub use file::{File, GeneratedFile, write_file};
// String utilities
pub use utils::{to_camel_case, to_kebab_case};
