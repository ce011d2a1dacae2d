//! Synthesis pipeline for one model.
//!
//! A [`Pipeline`] runs explicit phases over a [`CompilationContext`]:
//!
//! - `introspect` - classify the schema's attributes
//! - `relations` - compile association statements and includes
//! - `queries` - build the per-attribute query clauses
//! - `render` - substitute everything into the model templates
//!
//! Non-fatal findings are collected as [`Diagnostic`]s; errors abort the run.
//!
//! # Example
//!
//! ```ignore
//! let ctx = Pipeline::new().run(&manifest, "post", TemplateRenderer::lenient())?;
//!
//! for diag in ctx.warnings() {
//!     eprintln!("{}", diag);
//! }
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod runner;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::Phase;
pub use runner::Pipeline;
