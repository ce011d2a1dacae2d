//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod check;
mod generate;
mod index;
mod list;
mod output;

pub use check::CheckReport;
pub use generate::{GenerateReport, PreviewFile, RequestResult};
pub use index::IndexReport;
pub use list::{DatabaseInfo, ListReport, PolicyInfo, SchemaInfo};
pub use output::{Report, TerminalOutput};
