//! Index command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from rewriting the index files.
#[derive(Debug)]
pub struct IndexReport {
    /// Registered connection modules.
    pub databases: usize,
    /// Registered models.
    pub models: usize,
    /// Registered schema modules.
    pub schemas: usize,
    pub written: Vec<PathBuf>,
}

impl Report for IndexReport {
    fn render(&self, out: &mut dyn Output) {
        out.section(&format!(
            "Indexed {} model{}, {} schema{} and {} database{}",
            self.models,
            plural(self.models),
            self.schemas,
            plural(self.schemas),
            self.databases,
            plural(self.databases)
        ));
        for path in &self.written {
            out.added_item(&path.display().to_string());
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
