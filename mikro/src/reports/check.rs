//! Check command report data structures.

use std::path::PathBuf;

use mikrogen_codegen::pipeline::{Diagnostic, Severity};

use super::output::{Output, Report};

/// Report data from manifest validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    pub module_name: String,
    pub database_count: usize,
    pub schema_count: usize,
    pub policy_count: usize,
    /// Failed policies (errors) and pipeline findings (warnings).
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckReport {
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity.is_error())
            .count()
    }

    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.error_count() == 0
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        // errors first
        for severity in [Severity::Error, Severity::Warning] {
            for diag in self.diagnostics.iter().filter(|d| d.severity == severity) {
                let text = match &diag.location {
                    Some(loc) => format!("{}\n  --> {}", diag.message, loc),
                    None => diag.message.clone(),
                };
                match severity {
                    Severity::Error => out.error(&text),
                    Severity::Warning => out.warning(&text),
                }
            }
        }

        if !self.diagnostics.is_empty() {
            out.newline();
        }

        if self.is_valid() {
            out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
            out.newline();
            out.key_value("  module", &self.module_name);
            out.key_value("  databases", &self.database_count.to_string());
            out.key_value("  schemas", &self.schema_count.to_string());
            out.key_value("  crud policies", &self.policy_count.to_string());
        }
    }
}
