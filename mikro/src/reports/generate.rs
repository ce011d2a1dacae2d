//! Generate command report data structures.

use std::path::PathBuf;

use mikrogen_codegen::registry::ModuleKind;

use super::output::{Output, Report};

/// Report data from the crud and schema commands.
#[derive(Debug)]
pub struct GenerateReport {
    /// Kind of module generated.
    pub kind: ModuleKind,
    /// One result per request, in request order.
    pub results: Vec<RequestResult>,
}

/// Result of one generation request.
#[derive(Debug)]
pub enum RequestResult {
    /// The module and indexes were written.
    Written {
        name: String,
        diagnostics: Vec<String>,
        paths: Vec<PathBuf>,
    },
    /// Dry-run preview.
    Preview(PreviewFile),
    /// The request failed; nothing further was written for it.
    Failed { name: String, error: String },
}

/// A module in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    /// Path relative to the module root.
    pub path: PathBuf,
    pub content: String,
    pub diagnostics: Vec<String>,
}

impl GenerateReport {
    pub fn failed_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r, RequestResult::Failed { .. }))
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        let mut written = 0;
        let mut previewed = 0;

        for result in &self.results {
            match result {
                RequestResult::Written {
                    name,
                    diagnostics,
                    paths,
                } => {
                    written += 1;
                    for diagnostic in diagnostics {
                        out.warning(diagnostic);
                    }
                    out.section(&format!("{} {}", self.kind, name));
                    for path in paths {
                        out.added_item(&path.display().to_string());
                    }
                }
                RequestResult::Preview(file) => {
                    previewed += 1;
                    for diagnostic in &file.diagnostics {
                        out.warning(diagnostic);
                    }
                    out.divider(&file.path.display().to_string());
                    out.preformatted(&file.content);
                }
                RequestResult::Failed { name, error } => {
                    out.error(&format!("{} '{}': {}", self.kind, name, error));
                }
            }
        }

        out.newline();
        if previewed > 0 {
            out.divider("Summary");
            out.preformatted(&format!(
                "{} {} module{} would be generated",
                previewed,
                self.kind,
                plural(previewed)
            ));
        } else {
            out.preformatted(&format!(
                "{} {} module{} generated",
                written,
                self.kind,
                plural(written)
            ));
        }

        let failed = self.failed_count();
        if failed > 0 {
            out.preformatted(&format!("{} request{} failed", failed, plural(failed)));
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
