//! Pipeline phase trait.

use super::CompilationContext;
use crate::Result;

/// A phase in the synthesis pipeline.
///
/// Phases run in order, each reading what earlier phases stored in the
/// context and adding its own output or diagnostics.
pub trait Phase: Send + Sync {
    /// The name of this phase (used in diagnostics and logs).
    fn name(&self) -> &'static str;

    /// A human-readable description of what this phase does.
    fn description(&self) -> &'static str;

    /// Run this phase on the compilation context.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase fails fatally. Non-fatal issues are
    /// recorded as diagnostics instead.
    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()>;
}
