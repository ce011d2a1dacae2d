use serde::Deserialize;

use super::PolicyVersion;

/// Module metadata (`[module]`)
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleConfig {
    /// Name of the mikro module
    pub name: String,

    /// Default policy version for every crud policy
    #[serde(default)]
    pub policy: PolicyVersion,

    /// Fail on unresolved template placeholders instead of warning
    #[serde(default)]
    pub strict_templates: bool,
}
