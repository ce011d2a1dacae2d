//! Policy version tags.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Shape of a crud policy and of the model it synthesizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyVersion {
    /// Bare related-schema names, optional migration, select + list
    #[default]
    V1,
    /// Connection pairs allowed, migration required, select + list
    V2,
    /// Unified `find`, caller-supplied include, nullish update copy
    V3,
}

impl PolicyVersion {
    /// Returns the version tag as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyVersion::V1 => "v1",
            PolicyVersion::V2 => "v2",
            PolicyVersion::V3 => "v3",
        }
    }

    /// Whether `[name, connection]` pairs are accepted as references.
    pub fn allows_pairs(&self) -> bool {
        !matches!(self, PolicyVersion::V1)
    }

    /// Whether the policy must declare `migration`.
    pub fn requires_migration(&self) -> bool {
        !matches!(self, PolicyVersion::V1)
    }

    /// Whether reads are a single `find(args)` operation.
    pub fn unified_find(&self) -> bool {
        matches!(self, PolicyVersion::V3)
    }

    /// Whether a verbatim `include` is accepted.
    pub fn accepts_include(&self) -> bool {
        matches!(self, PolicyVersion::V3)
    }

    /// Operator used by update copy lines (`newer.x <op> selected.x`).
    pub fn fallback_operator(&self) -> &'static str {
        match self {
            PolicyVersion::V3 => "??",
            _ => "||",
        }
    }
}

impl fmt::Display for PolicyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PolicyVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "v1" | "1" => Ok(PolicyVersion::V1),
            "v2" | "2" => Ok(PolicyVersion::V2),
            "v3" | "3" => Ok(PolicyVersion::V3),
            _ => Err(format!(
                "unknown policy version '{}', expected 'v1', 'v2' or 'v3'",
                s
            )),
        }
    }
}
