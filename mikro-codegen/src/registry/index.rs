//! Index files: per-kind `index.js` and the module root `index.js`.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use mikrogen_core::{GeneratedFile, to_kebab_case};

use super::{ModuleEntry, ModuleKind};

/// Resource kinds a module root index can list, in listing order, with
/// their directories.
pub const ROOT_KINDS: [(&str, &str); 9] = [
    ("database", "databases"),
    ("schema", "schemas"),
    ("model", "models"),
    ("locale", "locales"),
    ("view", "views"),
    ("middleware", "middlewares"),
    ("router", "routers"),
    ("service", "services"),
    ("public", "publics"),
];

/// A module file (`models/blog-post.js`).
pub struct ModuleFile<'a> {
    pub kind: ModuleKind,
    pub entry: &'a ModuleEntry,
}

impl GeneratedFile for ModuleFile<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(self.kind.module_path(&self.entry.name))
    }

    fn render(&self) -> String {
        self.entry.source_text.clone()
    }
}

/// The index of one kind (`models/index.js`).
pub struct KindIndex<'a> {
    pub kind: ModuleKind,
    pub entries: &'a IndexMap<String, ModuleEntry>,
}

impl KindIndex<'_> {
    pub fn relative_path(kind: ModuleKind) -> PathBuf {
        Path::new(kind.dir()).join("index.js")
    }
}

impl GeneratedFile for KindIndex<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(Self::relative_path(self.kind))
    }

    fn render(&self) -> String {
        let mut out = String::from("module.exports = {\n");
        for entry in self.entries.values() {
            let file = to_kebab_case(&entry.name);
            match self.kind {
                ModuleKind::Database | ModuleKind::Model => {
                    out.push_str(&format!("  '{}': require('./{}'),\n", entry.name, file));
                }
                ModuleKind::Schema => {
                    out.push_str(&format!("  '{}': {{\n", entry.name));
                    out.push_str(&format!(
                        "    'connection': '{}',\n",
                        entry.connection.as_deref().unwrap_or("default")
                    ));
                    out.push_str(&format!("    'structure': require('./{}'),\n", file));
                    out.push_str("  },\n");
                }
            }
        }
        out.push_str("};\n");
        out
    }
}

/// The module root `index.js`, listing each resource kind present.
pub struct RootIndex {
    pub kinds: Vec<(&'static str, &'static str)>,
}

impl GeneratedFile for RootIndex {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("index.js")
    }

    fn render(&self) -> String {
        let mut out = String::from("module.exports = {\n");
        for (key, dir) in &self.kinds {
            out.push_str(&format!("  '{}': require('./{}'),\n", key, dir));
        }
        out.push_str("};\n");
        out
    }
}

/// One entry read back from a kind index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedName {
    pub name: String,
    pub connection: Option<String>,
}

/// Parse the names (and schema connections) listed by a kind index, in order.
///
/// Only the shape written by [`KindIndex`] is recognized; other lines are ignored.
pub fn parse_kind_index(kind: ModuleKind, text: &str) -> Vec<IndexedName> {
    let mut names: Vec<IndexedName> = Vec::new();

    for line in text.lines().map(str::trim) {
        match kind {
            ModuleKind::Database | ModuleKind::Model => {
                if let Some(name) = quoted_key(line, "': require(") {
                    names.push(IndexedName {
                        name: name.to_string(),
                        connection: None,
                    });
                }
            }
            ModuleKind::Schema => {
                if let Some(connection) = line
                    .strip_prefix("'connection': '")
                    .and_then(|rest| rest.strip_suffix("',"))
                {
                    if let Some(last) = names.last_mut() {
                        last.connection = Some(connection.to_string());
                    }
                } else if line.starts_with("'structure':") {
                    continue;
                } else if let Some(name) = quoted_key(line, "': {") {
                    names.push(IndexedName {
                        name: name.to_string(),
                        connection: None,
                    });
                }
            }
        }
    }

    names
}

/// `'name'` at the start of `line`, followed by `rest`.
fn quoted_key<'a>(line: &'a str, rest: &str) -> Option<&'a str> {
    let inner = line.strip_prefix('\'')?;
    let end = inner.find(rest)?;
    let name = &inner[..end];
    (!name.is_empty() && !name.contains('\'')).then_some(name)
}
