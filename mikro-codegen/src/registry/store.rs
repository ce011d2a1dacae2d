//! Storage backends for generated modules.

use std::{
    collections::BTreeMap,
    io,
    path::{Path, PathBuf},
};

use mikrogen_core::GeneratedFile;

/// Where a registry reads and writes module files.
///
/// Paths are relative to the module root (`models/post.js`).
pub trait ModuleStore {
    /// Read a file, `None` if it does not exist.
    fn read(&self, path: &Path) -> io::Result<Option<String>>;

    fn exists(&self, path: &Path) -> bool;

    /// Write a generated file, returning the location written.
    fn write(&mut self, file: &dyn GeneratedFile) -> io::Result<PathBuf>;
}

/// Files under a module root directory.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ModuleStore for FsStore {
    fn read(&self, path: &Path) -> io::Result<Option<String>> {
        match std::fs::read_to_string(self.root.join(path)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.root.join(path).exists()
    }

    fn write(&mut self, file: &dyn GeneratedFile) -> io::Result<PathBuf> {
        file.write(&self.root)
    }
}

/// In-memory files, for previews and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: BTreeMap<PathBuf, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, as if written by an earlier run.
    pub fn insert(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    /// All stored paths, sorted.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }
}

impl ModuleStore for MemoryStore {
    fn read(&self, path: &Path) -> io::Result<Option<String>> {
        Ok(self.files.get(path).cloned())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn write(&mut self, file: &dyn GeneratedFile) -> io::Result<PathBuf> {
        let path = file.path(Path::new(""));
        self.files.insert(path.clone(), file.render());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Note;

    impl GeneratedFile for Note {
        fn path(&self, base: &Path) -> PathBuf {
            base.join("notes").join("a.js")
        }

        fn render(&self) -> String {
            "module.exports = 1;\n".to_string()
        }
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        let path = store.write(&Note).unwrap();

        assert_eq!(path, Path::new("notes/a.js"));
        assert!(store.exists(Path::new("notes/a.js")));
        assert_eq!(
            store.read(Path::new("notes/a.js")).unwrap().as_deref(),
            Some("module.exports = 1;\n")
        );
        assert_eq!(store.read(Path::new("missing.js")).unwrap(), None);
    }

    #[test]
    fn test_fs_store_writes_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FsStore::new(dir.path());

        let path = store.write(&Note).unwrap();

        assert_eq!(path, dir.path().join("notes/a.js"));
        assert!(store.exists(Path::new("notes/a.js")));
        assert_eq!(
            store.read(Path::new("notes/a.js")).unwrap().as_deref(),
            Some("module.exports = 1;\n")
        );
        assert_eq!(store.read(Path::new("notes/b.js")).unwrap(), None);
    }
}
