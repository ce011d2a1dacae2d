use std::{
    io,
    path::{Path, PathBuf},
};

/// Trait for types that represent a generated file
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Render the file content
    fn render(&self) -> String;

    /// Write the file under `base`, returning the path written.
    ///
    /// Generated files are rewritten wholesale on every run.
    fn write(&self, base: &Path) -> io::Result<PathBuf> {
        let file = File::new(self.path(base), self.render());
        file.write()?;
        Ok(file.path)
    }
}

/// Write `content` to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, content)
}

/// A file to be generated
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    content: String,
}

impl File {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Write the file, replacing any existing content
    pub fn write(&self) -> io::Result<()> {
        write_file(&self.path, &self.content)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    struct Index;

    impl GeneratedFile for Index {
        fn path(&self, base: &Path) -> PathBuf {
            base.join("models").join("index.js")
        }

        fn render(&self) -> String {
            "module.exports = {\n};\n".to_string()
        }
    }

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("models").join("post.js");

        write_file(&path, "module.exports = {};\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "module.exports = {};\n");
    }

    #[test]
    fn test_file_accessors() {
        let temp = TempDir::new().unwrap();
        let file = File::new(temp.path().join("index.js"), "x");
        file.write().unwrap();
        assert_eq!(file.content(), "x");
        assert!(file.path().exists());
    }

    #[test]
    fn test_file_write_overwrites_hand_edits() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("post.js");
        fs::write(&path, "hand edited").unwrap();

        File::new(&path, "generated").write().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "generated");
    }

    #[test]
    fn test_generated_file_write_returns_path() {
        let temp = TempDir::new().unwrap();

        let path = Index.write(temp.path()).unwrap();

        assert_eq!(path, temp.path().join("models/index.js"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "module.exports = {\n};\n");
    }
}
