use std::path::{Path, PathBuf};

use super::Manifest;
use crate::Result;

/// A mikro.toml file with both raw content and parsed manifest.
pub struct MikroToml {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl MikroToml {
    /// Open and parse a mikro.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing the manifest (the module root).
    pub fn root(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_reads_and_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mikro.toml");
        std::fs::write(
            &path,
            "[module]\nname = \"blog\"\n\n[schemas.post.attributes.id]\ntype = \"INTEGER\"\nprimary_key = true\n",
        )
        .unwrap();

        let file = MikroToml::open(&path).unwrap();
        assert_eq!(file.manifest().module.name, "blog");
        assert_eq!(file.root(), dir.path());
        assert!(file.content().contains("[module]"));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = MikroToml::open(dir.path().join("mikro.toml")).err().unwrap();
        assert!(matches!(*err, crate::Error::Io { .. }));
    }

    #[test]
    fn test_path_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mikro.toml");
        std::fs::write(&path, "[module]\nname = \"blog\"\n").unwrap();
        let file = MikroToml::open(&path).unwrap();
        assert_eq!(file.path(), path.as_path());
    }
}
