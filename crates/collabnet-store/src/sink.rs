//! Directory-backed artifact sink

use crate::StoreError;
use collabnet_domain::traits::ArtifactSink;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes artifacts as files under a root directory
#[derive(Debug)]
pub struct DirectorySink {
    root: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    /// Create the sink, creating `root` if needed
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            written: Vec::new(),
        })
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Files written so far, in write order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ArtifactSink for DirectorySink {
    type Error = StoreError;

    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<(), Self::Error> {
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(StoreError::InvalidData(format!("invalid artifact name {:?}", name)));
        }

        let path = self.root.join(name);
        fs::write(&path, bytes)?;
        tracing::debug!(bytes = bytes.len(), "wrote {}", path.display());
        self.written.push(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_root_and_writes_files() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("charts").join("run");
        let mut sink = DirectorySink::new(&root).unwrap();

        sink.write("degree_dist_2000.png", b"png").unwrap();
        sink.write("degree_dist_2001.png", b"png2").unwrap();

        assert_eq!(fs::read(root.join("degree_dist_2001.png")).unwrap(), b"png2");
        assert_eq!(sink.written().len(), 2);
        assert!(sink.written()[0].ends_with("degree_dist_2000.png"));
    }

    #[test]
    fn test_rejects_names_outside_root() {
        let dir = TempDir::new().unwrap();
        let mut sink = DirectorySink::new(dir.path()).unwrap();

        assert!(matches!(sink.write("../escape.png", b""), Err(StoreError::InvalidData(_))));
        assert!(matches!(sink.write("", b""), Err(StoreError::InvalidData(_))));
        assert!(sink.written().is_empty());
    }
}
