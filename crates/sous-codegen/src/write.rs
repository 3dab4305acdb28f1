//! Writer contract: where rendered files end up.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

/// Destination for rendered files. Paths are relative to the writer's root.
pub trait Writer {
    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Writes under a root directory, creating parent directories as needed.
#[derive(Debug, Clone)]
pub struct FsWriter {
    root: PathBuf,
}

impl FsWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Writer for FsWriter {
    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        let full = self.root.join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&full, contents)?;
        tracing::info!(path = %full.display(), "wrote");
        Ok(())
    }
}

/// Collects files in memory, ordered by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    files: BTreeMap<PathBuf, String>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &BTreeMap<PathBuf, String> {
        &self.files
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    pub fn into_files(self) -> BTreeMap<PathBuf, String> {
        self.files
    }
}

impl Writer for MemoryWriter {
    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}
