//! File-backed key-value storage.
//!
//! Each key becomes one file under the store's root directory. Values are
//! opaque strings; serialization is the caller's concern.

use std::io;
use std::path::{Path, PathBuf};

/// Durable store rooted at a directory.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Verify the backing directory accepts writes with a throwaway
    /// write/delete cycle.
    pub fn probe(&self) -> io::Result<()> {
        const PROBE_KEY: &str = "__quizdrill_probe__";
        self.write(PROBE_KEY, "probe")?;
        self.delete(PROBE_KEY)
    }

    pub fn read(&self, key: &str) -> io::Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn write(&self, key: &str, value: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::write(self.path_for(key), value)
    }

    /// Delete the value under `key`. Deleting an absent key is not an
    /// error.
    pub fn delete(&self, key: &str) -> io::Result<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Keys map to file names; anything outside a conservative character
    /// set is replaced so keys can never escape the root directory.
    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(name)
    }
}
