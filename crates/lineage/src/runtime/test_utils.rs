//! Test runtime that records filesystem reads.
//!
//! `CountingRuntime` serves the real filesystem (tests build fixtures in a
//! `tempfile::TempDir`) and remembers how many times each path was read, so
//! tests can assert that a file is extracted at most once per engine.

// Test utilities are allowed to use std::fs since they only run on native platforms
#![allow(clippy::disallowed_methods)]

use async_trait::async_trait;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{FileMetadata, Runtime, RuntimeError, RuntimeResult};

/// Filesystem runtime that counts `read_file` calls per path and blocking
/// `canonicalize` calls overall.
#[derive(Debug)]
pub struct CountingRuntime {
    cwd: PathBuf,
    reads: Mutex<FxHashMap<PathBuf, usize>>,
    blocking_canonicalizations: AtomicUsize,
}

impl CountingRuntime {
    /// Create a runtime rooted at `cwd`.
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            cwd,
            reads: Mutex::new(FxHashMap::default()),
            blocking_canonicalizations: AtomicUsize::new(0),
        }
    }

    /// Number of times `path` has been read.
    pub fn reads_of(&self, path: &Path) -> usize {
        self.reads.lock().get(path).copied().unwrap_or(0)
    }

    /// Total number of reads across all paths.
    pub fn total_reads(&self) -> usize {
        self.reads.lock().values().sum()
    }

    /// Number of calls to the blocking [`Runtime::canonicalize`].
    pub fn blocking_canonicalizations(&self) -> usize {
        self.blocking_canonicalizations.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Runtime for CountingRuntime {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        *self.reads.lock().entry(path.to_path_buf()).or_insert(0) += 1;
        std::fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RuntimeError::FileNotFound(path.to_path_buf())
            } else {
                RuntimeError::Io(e.to_string())
            }
        })
    }

    async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata> {
        let metadata = std::fs::metadata(path).map_err(|e| RuntimeError::Io(e.to_string()))?;
        Ok(FileMetadata {
            size: metadata.len(),
            is_file: metadata.is_file(),
            is_dir: metadata.is_dir(),
            modified: metadata
                .modified()
                .ok()
                .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
                .map(|d| d.as_millis() as u64),
        })
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    async fn read_dir(&self, path: &Path) -> RuntimeResult<Vec<String>> {
        let mut entries: Vec<String> = std::fs::read_dir(path)
            .map_err(|e| RuntimeError::Io(e.to_string()))?
            .filter_map(|entry| {
                entry
                    .ok()
                    .and_then(|e| e.file_name().to_str().map(String::from))
            })
            .collect();
        entries.sort();
        Ok(entries)
    }

    fn canonicalize(&self, path: &Path) -> RuntimeResult<PathBuf> {
        self.blocking_canonicalizations.fetch_add(1, Ordering::Relaxed);
        std::fs::canonicalize(path).map_err(|e| RuntimeError::Io(e.to_string()))
    }

    async fn canonicalize_async(&self, path: &Path) -> RuntimeResult<PathBuf> {
        std::fs::canonicalize(path).map_err(|e| RuntimeError::Io(e.to_string()))
    }

    fn get_cwd(&self) -> RuntimeResult<PathBuf> {
        Ok(self.cwd.clone())
    }
}
