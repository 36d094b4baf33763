//! Platform runtime abstraction.
//!
//! Every filesystem touch the engine makes goes through the `Runtime` trait:
//! reading a source file, probing a candidate path, listing a directory's
//! children and canonicalizing a resolved file. Nothing else in the crate
//! talks to the OS directly.

#[cfg(not(target_family = "wasm"))]
pub mod native;

#[cfg(any(
    all(test, not(target_family = "wasm")),
    all(feature = "test-utils", not(target_family = "wasm"))
))]
pub mod test_utils;

use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur during runtime operations
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),

    /// Other runtime error
    #[error("Runtime error: {0}")]
    Other(String),
}

/// File metadata
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// File size in bytes
    pub size: u64,
    /// Whether this is a directory
    pub is_dir: bool,
    /// Whether this is a file
    pub is_file: bool,
    /// Last modified timestamp (milliseconds since epoch)
    pub modified: Option<u64>,
}

/// Platform runtime trait
///
/// The engine is single-writer and extracts one file at a time, but the trait
/// is still `Send + Sync` so an engine can be moved onto whichever task owns it.
#[async_trait]
pub trait Runtime: Send + Sync + std::fmt::Debug {
    /// Read a file from the filesystem
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>>;

    /// Get file metadata
    async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// List the names of a directory's children
    async fn read_dir(&self, path: &Path) -> RuntimeResult<Vec<String>>;

    /// Resolve symlinks and relative components of an existing path.
    ///
    /// Blocks the calling thread. Only engine construction calls it directly.
    fn canonicalize(&self, path: &Path) -> RuntimeResult<PathBuf>;

    /// [`Runtime::canonicalize`] for the analysis path, which runs inside
    /// async callers.
    async fn canonicalize_async(&self, path: &Path) -> RuntimeResult<PathBuf> {
        self.canonicalize(path)
    }

    /// Get the current working directory
    fn get_cwd(&self) -> RuntimeResult<PathBuf>;
}

/// Returns `true` when `path` exists and is a regular file.
pub(crate) async fn is_file(runtime: &dyn Runtime, path: &Path) -> bool {
    runtime
        .metadata(path)
        .await
        .is_ok_and(|metadata| metadata.is_file)
}

/// Returns `true` when `path` exists and is a directory.
pub(crate) async fn is_dir(runtime: &dyn Runtime, path: &Path) -> bool {
    runtime
        .metadata(path)
        .await
        .is_ok_and(|metadata| metadata.is_dir)
}
