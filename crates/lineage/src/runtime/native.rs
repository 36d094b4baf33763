//! `std::fs` behind the [`Runtime`] trait.
//!
//! Reads and listings run on tokio's blocking pool.

#![allow(clippy::disallowed_methods)]

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::task;

use super::{FileMetadata, Runtime, RuntimeError, RuntimeResult};

/// Native filesystem `Runtime` implementation using `std::fs`.
///
/// # Example
///
/// ```rust,no_run
/// use lineage::{NativeRuntime, Runtime};
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let runtime = NativeRuntime::new();
/// let content = runtime.read_file(Path::new("src/index.ts")).await?;
/// # Ok(()) }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NativeRuntime;

impl NativeRuntime {
    /// Create a new NativeRuntime instance.
    pub fn new() -> Self {
        Self
    }
}

impl Default for NativeRuntime {
    fn default() -> Self {
        Self::new()
    }
}

/// Map an I/O failure on `path` to a [`RuntimeError`], keeping not-found distinct.
fn io_error(action: &str, path: &Path, err: std::io::Error) -> RuntimeError {
    if err.kind() == std::io::ErrorKind::NotFound {
        RuntimeError::FileNotFound(path.to_path_buf())
    } else {
        RuntimeError::Io(format!("{action} {}: {err}", path.display()))
    }
}

/// Run a filesystem call for `path` on the blocking pool.
async fn blocking<T, F>(path: &Path, op: F) -> RuntimeResult<T>
where
    T: Send + 'static,
    F: FnOnce(PathBuf) -> RuntimeResult<T> + Send + 'static,
{
    let path = path.to_path_buf();
    task::spawn_blocking(move || op(path))
        .await
        .map_err(|err| RuntimeError::Other(format!("blocking task failed: {err}")))?
}

#[async_trait]
impl Runtime for NativeRuntime {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        blocking(path, |path| {
            std::fs::read(&path).map_err(|err| io_error("cannot read", &path, err))
        })
        .await
    }

    async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata> {
        blocking(path, |path| {
            let meta =
                std::fs::metadata(&path).map_err(|err| io_error("cannot stat", &path, err))?;
            let modified = meta
                .modified()
                .ok()
                .and_then(|time| time.duration_since(std::time::UNIX_EPOCH).ok())
                .map(|elapsed| elapsed.as_millis() as u64);

            Ok(FileMetadata {
                size: meta.len(),
                is_dir: meta.is_dir(),
                is_file: meta.is_file(),
                modified,
            })
        })
        .await
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    async fn read_dir(&self, path: &Path) -> RuntimeResult<Vec<String>> {
        blocking(path, |path| {
            let listing =
                std::fs::read_dir(&path).map_err(|err| io_error("cannot list", &path, err))?;

            let mut names = listing
                .map(|entry| {
                    entry
                        .map(|entry| entry.file_name().to_string_lossy().into_owned())
                        .map_err(|err| io_error("cannot list", &path, err))
                })
                .collect::<RuntimeResult<Vec<_>>>()?;

            // read_dir order is platform-dependent
            names.sort();
            Ok(names)
        })
        .await
    }

    fn canonicalize(&self, path: &Path) -> RuntimeResult<PathBuf> {
        std::fs::canonicalize(path).map_err(|err| io_error("cannot canonicalize", path, err))
    }

    async fn canonicalize_async(&self, path: &Path) -> RuntimeResult<PathBuf> {
        blocking(path, |path| {
            std::fs::canonicalize(&path).map_err(|err| io_error("cannot canonicalize", &path, err))
        })
        .await
    }

    fn get_cwd(&self) -> RuntimeResult<PathBuf> {
        std::env::current_dir()
            .map_err(|err| RuntimeError::Io(format!("cannot read working directory: {err}")))
    }
}
