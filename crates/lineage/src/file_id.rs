use std::borrow::Borrow;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use path_clean::PathClean;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Canonical identity of a file in the dependency graph.
///
/// Always an absolute, cleaned path. Two files are the same node iff their
/// identities compare equal, so callers should build identities from
/// canonicalized paths wherever the file exists. Comparison is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(Arc<str>);

impl FileId {
    /// Create an identity from an absolute path, removing `.` and `..` segments.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, FileIdError> {
        let path = path.as_ref();

        if path.as_os_str().is_empty() {
            return Err(FileIdError::EmptyPath);
        }

        if !path.is_absolute() {
            return Err(FileIdError::Relative(path.to_path_buf()));
        }

        let cleaned = path.clean();
        let text = cleaned
            .to_str()
            .ok_or_else(|| FileIdError::NonUtf8(cleaned.clone()))?;

        Ok(Self(Arc::from(text)))
    }

    /// Returns the identity as a filesystem path.
    pub fn as_path(&self) -> &Path {
        Path::new(&*self.0)
    }

    /// Borrow the identity as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-cased extension of the file, if any.
    pub fn extension(&self) -> Option<String> {
        self.as_path()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
    }

    /// Consume the identity and return an owned path.
    pub fn into_path_buf(self) -> PathBuf {
        PathBuf::from(&*self.0)
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<Path> for FileId {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

impl Borrow<str> for FileId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Serialize for FileId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

/// Error type for `FileId` construction failures.
#[derive(Debug, Error)]
pub enum FileIdError {
    /// The provided path was empty.
    #[error("file id path is empty")]
    EmptyPath,

    /// The provided path was not absolute.
    #[error("file id path '{}' is not absolute", .0.display())]
    Relative(PathBuf),

    /// The provided path is not valid UTF-8.
    #[error("file id path '{}' is not valid UTF-8", .0.display())]
    NonUtf8(PathBuf),
}
