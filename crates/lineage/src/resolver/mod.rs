//! Module specifier resolution.
//!
//! A specifier is first checked for a stylesheet extension, then classified
//! as relative (`./`, `../`), aliased (matches an [`AliasTable`] prefix) or
//! external. Only relative and aliased specifiers can resolve to a file;
//! external ones are opaque leaves and never become graph nodes.

mod extensions;
mod style;

pub use extensions::{append_extension, resolve_candidate, try_extensions, try_index_files};
pub use style::is_style_specifier;

use std::fmt;
use std::path::{Path, PathBuf};

use path_clean::PathClean;
use tracing::trace;

use crate::config::AliasTable;
use crate::file_id::FileId;
use crate::runtime::Runtime;

/// How a specifier is looked up, decided before touching the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecifierKind {
    /// Starts with a current- or parent-directory marker.
    Relative,
    /// Matched an alias; carries the alias base joined with the remainder.
    Aliased(PathBuf),
    /// Anything else: bare packages, URLs, absolute paths.
    External,
}

/// Outcome of resolving one specifier from one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// A local module; becomes an import edge.
    Module(FileId),
    /// A stylesheet; recorded as a style import only.
    Style(FileId),
    /// Not a local file (npm package, URL, absolute path).
    External(String),
    /// Local-looking specifier with no matching file.
    Unresolved(String),
}

impl Resolved {
    pub fn is_module(&self) -> bool {
        matches!(self, Resolved::Module(_))
    }

    /// The module identity, if this resolved to a local module.
    pub fn module(&self) -> Option<&FileId> {
        match self {
            Resolved::Module(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolved::Module(id) => write!(f, "Module({id})"),
            Resolved::Style(id) => write!(f, "Style({id})"),
            Resolved::External(name) => write!(f, "External({name})"),
            Resolved::Unresolved(specifier) => write!(f, "Unresolved({specifier})"),
        }
    }
}

/// Resolves import specifiers to file identities.
#[derive(Debug, Clone, Default)]
pub struct ModuleResolver {
    aliases: AliasTable,
}

impl ModuleResolver {
    pub fn new(aliases: AliasTable) -> Self {
        Self { aliases }
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Classify a specifier without consulting the filesystem.
    pub fn classify(&self, specifier: &str) -> SpecifierKind {
        if is_relative(specifier) {
            SpecifierKind::Relative
        } else if let Some(base) = self.aliases.resolve(specifier) {
            SpecifierKind::Aliased(base)
        } else {
            SpecifierKind::External
        }
    }

    /// Resolve `specifier` as written in `from`.
    pub async fn resolve(&self, specifier: &str, from: &Path, runtime: &dyn Runtime) -> Resolved {
        let resolved = if is_style_specifier(specifier) {
            let kind = self.classify(style::strip_query(specifier));
            style::resolve_style(kind, specifier, from, runtime).await
        } else {
            self.resolve_module(specifier, from, runtime).await
        };

        trace!(specifier, from = %from.display(), %resolved, "resolved specifier");
        resolved
    }

    async fn resolve_module(&self, specifier: &str, from: &Path, runtime: &dyn Runtime) -> Resolved {
        let candidate = match self.classify(specifier) {
            SpecifierKind::External => return Resolved::External(specifier.to_string()),
            SpecifierKind::Relative => relative_candidate(specifier, from),
            SpecifierKind::Aliased(base) => base,
        };

        match resolve_candidate(&candidate, runtime).await {
            Some(found) => match identity(&found, runtime).await {
                Some(id) => Resolved::Module(id),
                None => Resolved::Unresolved(specifier.to_string()),
            },
            None => Resolved::Unresolved(specifier.to_string()),
        }
    }
}

/// `./x`, `../x`, `.` and `..`.
pub fn is_relative(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}

/// Join a relative specifier onto the importing file's directory.
pub(crate) fn relative_candidate(specifier: &str, from: &Path) -> PathBuf {
    from.parent()
        .unwrap_or_else(|| Path::new(""))
        .join(specifier)
        .clean()
}

/// Canonical identity of an existing file, falling back to the cleaned path.
pub(crate) async fn identity(path: &Path, runtime: &dyn Runtime) -> Option<FileId> {
    let canonical = runtime
        .canonicalize_async(path)
        .await
        .unwrap_or_else(|_| path.to_path_buf());
    FileId::new(canonical).ok()
}
