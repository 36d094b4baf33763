//! Extension and index-file probing for module candidates.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::SOURCE_EXTENSIONS;
use crate::runtime::{self, Runtime};

/// Append `.ext` to `path` without replacing an existing extension.
///
/// `./user.service` must probe `user.service.ts`, not `user.ts`.
pub fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut raw = OsString::from(path.as_os_str());
    raw.push(".");
    raw.push(ext);
    PathBuf::from(raw)
}

/// Try the candidate as-is, then with each source extension appended.
pub async fn try_extensions(candidate: &Path, runtime: &dyn Runtime) -> Option<PathBuf> {
    if runtime::is_file(runtime, candidate).await {
        return Some(candidate.to_path_buf());
    }

    for ext in SOURCE_EXTENSIONS {
        let with_ext = append_extension(candidate, ext);
        if runtime::is_file(runtime, &with_ext).await {
            return Some(with_ext);
        }
    }

    None
}

/// Try the candidate as a directory containing an `index.<ext>` file.
pub async fn try_index_files(dir: &Path, runtime: &dyn Runtime) -> Option<PathBuf> {
    if !runtime::is_dir(runtime, dir).await {
        return None;
    }

    for ext in SOURCE_EXTENSIONS {
        let index = dir.join(format!("index.{ext}"));
        if runtime::is_file(runtime, &index).await {
            return Some(index);
        }
    }

    None
}

/// Full candidate resolution: literal file, appended extensions, then index files.
pub async fn resolve_candidate(candidate: &Path, runtime: &dyn Runtime) -> Option<PathBuf> {
    if let Some(found) = try_extensions(candidate, runtime).await {
        return Some(found);
    }
    try_index_files(candidate, runtime).await
}
