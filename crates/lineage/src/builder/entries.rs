//! Entry discovery for build roots.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::{PARSEABLE_EXTENSIONS, SKIPPED_DIRECTORIES};
use crate::resolver::try_index_files;
use crate::runtime::{self, Runtime};

/// Files to start analysis from for one root.
///
/// A file root is its own entry. A directory root prefers its `index.<ext>`
/// file; without one, every parseable file below it is an entry.
pub(crate) async fn entry_files(root: &Path, runtime: &dyn Runtime) -> Vec<PathBuf> {
    if runtime::is_file(runtime, root).await {
        return vec![root.to_path_buf()];
    }

    if !runtime::is_dir(runtime, root).await {
        warn!(root = %root.display(), "build root does not exist");
        return Vec::new();
    }

    if let Some(index) = try_index_files(root, runtime).await {
        debug!(root = %root.display(), entry = %index.display(), "using index entry");
        return vec![index];
    }

    let files = enumerate_sources(root, runtime).await;
    debug!(root = %root.display(), count = files.len(), "enumerated source files");
    files
}

/// Every parseable file under `dir`, sorted.
///
/// `node_modules` and dot-directories are not descended into.
pub(crate) async fn enumerate_sources(dir: &Path, runtime: &dyn Runtime) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        let children = match runtime.read_dir(&current).await {
            Ok(children) => children,
            Err(err) => {
                warn!(dir = %current.display(), error = %err, "failed to list directory");
                continue;
            }
        };

        for name in children {
            let path = current.join(&name);
            if runtime::is_dir(runtime, &path).await {
                if !is_skipped_directory(&name) {
                    pending.push(path);
                }
            } else if is_parseable(&path) && runtime::is_file(runtime, &path).await {
                files.push(path);
            }
        }
    }

    files.sort();
    files
}

fn is_skipped_directory(name: &str) -> bool {
    name.starts_with('.') || SKIPPED_DIRECTORIES.contains(&name)
}

pub(crate) fn is_parseable(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            PARSEABLE_EXTENSIONS
                .iter()
                .any(|parseable| parseable.eq_ignore_ascii_case(ext))
        })
}
