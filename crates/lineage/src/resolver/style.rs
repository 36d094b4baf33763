//! Stylesheet specifiers.
//!
//! Styles never enter the import ledger. A relative stylesheet that does not
//! exist on disk still resolves to its computed path so generated assets are
//! kept; an aliased one must exist or it is dropped.

use std::path::Path;

use path_clean::PathClean;

use super::{SpecifierKind, identity, relative_candidate};
use crate::config::STYLE_EXTENSIONS;
use crate::file_id::FileId;
use crate::runtime::{self, Runtime};

use super::Resolved;

/// Whether the specifier names a stylesheet, ignoring any `?query` or `#hash`.
pub fn is_style_specifier(specifier: &str) -> bool {
    Path::new(strip_query(specifier))
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            STYLE_EXTENSIONS
                .iter()
                .any(|style| style.eq_ignore_ascii_case(ext))
        })
}

pub(super) async fn resolve_style(
    kind: SpecifierKind,
    specifier: &str,
    from: &Path,
    runtime: &dyn Runtime,
) -> Resolved {
    match kind {
        SpecifierKind::External => Resolved::External(specifier.to_string()),
        SpecifierKind::Relative => {
            let candidate = relative_candidate(strip_query(specifier), from);
            if runtime::is_file(runtime, &candidate).await {
                if let Some(id) = identity(&candidate, runtime).await {
                    return Resolved::Style(id);
                }
            }
            match FileId::new(candidate.clean()) {
                Ok(id) => Resolved::Style(id),
                Err(_) => Resolved::Unresolved(specifier.to_string()),
            }
        }
        SpecifierKind::Aliased(base) => {
            if runtime::is_file(runtime, &base).await {
                if let Some(id) = identity(&base, runtime).await {
                    return Resolved::Style(id);
                }
            }
            Resolved::Unresolved(specifier.to_string())
        }
    }
}

pub(super) fn strip_query(specifier: &str) -> &str {
    specifier
        .split(['?', '#'])
        .next()
        .unwrap_or(specifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_style_extensions() {
        assert!(is_style_specifier("./foo.css"));
        assert!(is_style_specifier("./theme.SCSS"));
        assert!(is_style_specifier("@/styles/app.less"));
        assert!(is_style_specifier("bootstrap/dist/bootstrap.css"));
        assert!(is_style_specifier("./x.module.sass?inline"));
        assert!(is_style_specifier("./x.styl"));
        assert!(is_style_specifier("./x.stylus"));
        assert!(!is_style_specifier("./foo"));
        assert!(!is_style_specifier("./foo.ts"));
        assert!(!is_style_specifier("./css"));
    }

    #[test]
    fn strip_query_keeps_path() {
        assert_eq!(strip_query("./a.css?inline"), "./a.css");
        assert_eq!(strip_query("./a.css#x"), "./a.css");
        assert_eq!(strip_query("./a.css"), "./a.css");
    }
}
