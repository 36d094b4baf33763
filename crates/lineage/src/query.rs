//! Symbol-level transitive dependency closure.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::file_id::FileId;
use crate::graph::DependencyGraph;
use crate::tracer::trace_origins;

/// Result of querying one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "camelCase")]
pub enum QueryOutcome {
    /// The file was analyzed; these are its final dependencies.
    Found(BTreeSet<FileId>),
    /// The path does not name an analyzable file.
    NotFound(PathBuf),
}

impl QueryOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, QueryOutcome::Found(_))
    }

    /// The closure, or an empty set when the file was not found.
    pub fn dependencies(&self) -> BTreeSet<FileId> {
        match self {
            QueryOutcome::Found(deps) => deps.clone(),
            QueryOutcome::NotFound(_) => BTreeSet::new(),
        }
    }

    pub fn missing_path(&self) -> Option<&Path> {
        match self {
            QueryOutcome::Found(_) => None,
            QueryOutcome::NotFound(path) => Some(path),
        }
    }
}

/// Every file `file` ultimately depends on, at symbol granularity.
///
/// Each (edge, symbol) of the file is traced to its origins; every origin
/// is expanded the same way at most once. Stylesheets imported by any
/// member of the closure are then added. `file` itself is never part of
/// the result, and its own stylesheets only appear when it turned out to
/// be an origin of one of its transitive dependencies.
pub fn dependency_closure(graph: &DependencyGraph, file: &FileId) -> BTreeSet<FileId> {
    let mut result = BTreeSet::new();
    let mut expanded = FxHashSet::default();
    expanded.insert(file.clone());
    let mut pending = vec![file.clone()];

    while let Some(current) = pending.pop() {
        let Some(record) = graph.get(&current) else {
            continue;
        };

        for (target, symbols) in &record.imports {
            for symbol in symbols {
                for origin in trace_origins(graph, target, symbol) {
                    if expanded.insert(origin.clone()) {
                        pending.push(origin.clone());
                    }
                    result.insert(origin);
                }
            }
        }
    }

    let styles: Vec<FileId> = result
        .iter()
        .filter_map(|member| graph.get(member))
        .flat_map(|record| record.style_imports.iter().cloned())
        .collect();
    result.extend(styles);

    result.remove(file);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ModuleRecord;

    fn id(path: &str) -> FileId {
        FileId::new(path).unwrap()
    }

    #[test]
    fn not_found_has_no_dependencies() {
        let outcome = QueryOutcome::NotFound(PathBuf::from("/p/missing.ts"));
        assert!(!outcome.is_found());
        assert!(outcome.dependencies().is_empty());
        assert_eq!(outcome.missing_path(), Some(Path::new("/p/missing.ts")));
    }

    #[test]
    fn own_styles_are_excluded() {
        let (a, d) = (id("/p/a.ts"), id("/p/d.ts"));
        let (a_css, d_css) = (id("/p/a.css"), id("/p/d.css"));

        let mut graph = DependencyGraph::new();
        let mut entry = ModuleRecord::default();
        entry.add_import(d.clone(), ["S".to_string()]);
        entry.style_imports.insert(a_css.clone());
        graph.insert(a.clone(), entry);

        let mut dep = ModuleRecord::default();
        dep.add_export("S".to_string());
        dep.style_imports.insert(d_css.clone());
        graph.insert(d.clone(), dep);

        let closure = dependency_closure(&graph, &a);
        assert_eq!(closure, BTreeSet::from([d, d_css]));
        assert!(!closure.contains(&a_css));
    }

    #[test]
    fn side_effect_only_edges_contribute_nothing() {
        let (a, b) = (id("/p/a.ts"), id("/p/b.ts"));
        let mut graph = DependencyGraph::new();
        let mut entry = ModuleRecord::default();
        entry.add_import(b.clone(), Vec::<String>::new());
        graph.insert(a.clone(), entry);
        graph.insert(b, ModuleRecord::default());

        assert!(dependency_closure(&graph, &a).is_empty());
    }

    #[test]
    fn origins_are_expanded_transitively() {
        // a uses S from b; b's declaration of S uses T from c.
        let (a, b, c) = (id("/p/a.ts"), id("/p/b.ts"), id("/p/c.ts"));
        let mut graph = DependencyGraph::new();

        let mut entry = ModuleRecord::default();
        entry.add_import(b.clone(), ["S".to_string()]);
        graph.insert(a.clone(), entry);

        let mut middle = ModuleRecord::default();
        middle.add_export("S".to_string());
        middle.add_import(c.clone(), ["T".to_string()]);
        graph.insert(b.clone(), middle);

        let mut leaf = ModuleRecord::default();
        leaf.add_export("T".to_string());
        graph.insert(c.clone(), leaf);

        assert_eq!(dependency_closure(&graph, &a), BTreeSet::from([b, c]));
    }
}
