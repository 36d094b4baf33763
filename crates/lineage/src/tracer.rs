//! Symbol provenance tracing.
//!
//! Given a file and a symbol it exports, follow the import edges that carry
//! that symbol until reaching the file(s) that declare it. Barrels and
//! re-exporting modules are passed through; only declaring files are
//! returned.

use std::collections::BTreeSet;

use crate::file_id::FileId;
use crate::graph::DependencyGraph;

/// The files on the current trace path, innermost first.
///
/// Each recursive call pushes a frame that borrows its parent, so sibling
/// branches share the prefix they have in common and never see each
/// other's frames. A single path can never revisit a file, while two
/// branches may both pass through the same one.
#[derive(Debug, Clone, Copy)]
pub struct TracePath<'p> {
    file: &'p FileId,
    parent: Option<&'p TracePath<'p>>,
}

impl<'p> TracePath<'p> {
    pub fn new(file: &'p FileId) -> Self {
        Self { file, parent: None }
    }

    /// Extend this path by one file.
    pub fn push(&'p self, file: &'p FileId) -> TracePath<'p> {
        TracePath {
            file,
            parent: Some(self),
        }
    }

    pub fn contains(&self, file: &FileId) -> bool {
        let mut frame = Some(self);
        while let Some(current) = frame {
            if current.file == file {
                return true;
            }
            frame = current.parent;
        }
        false
    }
}

/// Files that truly declare `symbol` as exported by `file`.
///
/// An empty set means `file` does not export `symbol` (or every route to a
/// declaration loops back on itself). A file missing from the graph is its
/// own origin.
pub fn trace_origins(graph: &DependencyGraph, file: &FileId, symbol: &str) -> BTreeSet<FileId> {
    trace(graph, file, symbol, None)
}

fn trace(
    graph: &DependencyGraph,
    file: &FileId,
    symbol: &str,
    path: Option<&TracePath<'_>>,
) -> BTreeSet<FileId> {
    if path.is_some_and(|path| path.contains(file)) {
        return BTreeSet::new();
    }

    let Some(record) = graph.get(file) else {
        return BTreeSet::from([file.clone()]);
    };

    if !record.exports(symbol) {
        return BTreeSet::new();
    }

    let here = match path {
        Some(parent) => parent.push(file),
        None => TracePath::new(file),
    };

    let mut origins = BTreeSet::new();
    let mut forwarded = false;

    for (target, symbols) in &record.imports {
        if !symbols.contains(symbol) {
            continue;
        }
        forwarded = true;

        if target == file {
            // Imports itself; nothing further to follow.
            origins.insert(file.clone());
            continue;
        }

        origins.extend(trace(graph, target, symbol, Some(&here)));
    }

    if !forwarded {
        origins.insert(file.clone());
    }

    origins
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ModuleRecord;

    fn id(path: &str) -> FileId {
        FileId::new(path).unwrap()
    }

    fn declaring(names: &[&str]) -> ModuleRecord {
        let mut record = ModuleRecord::default();
        for name in names {
            record.add_export(name.to_string());
        }
        record
    }

    fn forwarding(target: &FileId, names: &[&str]) -> ModuleRecord {
        let mut record = declaring(names);
        record.add_import(target.clone(), names.iter().map(|name| name.to_string()));
        record
    }

    #[test]
    fn path_membership_follows_parents() {
        let (a, b, c) = (id("/p/a.ts"), id("/p/b.ts"), id("/p/c.ts"));
        let root = TracePath::new(&a);
        let child = root.push(&b);

        assert!(child.contains(&a));
        assert!(child.contains(&b));
        assert!(!child.contains(&c));
        assert!(!root.contains(&b));
    }

    #[test]
    fn verbatim_reexport_resolves_to_declarer() {
        let (a, b) = (id("/p/a.ts"), id("/p/b.ts"));
        let mut graph = DependencyGraph::new();
        graph.insert(a.clone(), forwarding(&b, &["S"]));
        graph.insert(b.clone(), declaring(&["S"]));

        assert_eq!(trace_origins(&graph, &a, "S"), BTreeSet::from([b.clone()]));
        assert_eq!(trace_origins(&graph, &b, "S"), BTreeSet::from([b]));
    }

    #[test]
    fn symbol_not_exported_yields_nothing() {
        let a = id("/p/a.ts");
        let mut graph = DependencyGraph::new();
        graph.insert(a.clone(), declaring(&["S"]));

        assert!(trace_origins(&graph, &a, "Other").is_empty());
    }

    #[test]
    fn missing_file_is_its_own_origin() {
        let ghost = id("/p/ghost.ts");
        let graph = DependencyGraph::new();

        assert_eq!(
            trace_origins(&graph, &ghost, "anything"),
            BTreeSet::from([ghost])
        );
    }

    #[test]
    fn mutual_cycle_terminates() {
        let (a, b) = (id("/p/a.ts"), id("/p/b.ts"));
        let mut graph = DependencyGraph::new();
        graph.insert(a.clone(), forwarding(&b, &["S"]));
        graph.insert(b.clone(), forwarding(&a, &["S"]));

        assert!(trace_origins(&graph, &a, "S").is_empty());
        assert!(trace_origins(&graph, &b, "S").is_empty());
    }

    #[test]
    fn sibling_branches_may_share_a_file() {
        // a forwards S from both b and c; both forward it from d.
        let (a, b, c, d) = (id("/p/a.ts"), id("/p/b.ts"), id("/p/c.ts"), id("/p/d.ts"));
        let mut graph = DependencyGraph::new();
        let mut barrel = declaring(&["S"]);
        barrel.add_import(b.clone(), ["S".to_string()]);
        barrel.add_import(c.clone(), ["S".to_string()]);
        graph.insert(a.clone(), barrel);
        graph.insert(b.clone(), forwarding(&d, &["S"]));
        graph.insert(c.clone(), forwarding(&d, &["S"]));
        graph.insert(d.clone(), declaring(&["S"]));

        assert_eq!(trace_origins(&graph, &a, "S"), BTreeSet::from([d]));
    }

    #[test]
    fn multiple_origins_are_unioned() {
        let (a, b, c) = (id("/p/a.ts"), id("/p/b.ts"), id("/p/c.ts"));
        let mut graph = DependencyGraph::new();
        let mut barrel = declaring(&["S"]);
        barrel.add_import(b.clone(), ["S".to_string()]);
        barrel.add_import(c.clone(), ["S".to_string()]);
        graph.insert(a.clone(), barrel);
        graph.insert(b.clone(), declaring(&["S"]));
        graph.insert(c.clone(), declaring(&["S"]));

        assert_eq!(trace_origins(&graph, &a, "S"), BTreeSet::from([b, c]));
    }

    #[test]
    fn self_import_is_own_origin() {
        let a = id("/p/a.ts");
        let mut graph = DependencyGraph::new();
        graph.insert(a.clone(), forwarding(&a, &["S"]));

        assert_eq!(trace_origins(&graph, &a, "S"), BTreeSet::from([a]));
    }

    #[test]
    fn default_reachable_by_concrete_name() {
        let a = id("/p/a.ts");
        let mut graph = DependencyGraph::new();
        let mut record = ModuleRecord::default();
        record.set_default("Widget".to_string());
        graph.insert(a.clone(), record);

        assert_eq!(trace_origins(&graph, &a, "default"), BTreeSet::from([a.clone()]));
        assert_eq!(trace_origins(&graph, &a, "Widget"), BTreeSet::from([a]));
    }
}
