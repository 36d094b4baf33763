//! Persistent file → record mapping owned by one engine.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use crate::file_id::FileId;
use crate::record::ModuleRecord;

/// Append-only dependency graph.
///
/// Holds at most one [`ModuleRecord`] per file. Once inserted, a record is
/// never replaced; the graph lives exactly as long as its owning engine.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    records: FxHashMap<FileId, ModuleRecord>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the record for `file`.
    ///
    /// Returns `false` and drops `record` if `file` was already analyzed.
    pub fn insert(&mut self, file: FileId, record: ModuleRecord) -> bool {
        if self.records.contains_key(&file) {
            return false;
        }
        self.records.insert(file, record);
        true
    }

    pub fn get(&self, file: &FileId) -> Option<&ModuleRecord> {
        self.records.get(file)
    }

    pub fn contains(&self, file: &FileId) -> bool {
        self.records.contains_key(file)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over analyzed files in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&FileId, &ModuleRecord)> {
        self.records.iter()
    }

    /// Sorted view of the whole graph, for tooling and JSON output.
    pub fn snapshot(&self) -> BTreeMap<&FileId, &ModuleRecord> {
        self.records.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_append_only() {
        let mut graph = DependencyGraph::new();
        let file = FileId::new("/p/a.ts").unwrap();

        let mut first = ModuleRecord::default();
        first.add_export("a".to_string());
        assert!(graph.insert(file.clone(), first));

        let mut second = ModuleRecord::default();
        second.add_export("b".to_string());
        assert!(!graph.insert(file.clone(), second));

        let stored = graph.get(&file).unwrap();
        assert!(stored.common_exports.contains("a"));
        assert!(!stored.common_exports.contains("b"));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn snapshot_is_sorted() {
        let mut graph = DependencyGraph::new();
        for path in ["/p/c.ts", "/p/a.ts", "/p/b.ts"] {
            graph.insert(FileId::new(path).unwrap(), ModuleRecord::default());
        }

        let keys: Vec<_> = graph.snapshot().keys().map(|id| id.as_str()).collect();
        assert_eq!(keys, vec!["/p/a.ts", "/p/b.ts", "/p/c.ts"]);
    }
}
