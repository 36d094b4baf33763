//! Per-file analysis record.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::file_id::FileId;

/// An identifier bound by an import or declared by an export.
pub type SymbolName = String;

/// Binding name of a module's default export/import.
pub const DEFAULT_EXPORT: &str = "default";

/// Binding that stands for a module's entire namespace.
pub const NAMESPACE: &str = "*";

/// Default-export marker for an anonymous TypeScript `export = …` assignment.
pub const EXPORT_EQUALS: &str = "export=";

/// What one analyzed file imports, exports and pulls in for side effect.
///
/// A record is produced by a single extraction pass and never changes
/// afterwards. `common_exports` never contains [`DEFAULT_EXPORT`], and
/// `imports` only ever holds locally resolved files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRecord {
    /// Target file to the symbols bound from it. An empty set is a
    /// side-effect-only import.
    pub imports: BTreeMap<FileId, BTreeSet<SymbolName>>,

    /// `None` when the file has no default export, otherwise the bound name
    /// (a concrete identifier or one of the sentinels).
    pub default_export: Option<SymbolName>,

    /// Every non-default export name.
    pub common_exports: BTreeSet<SymbolName>,

    /// Stylesheets imported for side effect. Leaves, never graph nodes.
    pub style_imports: BTreeSet<FileId>,
}

impl ModuleRecord {
    /// Record for a JSON module: a default export and nothing else.
    pub fn json() -> Self {
        Self {
            default_export: Some(DEFAULT_EXPORT.to_string()),
            ..Self::default()
        }
    }

    /// Whether `symbol` is part of this file's export surface.
    ///
    /// The default binding is reachable both as `"default"` and under the
    /// concrete name recorded in `default_export`.
    pub fn exports(&self, symbol: &str) -> bool {
        if self.common_exports.contains(symbol) {
            return true;
        }
        match &self.default_export {
            Some(name) => symbol == DEFAULT_EXPORT || symbol == name,
            None => false,
        }
    }

    /// Every name another module can bind from this file:
    /// `common_exports`, plus `"default"` when a default export exists.
    pub fn export_surface(&self) -> BTreeSet<SymbolName> {
        let mut surface = self.common_exports.clone();
        if self.default_export.is_some() {
            surface.insert(DEFAULT_EXPORT.to_string());
        }
        surface
    }

    /// Add symbols bound from `target`, creating the edge if needed.
    pub(crate) fn add_import<I>(&mut self, target: FileId, symbols: I)
    where
        I: IntoIterator<Item = SymbolName>,
    {
        self.imports.entry(target).or_default().extend(symbols);
    }

    /// Add a non-default export; `"default"` is routed to `default_export`.
    pub(crate) fn add_export(&mut self, name: SymbolName) {
        if name == DEFAULT_EXPORT {
            self.set_default(name);
        } else {
            self.common_exports.insert(name);
        }
    }

    /// Set the default export unless an earlier declaration already did.
    pub(crate) fn set_default(&mut self, name: SymbolName) {
        if self.default_export.is_none() {
            self.default_export = Some(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str) -> FileId {
        FileId::new(path).unwrap()
    }

    #[test]
    fn default_never_enters_common_exports() {
        let mut record = ModuleRecord::default();
        record.add_export("default".to_string());
        record.add_export("Foo".to_string());

        assert!(!record.common_exports.contains(DEFAULT_EXPORT));
        assert_eq!(record.default_export.as_deref(), Some(DEFAULT_EXPORT));
        assert!(record.common_exports.contains("Foo"));
    }

    #[test]
    fn first_default_wins() {
        let mut record = ModuleRecord::default();
        record.set_default("App".to_string());
        record.set_default("default".to_string());
        assert_eq!(record.default_export.as_deref(), Some("App"));
    }

    #[test]
    fn surface_includes_default_sentinel() {
        let mut record = ModuleRecord::default();
        record.set_default("App".to_string());
        record.add_export("helper".to_string());

        let surface: Vec<_> = record.export_surface().into_iter().collect();
        assert_eq!(surface, vec!["default".to_string(), "helper".to_string()]);
        assert!(record.exports("default"));
        assert!(record.exports("App"));
        assert!(record.exports("helper"));
        assert!(!record.exports("missing"));
    }

    #[test]
    fn imports_accumulate_per_target() {
        let mut record = ModuleRecord::default();
        let target = file("/p/a.ts");
        record.add_import(target.clone(), ["x".to_string()]);
        record.add_import(target.clone(), ["y".to_string()]);
        record.add_import(file("/p/b.ts"), Vec::new());

        assert_eq!(record.imports[&target].len(), 2);
        assert!(record.imports[&file("/p/b.ts")].is_empty());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let record = ModuleRecord::json();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["defaultExport"], "default");
        assert!(value["commonExports"].as_array().unwrap().is_empty());
        assert!(value["styleImports"].as_array().unwrap().is_empty());
    }
}
