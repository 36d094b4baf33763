//! Declaration extraction.
//!
//! Extraction runs in two stages. [`scan_module`] parses a file and walks
//! the tree once, producing a [`ModuleScan`] of raw [`ModuleItem`]s with
//! specifiers exactly as written. [`Extractor::extract`] then lowers those
//! items into a [`ModuleRecord`] using the resolver's answers and, for
//! namespace-style bindings, the export surfaces already in the graph.

mod items;
mod parse;
mod visitor;

pub use items::{ImportBinding, ModuleItem, ModuleScan, ReExportName};
pub use parse::scan_module;

use std::collections::BTreeSet;
use std::path::PathBuf;

use rustc_hash::FxHashMap;

use crate::file_id::FileId;
use crate::graph::DependencyGraph;
use crate::record::{DEFAULT_EXPORT, EXPORT_EQUALS, ModuleRecord, NAMESPACE, SymbolName};
use crate::resolver::Resolved;
use crate::runtime::RuntimeError;

/// Specifier → resolution, for every specifier of one scan.
pub type Resolutions = FxHashMap<String, Resolved>;

/// Why a file could not be analyzed.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: RuntimeError,
    },

    #[error("{path} is not valid UTF-8")]
    InvalidUtf8 { path: PathBuf },

    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("{path} is not a JavaScript or TypeScript module")]
    Unsupported { path: PathBuf },
}

/// Lowers scans into records against a graph snapshot.
#[derive(Debug, Clone, Copy)]
pub struct Extractor<'g> {
    graph: &'g DependencyGraph,
}

impl<'g> Extractor<'g> {
    pub fn new(graph: &'g DependencyGraph) -> Self {
        Self { graph }
    }

    /// Produce the record for one scanned file.
    ///
    /// Specifiers missing from `resolutions` are treated as unresolved.
    pub fn extract(&self, scan: &ModuleScan, resolutions: &Resolutions) -> ModuleRecord {
        let mut record = ModuleRecord::default();

        for item in &scan.items {
            let target = match item.source().and_then(|source| resolutions.get(source)) {
                Some(Resolved::Style(style)) => {
                    record.style_imports.insert(style.clone());
                    continue;
                }
                Some(Resolved::Module(id)) => Some(id),
                _ => None,
            };

            self.lower(item, target, &mut record);
        }

        record
    }

    fn lower(&self, item: &ModuleItem, target: Option<&FileId>, record: &mut ModuleRecord) {
        match item {
            ModuleItem::Import { bindings, .. } => {
                let Some(target) = target else { return };
                let mut symbols = BTreeSet::new();
                for binding in bindings {
                    match binding {
                        ImportBinding::Default => {
                            symbols.insert(DEFAULT_EXPORT.to_string());
                        }
                        ImportBinding::Named(name) => {
                            symbols.insert(name.clone());
                        }
                        ImportBinding::Namespace => symbols.extend(self.namespace(target)),
                    }
                }
                record.add_import(target.clone(), symbols);
            }

            ModuleItem::ImportEquals { .. } | ModuleItem::Dynamic { .. } => {
                if let Some(target) = target {
                    record.add_import(target.clone(), self.namespace(target));
                }
            }

            ModuleItem::ReExport { names, .. } => {
                if let Some(target) = target {
                    record.add_import(
                        target.clone(),
                        names.iter().map(|name| name.imported.clone()),
                    );
                }
                for name in names {
                    record.add_export(name.exported.clone());
                }
            }

            ModuleItem::ReExportAll { .. } => {
                let Some(target) = target else { return };
                match self.graph.get(target) {
                    Some(source) => {
                        let named = source.common_exports.clone();
                        record.add_import(target.clone(), named.iter().cloned());
                        for name in named {
                            record.add_export(name);
                        }
                    }
                    None => record.add_import(target.clone(), [NAMESPACE.to_string()]),
                }
            }

            ModuleItem::ReExportNamespace { name, .. } => {
                if let Some(target) = target {
                    record.add_import(target.clone(), self.namespace(target));
                }
                record.add_export(name.clone());
            }

            ModuleItem::LocalExport { names } => {
                for name in names {
                    record.add_export(name.clone());
                }
            }

            ModuleItem::DefaultExport { name } | ModuleItem::CommonJsExport { name } => {
                record.set_default(name.clone().unwrap_or_else(|| DEFAULT_EXPORT.to_string()));
            }

            ModuleItem::ExportAssignment { name } => {
                record.set_default(name.clone().unwrap_or_else(|| EXPORT_EQUALS.to_string()));
            }

            ModuleItem::CommonJsNamed { name } => record.add_export(name.clone()),
        }
    }

    /// `"*"` plus the target's export surface when it is already analyzed.
    fn namespace(&self, target: &FileId) -> BTreeSet<SymbolName> {
        let mut symbols = BTreeSet::from([NAMESPACE.to_string()]);
        if let Some(record) = self.graph.get(target) {
            symbols.extend(record.export_surface());
        }
        symbols
    }
}
