//! Closed set of module-level facts a scan can produce.

use crate::record::SymbolName;

/// How a single import specifier binds from its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportBinding {
    /// `import x from '...'`
    Default,
    /// `import { a }` or `import { a as b }`; carries the exported name `a`.
    Named(SymbolName),
    /// `import * as ns from '...'`
    Namespace,
}

/// One name of an `export { .. } from '...'` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReExportName {
    /// Name exported by the source module.
    pub imported: SymbolName,
    /// Name this module exports it under.
    pub exported: SymbolName,
}

/// A declaration that affects a module's imports or exports.
///
/// Every variant that names a `source` holds the specifier exactly as
/// written; resolution happens later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleItem {
    /// Static import. No bindings means side-effect only.
    Import {
        source: String,
        bindings: Vec<ImportBinding>,
    },

    /// `import x = require('...')`
    ImportEquals { source: String },

    /// `import('...')` or `require('...')` with a literal specifier.
    Dynamic { source: String },

    /// `export { a, b as c } from '...'`
    ReExport {
        source: String,
        names: Vec<ReExportName>,
    },

    /// `export * from '...'`
    ReExportAll { source: String },

    /// `export * as ns from '...'`
    ReExportNamespace { source: String, name: SymbolName },

    /// Locally declared exports: declarations and source-less `export { .. }`.
    LocalExport { names: Vec<SymbolName> },

    /// `export default ...`; `None` when the exported value is anonymous.
    DefaultExport { name: Option<SymbolName> },

    /// TypeScript `export = ...`; `None` when the exported value is anonymous.
    ExportAssignment { name: Option<SymbolName> },

    /// `module.exports = ...`; `None` when the assigned value is anonymous.
    CommonJsExport { name: Option<SymbolName> },

    /// `exports.x = ...` or `module.exports.x = ...`
    CommonJsNamed { name: SymbolName },
}

impl ModuleItem {
    /// The specifier this item pulls from, if any.
    pub fn source(&self) -> Option<&str> {
        match self {
            ModuleItem::Import { source, .. }
            | ModuleItem::ImportEquals { source }
            | ModuleItem::Dynamic { source }
            | ModuleItem::ReExport { source, .. }
            | ModuleItem::ReExportAll { source }
            | ModuleItem::ReExportNamespace { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Whether lowering this item needs the source module's export surface.
    pub fn needs_surface(&self) -> bool {
        match self {
            ModuleItem::Import { bindings, .. } => bindings.contains(&ImportBinding::Namespace),
            ModuleItem::ImportEquals { .. }
            | ModuleItem::Dynamic { .. }
            | ModuleItem::ReExportAll { .. }
            | ModuleItem::ReExportNamespace { .. } => true,
            _ => false,
        }
    }
}

/// Everything one scan of a file found, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleScan {
    pub items: Vec<ModuleItem>,
}

impl ModuleScan {
    /// Distinct specifiers in first-seen order.
    pub fn specifiers(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for source in self.items.iter().filter_map(ModuleItem::source) {
            if !seen.contains(&source) {
                seen.push(source);
            }
        }
        seen
    }

    /// Specifiers whose targets must be analyzed before this file can be lowered.
    pub fn surface_specifiers(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for item in self.items.iter().filter(|item| item.needs_surface()) {
            if let Some(source) = item.source() {
                if !seen.contains(&source) {
                    seen.push(source);
                }
            }
        }
        seen
    }
}
