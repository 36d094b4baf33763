//! AST visitor that collects [`ModuleItem`]s.

use oxc_ast::ast::{
    Argument, AssignmentExpression, AssignmentTarget, BindingPattern, BindingPatternKind,
    CallExpression, Declaration, ExportAllDeclaration, ExportDefaultDeclaration,
    ExportDefaultDeclarationKind, ExportNamedDeclaration, Expression, ImportDeclaration,
    ImportDeclarationSpecifier, ImportExpression, ModuleExportName, StaticMemberExpression,
    TSExportAssignment, TSImportEqualsDeclaration, TSModuleDeclaration, TSModuleDeclarationName,
    TSModuleReference, TemplateLiteral,
};
use oxc_ast_visit::{Visit, walk};

use super::items::{ImportBinding, ModuleItem, ModuleScan, ReExportName};
use crate::record::{DEFAULT_EXPORT, SymbolName};

/// Walks a whole program once, recording every import and export form.
///
/// Declarations nested in a TypeScript `namespace` or `declare module` body
/// do not belong to the file's own surface and are skipped.
#[derive(Debug, Default)]
pub(super) struct ItemCollector {
    items: Vec<ModuleItem>,
    namespace_depth: usize,
}

impl ItemCollector {
    pub(super) fn into_scan(self) -> ModuleScan {
        ModuleScan { items: self.items }
    }

    fn at_module_scope(&self) -> bool {
        self.namespace_depth == 0
    }
}

impl<'a> Visit<'a> for ItemCollector {
    fn visit_ts_module_declaration(&mut self, it: &TSModuleDeclaration<'a>) {
        self.namespace_depth += 1;
        walk::walk_ts_module_declaration(self, it);
        self.namespace_depth -= 1;
    }

    fn visit_import_declaration(&mut self, it: &ImportDeclaration<'a>) {
        if self.at_module_scope() {
            let mut bindings = Vec::new();
            if let Some(specifiers) = &it.specifiers {
                for specifier in specifiers {
                    bindings.push(match specifier {
                        ImportDeclarationSpecifier::ImportDefaultSpecifier(_) => {
                            ImportBinding::Default
                        }
                        ImportDeclarationSpecifier::ImportNamespaceSpecifier(_) => {
                            ImportBinding::Namespace
                        }
                        ImportDeclarationSpecifier::ImportSpecifier(named) => {
                            ImportBinding::Named(export_name(&named.imported))
                        }
                    });
                }
            }

            self.items.push(ModuleItem::Import {
                source: it.source.value.to_string(),
                bindings,
            });
        }
        walk::walk_import_declaration(self, it);
    }

    fn visit_export_named_declaration(&mut self, it: &ExportNamedDeclaration<'a>) {
        if self.at_module_scope() {
            if let Some(source) = &it.source {
                let names = it
                    .specifiers
                    .iter()
                    .map(|specifier| ReExportName {
                        imported: export_name(&specifier.local),
                        exported: export_name(&specifier.exported),
                    })
                    .collect();
                self.items.push(ModuleItem::ReExport {
                    source: source.value.to_string(),
                    names,
                });
            } else {
                let mut names = Vec::new();
                if let Some(declaration) = &it.declaration {
                    declared_names(declaration, &mut names);
                }

                for specifier in &it.specifiers {
                    let exported = export_name(&specifier.exported);
                    if exported == DEFAULT_EXPORT {
                        // `export { x as default }`
                        self.items.push(ModuleItem::DefaultExport {
                            name: Some(export_name(&specifier.local)),
                        });
                    } else {
                        names.push(exported);
                    }
                }

                if !names.is_empty() {
                    self.items.push(ModuleItem::LocalExport { names });
                }
            }
        }
        walk::walk_export_named_declaration(self, it);
    }

    fn visit_export_all_declaration(&mut self, it: &ExportAllDeclaration<'a>) {
        if self.at_module_scope() {
            let source = it.source.value.to_string();
            self.items.push(match &it.exported {
                Some(exported) => ModuleItem::ReExportNamespace {
                    source,
                    name: export_name(exported),
                },
                None => ModuleItem::ReExportAll { source },
            });
        }
        walk::walk_export_all_declaration(self, it);
    }

    fn visit_export_default_declaration(&mut self, it: &ExportDefaultDeclaration<'a>) {
        if self.at_module_scope() {
            let name = match &it.declaration {
                ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
                    func.id.as_ref().map(|id| id.name.to_string())
                }
                ExportDefaultDeclarationKind::ClassDeclaration(class) => {
                    class.id.as_ref().map(|id| id.name.to_string())
                }
                ExportDefaultDeclarationKind::TSInterfaceDeclaration(interface) => {
                    Some(interface.id.name.to_string())
                }
                other => other.as_expression().and_then(expression_name),
            };
            self.items.push(ModuleItem::DefaultExport { name });
        }
        walk::walk_export_default_declaration(self, it);
    }

    fn visit_ts_export_assignment(&mut self, it: &TSExportAssignment<'a>) {
        if self.at_module_scope() {
            self.items.push(ModuleItem::ExportAssignment {
                name: expression_name(&it.expression),
            });
        }
        walk::walk_ts_export_assignment(self, it);
    }

    fn visit_ts_import_equals_declaration(&mut self, it: &TSImportEqualsDeclaration<'a>) {
        if let TSModuleReference::ExternalModuleReference(reference) = &it.module_reference {
            self.items.push(ModuleItem::ImportEquals {
                source: reference.expression.value.to_string(),
            });
        }
        walk::walk_ts_import_equals_declaration(self, it);
    }

    fn visit_import_expression(&mut self, it: &ImportExpression<'a>) {
        if let Some(source) = literal_specifier(&it.source) {
            self.items.push(ModuleItem::Dynamic { source });
        }
        walk::walk_import_expression(self, it);
    }

    fn visit_call_expression(&mut self, it: &CallExpression<'a>) {
        if let Some(source) = require_specifier(it) {
            self.items.push(ModuleItem::Dynamic { source });
        }
        walk::walk_call_expression(self, it);
    }

    fn visit_assignment_expression(&mut self, it: &AssignmentExpression<'a>) {
        if it.operator.as_str() == "=" {
            if let AssignmentTarget::StaticMemberExpression(member) = &it.left {
                match commonjs_target(member) {
                    Some(CommonJsTarget::Module) => {
                        self.items.push(ModuleItem::CommonJsExport {
                            name: expression_name(&it.right),
                        });
                    }
                    Some(CommonJsTarget::Named(name)) => {
                        self.items.push(ModuleItem::CommonJsNamed { name });
                    }
                    None => {}
                }
            }
        }
        walk::walk_assignment_expression(self, it);
    }
}

fn export_name(name: &ModuleExportName<'_>) -> SymbolName {
    match name {
        ModuleExportName::IdentifierName(ident) => ident.name.to_string(),
        ModuleExportName::IdentifierReference(ident) => ident.name.to_string(),
        ModuleExportName::StringLiteral(lit) => lit.value.to_string(),
    }
}

/// Names introduced by an exported declaration.
fn declared_names(declaration: &Declaration<'_>, names: &mut Vec<SymbolName>) {
    match declaration {
        Declaration::VariableDeclaration(var) => {
            for declarator in &var.declarations {
                binding_names(&declarator.id, names);
            }
        }
        Declaration::FunctionDeclaration(func) => {
            if let Some(id) = &func.id {
                names.push(id.name.to_string());
            }
        }
        Declaration::ClassDeclaration(class) => {
            if let Some(id) = &class.id {
                names.push(id.name.to_string());
            }
        }
        Declaration::TSTypeAliasDeclaration(alias) => names.push(alias.id.name.to_string()),
        Declaration::TSInterfaceDeclaration(interface) => {
            names.push(interface.id.name.to_string());
        }
        Declaration::TSEnumDeclaration(decl) => names.push(decl.id.name.to_string()),
        Declaration::TSModuleDeclaration(module) => {
            if let TSModuleDeclarationName::Identifier(id) = &module.id {
                names.push(id.name.to_string());
            }
        }
        Declaration::TSImportEqualsDeclaration(decl) => names.push(decl.id.name.to_string()),
        _ => {}
    }
}

/// Every leaf identifier of a (possibly destructured) binding.
fn binding_names(pattern: &BindingPattern<'_>, names: &mut Vec<SymbolName>) {
    match &pattern.kind {
        BindingPatternKind::BindingIdentifier(ident) => names.push(ident.name.to_string()),
        BindingPatternKind::ObjectPattern(object) => {
            for property in &object.properties {
                binding_names(&property.value, names);
            }
            if let Some(rest) = &object.rest {
                binding_names(&rest.argument, names);
            }
        }
        BindingPatternKind::ArrayPattern(array) => {
            for element in array.elements.iter().flatten() {
                binding_names(element, names);
            }
            if let Some(rest) = &array.rest {
                binding_names(&rest.argument, names);
            }
        }
        BindingPatternKind::AssignmentPattern(assignment) => {
            binding_names(&assignment.left, names);
        }
    }
}

/// The name a default-exported expression carries, if it has one.
fn expression_name(expression: &Expression<'_>) -> Option<SymbolName> {
    match expression {
        Expression::Identifier(ident) => Some(ident.name.to_string()),
        Expression::FunctionExpression(func) => func.id.as_ref().map(|id| id.name.to_string()),
        Expression::ClassExpression(class) => class.id.as_ref().map(|id| id.name.to_string()),
        Expression::ParenthesizedExpression(paren) => expression_name(&paren.expression),
        _ => None,
    }
}

/// A string or substitution-free template literal.
fn literal_specifier(expression: &Expression<'_>) -> Option<String> {
    match expression {
        Expression::StringLiteral(lit) => Some(lit.value.to_string()),
        Expression::TemplateLiteral(template) => template_specifier(template),
        Expression::ParenthesizedExpression(paren) => literal_specifier(&paren.expression),
        _ => None,
    }
}

fn template_specifier(template: &TemplateLiteral<'_>) -> Option<String> {
    if !template.expressions.is_empty() || template.quasis.len() != 1 {
        return None;
    }
    template
        .quasis
        .first()
        .and_then(|quasi| quasi.value.cooked.as_ref())
        .map(|cooked| cooked.to_string())
}

/// `require('x')` with exactly one literal argument.
fn require_specifier(call: &CallExpression<'_>) -> Option<String> {
    let Expression::Identifier(callee) = &call.callee else {
        return None;
    };
    if callee.name.as_str() != "require" || call.arguments.len() != 1 {
        return None;
    }
    call.arguments
        .first()
        .and_then(Argument::as_expression)
        .and_then(literal_specifier)
}

enum CommonJsTarget {
    /// `module.exports`
    Module,
    /// `exports.x` or `module.exports.x`
    Named(SymbolName),
}

fn commonjs_target(member: &StaticMemberExpression<'_>) -> Option<CommonJsTarget> {
    let property = member.property.name.as_str();
    match &member.object {
        Expression::Identifier(object) if object.name.as_str() == "module" => {
            (property == "exports").then_some(CommonJsTarget::Module)
        }
        Expression::Identifier(object) if object.name.as_str() == "exports" => {
            Some(CommonJsTarget::Named(property.to_string()))
        }
        Expression::StaticMemberExpression(inner) if is_module_exports(inner) => {
            Some(CommonJsTarget::Named(property.to_string()))
        }
        _ => None,
    }
}

fn is_module_exports(member: &StaticMemberExpression<'_>) -> bool {
    member.property.name.as_str() == "exports"
        && matches!(&member.object, Expression::Identifier(object) if object.name.as_str() == "module")
}
