//! Declaration extraction: raw scans, and records lowered through a real build.

use std::collections::BTreeSet;
use std::path::Path;

use super::test_helpers::*;
use crate::extract::{ExtractError, ImportBinding, ModuleItem, ReExportName, scan_module};
use crate::record::{DEFAULT_EXPORT, EXPORT_EQUALS, ModuleRecord, NAMESPACE};
use tempfile::TempDir;

fn scan(name: &str, source: &str) -> Vec<ModuleItem> {
    scan_module(Path::new(name), source)
        .expect("source parses")
        .items
}

fn names(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Build `files` and return the record of `target`.
async fn record_of(files: &[(&str, &str)], target: &str) -> ModuleRecord {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(&temp, files);
    let mut engine = engine(&root, &[("@", "src")]);
    let id = engine
        .ensure_analyzed(target)
        .await
        .expect("target analyzes");
    engine.record(&id).cloned().expect("record present")
}

#[test]
fn test_scan_import_forms() {
    let items = scan(
        "a.ts",
        r#"
        import def, { a, b as local } from './x';
        import * as ns from './y';
        import './side-effect';
        import type { T } from './types';
        "#,
    );

    assert_eq!(
        items,
        vec![
            ModuleItem::Import {
                source: "./x".into(),
                bindings: vec![
                    ImportBinding::Default,
                    ImportBinding::Named("a".into()),
                    ImportBinding::Named("b".into()),
                ],
            },
            ModuleItem::Import {
                source: "./y".into(),
                bindings: vec![ImportBinding::Namespace],
            },
            ModuleItem::Import {
                source: "./side-effect".into(),
                bindings: vec![],
            },
            ModuleItem::Import {
                source: "./types".into(),
                bindings: vec![ImportBinding::Named("T".into())],
            },
        ]
    );
}

#[test]
fn test_scan_reexport_forms() {
    let items = scan(
        "a.ts",
        r#"
        export { a, b as c } from './x';
        export * from './y';
        export * as ns from './z';
        "#,
    );

    assert_eq!(
        items,
        vec![
            ModuleItem::ReExport {
                source: "./x".into(),
                names: vec![
                    ReExportName {
                        imported: "a".into(),
                        exported: "a".into(),
                    },
                    ReExportName {
                        imported: "b".into(),
                        exported: "c".into(),
                    },
                ],
            },
            ModuleItem::ReExportAll {
                source: "./y".into(),
            },
            ModuleItem::ReExportNamespace {
                source: "./z".into(),
                name: "ns".into(),
            },
        ]
    );
}

#[test]
fn test_scan_dynamic_and_require() {
    let items = scan(
        "a.js",
        r#"
        const lazy = () => import('./lazy');
        const tpl = import(`./template`);
        const skipped = import(`./${name}`);
        const cjs = require('./cjs');
        const notRequire = load('./other');
        "#,
    );

    assert_eq!(
        items,
        vec![
            ModuleItem::Dynamic {
                source: "./lazy".into()
            },
            ModuleItem::Dynamic {
                source: "./template".into()
            },
            ModuleItem::Dynamic {
                source: "./cjs".into()
            },
        ]
    );
}

#[test]
fn test_scan_default_forms() {
    assert_eq!(
        scan("a.ts", "export default function Widget() {}"),
        vec![ModuleItem::DefaultExport {
            name: Some("Widget".into())
        }]
    );
    assert_eq!(
        scan("a.ts", "export default class {}"),
        vec![ModuleItem::DefaultExport { name: None }]
    );
    assert_eq!(
        scan("a.ts", "const x = 1; export default x;"),
        vec![ModuleItem::DefaultExport {
            name: Some("x".into())
        }]
    );
    assert_eq!(
        scan("a.ts", "export default 42;"),
        vec![ModuleItem::DefaultExport { name: None }]
    );
    assert_eq!(
        scan("a.ts", "export default interface Props { a: string }"),
        vec![ModuleItem::DefaultExport {
            name: Some("Props".into())
        }]
    );
}

#[test]
fn test_scan_export_assignment_forms() {
    assert_eq!(
        scan("a.ts", "const api = {}; export = api;"),
        vec![ModuleItem::ExportAssignment {
            name: Some("api".into())
        }]
    );
    assert_eq!(
        scan("a.ts", "export = { a: 1 };"),
        vec![ModuleItem::ExportAssignment { name: None }]
    );
}

#[test]
fn test_scan_commonjs_forms() {
    let items = scan(
        "a.cjs",
        r#"
        module.exports = function build() {};
        exports.helper = 1;
        module.exports.other = 2;
        something.exports = 3;
        "#,
    );

    assert_eq!(
        items,
        vec![
            ModuleItem::CommonJsExport {
                name: Some("build".into())
            },
            ModuleItem::CommonJsNamed {
                name: "helper".into()
            },
            ModuleItem::CommonJsNamed {
                name: "other".into()
            },
        ]
    );
}

#[test]
fn test_scan_namespace_exports_are_not_file_exports() {
    let items = scan(
        "a.ts",
        r#"
        export namespace Outer {
            export const inner = 1;
        }
        "#,
    );

    assert_eq!(
        items,
        vec![ModuleItem::LocalExport {
            names: vec!["Outer".into()]
        }]
    );
}

#[test]
fn test_scan_import_equals() {
    let items = scan(
        "a.ts",
        r#"
        import fs = require('./fs-shim');
        export import path = require('./path-shim');
        "#,
    );

    assert_eq!(
        items,
        vec![
            ModuleItem::ImportEquals {
                source: "./fs-shim".into()
            },
            ModuleItem::LocalExport {
                names: vec!["path".into()]
            },
            ModuleItem::ImportEquals {
                source: "./path-shim".into()
            },
        ]
    );
}

#[test]
fn test_scan_rejects_syntax_errors() {
    let err = scan_module(Path::new("broken.ts"), "export const = ;").unwrap_err();
    assert!(matches!(err, ExtractError::Parse { .. }));
}

#[tokio::test]
async fn test_named_import_records_original_name() {
    let record = record_of(
        &[
            ("src/a.ts", "import { helper as h } from './b';\nh();\n"),
            ("src/b.ts", "export const helper = 1;\n"),
        ],
        "src/a.ts",
    )
    .await;

    let (_, symbols) = record.imports.iter().next().expect("one edge");
    assert_eq!(symbols, &names(&["helper"]));
}

#[tokio::test]
async fn test_default_and_side_effect_imports() {
    let record = record_of(
        &[
            ("src/a.ts", "import B from './b';\nimport './c';\n"),
            ("src/b.ts", "export default function B() {}\n"),
            ("src/c.ts", "console.log('loaded');\n"),
        ],
        "src/a.ts",
    )
    .await;

    let edges: Vec<_> = record.imports.values().cloned().collect();
    assert!(edges.contains(&names(&[DEFAULT_EXPORT])));
    assert!(edges.contains(&BTreeSet::new()));
}

#[tokio::test]
async fn test_namespace_import_pulls_export_surface() {
    let record = record_of(
        &[
            ("src/a.ts", "import * as util from './util';\n"),
            (
                "src/util.ts",
                "export const x = 1;\nexport function y() {}\nexport default 3;\n",
            ),
        ],
        "src/a.ts",
    )
    .await;

    let (_, symbols) = record.imports.iter().next().expect("one edge");
    assert_eq!(symbols, &names(&[NAMESPACE, "x", "y", DEFAULT_EXPORT]));
}

#[tokio::test]
async fn test_dynamic_import_and_require_pull_export_surface() {
    let record = record_of(
        &[
            (
                "src/a.js",
                "const m = import('./m');\nconst r = require('./r');\n",
            ),
            ("src/m.ts", "export const lazy = 1;\n"),
            ("src/r.js", "exports.helper = 1;\n"),
        ],
        "src/a.js",
    )
    .await;

    let edges: BTreeSet<BTreeSet<String>> = record.imports.values().cloned().collect();
    assert!(edges.contains(&names(&[NAMESPACE, "lazy"])));
    assert!(edges.contains(&names(&[NAMESPACE, "helper"])));
}

#[tokio::test]
async fn test_reexport_attributes_original_names() {
    let record = record_of(
        &[
            ("src/barrel.ts", "export { a, b as c } from './impl';\n"),
            ("src/impl.ts", "export const a = 1;\nexport const b = 2;\n"),
        ],
        "src/barrel.ts",
    )
    .await;

    let (_, symbols) = record.imports.iter().next().expect("one edge");
    assert_eq!(symbols, &names(&["a", "b"]));
    assert_eq!(record.common_exports, names(&["a", "c"]));
}

#[tokio::test]
async fn test_export_star_forwards_named_exports_only() {
    let record = record_of(
        &[
            ("src/barrel.ts", "export * from './impl';\n"),
            (
                "src/impl.ts",
                "export const a = 1;\nexport type T = string;\nexport default 0;\n",
            ),
        ],
        "src/barrel.ts",
    )
    .await;

    let (_, symbols) = record.imports.iter().next().expect("one edge");
    assert_eq!(symbols, &names(&["a", "T"]));
    assert_eq!(record.common_exports, names(&["a", "T"]));
    assert_eq!(record.default_export, None);
}

#[tokio::test]
async fn test_namespace_reexport() {
    let record = record_of(
        &[
            ("src/barrel.ts", "export * as tools from './tools';\n"),
            ("src/tools.ts", "export const hammer = 1;\n"),
        ],
        "src/barrel.ts",
    )
    .await;

    let (_, symbols) = record.imports.iter().next().expect("one edge");
    assert_eq!(symbols, &names(&[NAMESPACE, "hammer"]));
    assert_eq!(record.common_exports, names(&["tools"]));
}

#[tokio::test]
async fn test_declaration_exports_with_destructuring() {
    let record = record_of(
        &[(
            "src/a.ts",
            r#"
            export const { a, b: renamed, nested: { deep }, ...rest } = source;
            export const [first, , third = 3, ...others] = list;
            export function fn() {}
            export class Cls {}
            export interface Iface {}
            export type Alias = string;
            export enum Color { Red }
            export namespace Space {}
            export let x, y;
            "#,
        )],
        "src/a.ts",
    )
    .await;

    assert_eq!(
        record.common_exports,
        names(&[
            "a", "renamed", "deep", "rest", "first", "third", "others", "fn", "Cls", "Iface",
            "Alias", "Color", "Space", "x", "y",
        ])
    );
    assert!(!record.common_exports.contains(DEFAULT_EXPORT));
}

#[tokio::test]
async fn test_local_export_list_and_default_alias() {
    let record = record_of(
        &[(
            "src/a.ts",
            "const a = 1;\nconst b = 2;\nexport { a, b as default };\n",
        )],
        "src/a.ts",
    )
    .await;

    assert_eq!(record.common_exports, names(&["a"]));
    assert_eq!(record.default_export.as_deref(), Some("b"));
}

#[tokio::test]
async fn test_default_export_names() {
    let named = record_of(
        &[("src/a.ts", "export default class Widget {}\n")],
        "src/a.ts",
    )
    .await;
    assert_eq!(named.default_export.as_deref(), Some("Widget"));

    let anonymous = record_of(&[("src/a.ts", "export default () => 1;\n")], "src/a.ts").await;
    assert_eq!(anonymous.default_export.as_deref(), Some(DEFAULT_EXPORT));
}

#[tokio::test]
async fn test_export_assignment_default_names() {
    let named = record_of(
        &[("src/a.ts", "function api() {}\nexport = api;\n")],
        "src/a.ts",
    )
    .await;
    assert_eq!(named.default_export.as_deref(), Some("api"));

    let anonymous = record_of(&[("src/a.ts", "export = { a: 1 };\n")], "src/a.ts").await;
    assert_eq!(anonymous.default_export.as_deref(), Some(EXPORT_EQUALS));
}

#[tokio::test]
async fn test_commonjs_exports() {
    let record = record_of(
        &[(
            "src/a.cjs",
            "module.exports = {};\nexports.one = 1;\nmodule.exports.two = 2;\n",
        )],
        "src/a.cjs",
    )
    .await;

    assert_eq!(record.default_export.as_deref(), Some(DEFAULT_EXPORT));
    assert_eq!(record.common_exports, names(&["one", "two"]));
}

#[tokio::test]
async fn test_style_imports_carry_no_symbols() {
    let record = record_of(
        &[
            (
                "src/a.ts",
                "import './a.css';\nimport styles from './a.module.scss';\nimport '@/theme.less';\n",
            ),
            ("src/a.css", ""),
            ("src/theme.less", ""),
        ],
        "src/a.ts",
    )
    .await;

    assert!(record.imports.is_empty());
    assert_eq!(record.style_imports.len(), 3);
    assert!(
        record
            .style_imports
            .iter()
            .any(|style| style.as_str().ends_with("a.module.scss"))
    );
}

#[tokio::test]
async fn test_external_and_unresolved_never_enter_imports() {
    let record = record_of(
        &[(
            "src/a.ts",
            "import React from 'react';\nimport { x } from './missing';\nexport { y } from 'lib';\n",
        )],
        "src/a.ts",
    )
    .await;

    assert!(record.imports.is_empty());
    assert_eq!(record.common_exports, names(&["y"]));
}

#[tokio::test]
async fn test_json_module_is_a_default_leaf() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[
            ("src/a.ts", "import data from './data.json';\n"),
            ("src/data.json", "{\"k\": 1}"),
        ],
    );
    let mut engine = engine(&root, &[]);
    engine.ensure_analyzed("src/a.ts").await.unwrap();

    let json = engine
        .record(&file(&root, "src/data.json"))
        .expect("json recorded");
    assert_eq!(json, &ModuleRecord::json());
}
