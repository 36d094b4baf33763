//! Dependency graph construction.
//!
//! The builder walks the import ledger depth-first from each entry file,
//! extracting every file it reaches exactly once for its whole lifetime.
//! Files already in the graph are not re-read; the walk continues through
//! their recorded edges instead.

mod entries;

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use crate::extract::{ExtractError, Extractor, Resolutions, scan_module};
use crate::file_id::FileId;
use crate::graph::DependencyGraph;
use crate::record::ModuleRecord;
use crate::resolver::{ModuleResolver, Resolved, identity, resolve_candidate};
use crate::runtime::Runtime;

/// A file that could not be analyzed during a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildFailure {
    pub file: PathBuf,
    pub reason: String,
}

/// Summary of one [`GraphBuilder::build_from`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Files extracted during this call.
    pub analyzed: usize,
    /// Files reached that were already in the graph.
    pub reused: usize,
    /// Files skipped because they could not be read or parsed.
    pub failures: Vec<BuildFailure>,
}

impl BuildReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// State of one traversal; discarded when the call returns.
#[derive(Debug, Default)]
struct Walk {
    visited: FxHashSet<FileId>,
    report: BuildReport,
}

type VisitFuture<'a> = Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

/// Owns the resolver and the append-only graph.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    resolver: ModuleResolver,
    graph: DependencyGraph,
    unanalyzable: FxHashSet<FileId>,
}

impl GraphBuilder {
    pub fn new(resolver: ModuleResolver) -> Self {
        Self {
            resolver,
            graph: DependencyGraph::new(),
            unanalyzable: FxHashSet::default(),
        }
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn resolver(&self) -> &ModuleResolver {
        &self.resolver
    }

    /// Whether `file` was reached before and could not be analyzed.
    pub fn is_unanalyzable(&self, file: &FileId) -> bool {
        self.unanalyzable.contains(file)
    }

    /// Analyze everything reachable from `roots`.
    ///
    /// Roots must be absolute. Failures are reported, never fatal.
    pub async fn build_from(&mut self, roots: &[PathBuf], runtime: &dyn Runtime) -> BuildReport {
        let mut walk = Walk::default();

        for root in roots {
            for entry in entries::entry_files(root, runtime).await {
                match identity(&entry, runtime).await {
                    Some(file) => self.visit(file, &mut walk, runtime).await,
                    None => walk.report.failures.push(BuildFailure {
                        file: entry,
                        reason: "path is not valid UTF-8".to_string(),
                    }),
                }
            }
        }

        debug!(
            analyzed = walk.report.analyzed,
            reused = walk.report.reused,
            failed = walk.report.failures.len(),
            total = self.graph.len(),
            "build finished"
        );
        walk.report
    }

    /// Make sure `path` is in the graph, analyzing it and everything it
    /// reaches if needed.
    ///
    /// `path` must be absolute; it may omit its extension or name a
    /// directory with an index file. Returns the file's identity, or `None`
    /// if it does not exist or cannot be analyzed.
    pub async fn ensure_analyzed(&mut self, path: &Path, runtime: &dyn Runtime) -> Option<FileId> {
        let found = resolve_candidate(path, runtime).await?;
        let file = identity(&found, runtime).await?;

        if self.graph.contains(&file) {
            return Some(file);
        }
        if self.unanalyzable.contains(&file) {
            return None;
        }

        let mut walk = Walk::default();
        self.visit(file.clone(), &mut walk, runtime).await;
        self.graph.contains(&file).then_some(file)
    }

    fn visit<'a>(
        &'a mut self,
        file: FileId,
        walk: &'a mut Walk,
        runtime: &'a dyn Runtime,
    ) -> VisitFuture<'a> {
        Box::pin(async move {
            if !walk.visited.insert(file.clone()) {
                return;
            }

            if let Some(record) = self.graph.get(&file) {
                walk.report.reused += 1;
                let targets: Vec<FileId> = record.imports.keys().cloned().collect();
                for target in targets {
                    self.visit(target, walk, runtime).await;
                }
                return;
            }

            if self.unanalyzable.contains(&file) {
                return;
            }

            match self.analyze(&file, walk, runtime).await {
                Ok(record) => {
                    let targets: Vec<FileId> = record.imports.keys().cloned().collect();
                    debug!(file = %file, imports = targets.len(), "analyzed module");
                    self.graph.insert(file, record);
                    walk.report.analyzed += 1;

                    for target in targets {
                        self.visit(target, walk, runtime).await;
                    }
                }
                Err(err) => {
                    warn!(file = %file, error = %err, "skipping unanalyzable file");
                    walk.report.failures.push(BuildFailure {
                        file: file.clone().into_path_buf(),
                        reason: err.to_string(),
                    });
                    self.unanalyzable.insert(file);
                }
            }
        })
    }

    /// Read, scan and lower one file.
    ///
    /// Targets whose export surface the file needs are visited first, unless
    /// they are already on this walk (a cycle).
    async fn analyze(
        &mut self,
        file: &FileId,
        walk: &mut Walk,
        runtime: &dyn Runtime,
    ) -> Result<ModuleRecord, ExtractError> {
        let path = file.as_path();

        match file.extension().as_deref() {
            Some("json") => return Ok(ModuleRecord::json()),
            _ if !entries::is_parseable(path) => {
                return Err(ExtractError::Unsupported {
                    path: path.to_path_buf(),
                });
            }
            _ => {}
        }

        let bytes = runtime
            .read_file(path)
            .await
            .map_err(|source| ExtractError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let source = String::from_utf8(bytes).map_err(|_| ExtractError::InvalidUtf8 {
            path: path.to_path_buf(),
        })?;

        let scan = scan_module(path, &source)?;

        let mut resolutions = Resolutions::default();
        for specifier in scan.specifiers() {
            let resolved = self.resolver.resolve(specifier, path, runtime).await;
            resolutions.insert(specifier.to_string(), resolved);
        }

        for specifier in scan.surface_specifiers() {
            if let Some(Resolved::Module(target)) = resolutions.get(specifier) {
                if !self.graph.contains(target) && !walk.visited.contains(target) {
                    self.visit(target.clone(), walk, runtime).await;
                }
            }
        }

        Ok(Extractor::new(&self.graph).extract(&scan, &resolutions))
    }
}
