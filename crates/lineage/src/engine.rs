//! The query engine: one owned graph, built on demand.

use std::collections::BTreeSet;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::builder::{BuildReport, GraphBuilder};
use crate::config::{AliasTable, EngineConfig};
use crate::file_id::FileId;
use crate::graph::DependencyGraph;
use crate::query::{QueryOutcome, dependency_closure};
use crate::record::ModuleRecord;
use crate::resolver::ModuleResolver;
use crate::runtime::{Runtime, RuntimeError};
use crate::tracer;

/// Errors raised while constructing an [`Engine`].
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The runtime could not answer a required question (e.g. the cwd).
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Typestate marker for a builder without a project root.
#[derive(Debug, Clone, Copy)]
pub struct Unconfigured;

/// Typestate marker for a builder with a project root.
#[derive(Debug, Clone, Copy)]
pub struct Configured;

/// Builder for [`Engine`].
///
/// `build()` is only available once a root has been set.
///
/// ```rust,no_run
/// use lineage::Engine;
///
/// # async fn example() -> lineage::Result<()> {
/// let mut engine = Engine::builder()
///     .root("/path/to/project")
///     .path_alias("@", "src")
///     .roots(["src"])
///     .build()?;
///
/// engine.build().await;
/// let deps = engine.query("src/index.ts").await.dependencies();
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct EngineBuilder<State = Unconfigured> {
    config: EngineConfig,
    runtime: Option<Arc<dyn Runtime>>,
    _state: PhantomData<State>,
}

impl EngineBuilder<Unconfigured> {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            runtime: None,
            _state: PhantomData,
        }
    }
}

impl Default for EngineBuilder<Unconfigured> {
    fn default() -> Self {
        Self::new()
    }
}

impl<State> EngineBuilder<State> {
    /// Set the project root. Relative roots are taken from the runtime's cwd.
    pub fn root(mut self, root: impl Into<PathBuf>) -> EngineBuilder<Configured> {
        self.config.root = root.into();
        EngineBuilder {
            config: self.config,
            runtime: self.runtime,
            _state: PhantomData,
        }
    }

    /// Map a specifier prefix to a directory relative to the root.
    pub fn path_alias(mut self, prefix: impl Into<String>, dir: impl Into<String>) -> Self {
        self.config.path_aliases.push((prefix.into(), dir.into()));
        self
    }

    /// Add directories or files to seed [`Engine::build`].
    pub fn roots(mut self, roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.config
            .roots
            .extend(roots.into_iter().map(Into::into));
        self
    }

    /// Use a specific filesystem runtime.
    pub fn runtime(mut self, runtime: Arc<dyn Runtime>) -> Self {
        self.runtime = Some(runtime);
        self
    }
}

impl EngineBuilder<Configured> {
    pub fn build(self) -> Result<Engine, EngineError> {
        let runtime = match self.runtime {
            Some(runtime) => runtime,
            None => default_runtime()?,
        };
        Engine::with_runtime(self.config, runtime)
    }
}

#[cfg(not(target_family = "wasm"))]
fn default_runtime() -> Result<Arc<dyn Runtime>, EngineError> {
    Ok(Arc::new(crate::runtime::native::NativeRuntime::new()))
}

#[cfg(target_family = "wasm")]
fn default_runtime() -> Result<Arc<dyn Runtime>, EngineError> {
    Err(EngineError::InvalidConfig(
        "a runtime is required on this platform".to_string(),
    ))
}

/// Owns one dependency graph and answers queries against it.
///
/// Each file is read and extracted at most once for the engine's lifetime;
/// later changes on disk are not observed. Drop the engine and build a new
/// one to start over.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    runtime: Arc<dyn Runtime>,
    builder: GraphBuilder,
}

impl Engine {
    pub fn builder() -> EngineBuilder<Unconfigured> {
        EngineBuilder::new()
    }

    /// Create an engine on the native filesystem.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Self::with_runtime(config, default_runtime()?)
    }

    /// Create an engine on the given runtime.
    ///
    /// The root is made absolute and canonicalized; alias targets are
    /// resolved against it once, here.
    pub fn with_runtime(
        mut config: EngineConfig,
        runtime: Arc<dyn Runtime>,
    ) -> Result<Self, EngineError> {
        if config.root.as_os_str().is_empty() {
            return Err(EngineError::InvalidConfig(
                "project root must not be empty".to_string(),
            ));
        }

        if !config.root.is_absolute() {
            config.root = runtime.get_cwd()?.join(&config.root);
        }
        if !runtime.exists(&config.root) {
            return Err(EngineError::InvalidConfig(format!(
                "project root does not exist: {}",
                config.root.display()
            )));
        }
        if let Ok(canonical) = runtime.canonicalize(&config.root) {
            config.root = canonical;
        }

        if let Some((_, dir)) = config.path_aliases.iter().find(|(prefix, _)| prefix.is_empty()) {
            return Err(EngineError::InvalidConfig(format!(
                "alias prefix must not be empty (target {dir:?})"
            )));
        }

        let aliases = AliasTable::new(
            &config.root,
            config
                .path_aliases
                .iter()
                .map(|(prefix, dir)| (prefix.as_str(), dir.as_str())),
        );

        debug!(root = %config.root.display(), aliases = config.path_aliases.len(), "engine created");

        Ok(Self {
            builder: GraphBuilder::new(ModuleResolver::new(aliases)),
            config,
            runtime,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn graph(&self) -> &DependencyGraph {
        self.builder.graph()
    }

    /// The record of an analyzed file.
    pub fn record(&self, file: &FileId) -> Option<&ModuleRecord> {
        self.builder.graph().get(file)
    }

    /// Build from the configured roots, or the project root when none are set.
    pub async fn build(&mut self) -> BuildReport {
        let roots = if self.config.roots.is_empty() {
            vec![self.config.root.clone()]
        } else {
            self.config.roots.clone()
        };
        self.build_from(&roots).await
    }

    /// Analyze everything reachable from `roots` (relative to the project root).
    pub async fn build_from<P: AsRef<Path>>(&mut self, roots: &[P]) -> BuildReport {
        let roots: Vec<PathBuf> = roots
            .iter()
            .map(|root| self.config.absolutize(root.as_ref()))
            .collect();
        self.builder.build_from(&roots, self.runtime.as_ref()).await
    }

    /// Analyze `file` if it is not in the graph yet.
    ///
    /// Returns the file's identity, or `None` if it cannot be found or
    /// analyzed.
    pub async fn ensure_analyzed(&mut self, file: impl AsRef<Path>) -> Option<FileId> {
        let path = self.config.absolutize(file.as_ref());
        self.builder
            .ensure_analyzed(&path, self.runtime.as_ref())
            .await
    }

    /// The symbol-level dependency closure of `file`.
    pub async fn query(&mut self, file: impl AsRef<Path>) -> QueryOutcome {
        let path = self.config.absolutize(file.as_ref());
        match self.builder.ensure_analyzed(&path, self.runtime.as_ref()).await {
            Some(id) => {
                let deps = dependency_closure(self.builder.graph(), &id);
                debug!(file = %id, count = deps.len(), "query finished");
                QueryOutcome::Found(deps)
            }
            None => {
                debug!(file = %path.display(), "query target not found");
                QueryOutcome::NotFound(path)
            }
        }
    }

    /// Files that declare `symbol` as exported by an analyzed `file`.
    pub fn trace_origins(&self, file: &FileId, symbol: &str) -> BTreeSet<FileId> {
        tracer::trace_origins(self.builder.graph(), file, symbol)
    }

    /// Analyze `file` if needed, then trace `symbol` from it.
    pub async fn trace(&mut self, file: impl AsRef<Path>, symbol: &str) -> Option<BTreeSet<FileId>> {
        let id = self.ensure_analyzed(file).await?;
        Some(self.trace_origins(&id, symbol))
    }
}
