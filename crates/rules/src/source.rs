// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rule sources: where handlers are discovered from
//!
//! A source scans every module it knows about, loading each in isolation.
//! A module that fails to load is recorded and skipped; only an empty
//! overall result is an error.

use crate::handler::Handler;
use crate::parser::{parse_module, ParseError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Entry point collected when none is configured
pub const DEFAULT_ENTRY_POINT: &str = "on_event";

/// Handlers keyed by `module:handler`
pub type HandlerMap = BTreeMap<String, Arc<dyn Handler>>;

/// Load failures keyed by module identifier
pub type LoadErrors = BTreeMap<String, ModuleError>;

/// Why a single module could not be loaded
#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("{0}")]
    Init(String),
    #[error("handler {key} is already defined by another module")]
    Duplicate { key: String },
}

/// Errors that make a rule source unusable as a whole
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("rules path {} is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("IO error scanning {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no handlers found in {origin} ({} module(s) failed to load)", .errors.len())]
    NoHandlersFound { origin: String, errors: LoadErrors },
}

/// Result of scanning a rule source
#[derive(Debug, Default)]
pub struct LoadedRules {
    pub handlers: HandlerMap,
    pub errors: LoadErrors,
}

/// Somewhere handlers can be loaded from
pub trait RuleSource {
    /// Human-readable origin, used in logs and errors
    fn describe(&self) -> String;

    fn load(&self) -> Result<LoadedRules, SourceError>;
}

fn default_entry_points() -> Vec<String> {
    vec![DEFAULT_ENTRY_POINT.to_string()]
}

/// Accumulates handlers and load errors across modules
struct Collector<'a> {
    entry_points: &'a [String],
    loaded: LoadedRules,
}

impl<'a> Collector<'a> {
    fn new(entry_points: &'a [String]) -> Self {
        Self {
            entry_points,
            loaded: LoadedRules::default(),
        }
    }

    /// Add a module's entry-point handlers. A module whose qualified names
    /// clash with already loaded handlers is rejected as a whole.
    fn add_handlers(&mut self, module: &str, handlers: Vec<Arc<dyn Handler>>) {
        let mut collected = Vec::new();
        for handler in handlers {
            if !self.entry_points.iter().any(|e| e == handler.name()) {
                tracing::debug!(
                    module,
                    handler = handler.name(),
                    "skipping non entry-point handler"
                );
                continue;
            }
            let qualified = format!("{}:{}", module, handler.name());
            if self.loaded.handlers.contains_key(&qualified) {
                self.add_error(module, ModuleError::Duplicate { key: qualified });
                return;
            }
            collected.push((qualified, handler));
        }

        for (qualified, handler) in collected {
            tracing::info!(handler = %qualified, filter = %handler.filter(), "loaded handler");
            self.loaded.handlers.insert(qualified, handler);
        }
    }

    fn add_error(&mut self, module: &str, error: ModuleError) {
        tracing::error!(module, error = %error, "can't load rule module");
        self.loaded.errors.insert(module.to_string(), error);
    }

    fn finish(self, origin: String) -> Result<LoadedRules, SourceError> {
        if self.loaded.handlers.is_empty() {
            return Err(SourceError::NoHandlersFound {
                origin,
                errors: self.loaded.errors,
            });
        }
        Ok(self.loaded)
    }
}

// ============================================================================
// Directory source
// ============================================================================

/// Loads `*.toml` rule modules from a rules repository directory
#[derive(Debug, Clone)]
pub struct DirectoryRuleSource {
    root: PathBuf,
    recursive: bool,
    entry_points: Vec<String>,
}

impl DirectoryRuleSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            recursive: true,
            entry_points: default_entry_points(),
        }
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_entry_points(mut self, entry_points: Vec<String>) -> Self {
        if !entry_points.is_empty() {
            self.entry_points = entry_points;
        }
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Module files in sorted order, skipping hidden entries like `.git`
    fn module_files(&self) -> Result<Vec<PathBuf>, SourceError> {
        let mut files = Vec::new();
        let mut pending = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            let entries = std::fs::read_dir(&dir).map_err(|source| SourceError::Io {
                path: dir.clone(),
                source,
            })?;
            for entry in entries.flatten() {
                let path = entry.path();
                let hidden = entry.file_name().to_string_lossy().starts_with('.');
                if hidden {
                    continue;
                }
                let Ok(file_type) = entry.file_type() else {
                    continue;
                };
                // Symlinked directories are not followed
                if file_type.is_dir() {
                    if self.recursive {
                        pending.push(path);
                    }
                } else if file_type.is_symlink() && path.is_dir() {
                    tracing::debug!(path = %path.display(), "skipping symlinked directory");
                } else if path.extension().is_some_and(|e| e == "toml") {
                    files.push(path);
                }
            }
        }

        files.sort();
        Ok(files)
    }

    /// `checks/disk.toml` under the root becomes `checks.disk`
    fn module_id(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative
            .with_extension("")
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(".")
    }
}

fn load_module_file(path: &Path) -> Result<Vec<Arc<dyn Handler>>, ModuleError> {
    let content = std::fs::read_to_string(path).map_err(|source| ModuleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let module = parse_module(&content)?;
    Ok(module
        .handlers
        .into_iter()
        .map(|h| Arc::new(h) as Arc<dyn Handler>)
        .collect())
}

impl RuleSource for DirectoryRuleSource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    fn load(&self) -> Result<LoadedRules, SourceError> {
        if !self.root.is_dir() {
            return Err(SourceError::NotADirectory(self.root.clone()));
        }

        let mut collector = Collector::new(&self.entry_points);
        for path in self.module_files()? {
            let module = self.module_id(&path);
            match load_module_file(&path) {
                Ok(handlers) => collector.add_handlers(&module, handlers),
                Err(e) => collector.add_error(&module, e),
            }
        }
        collector.finish(self.describe())
    }
}

// ============================================================================
// Registry source
// ============================================================================

type ModuleLoader = Box<dyn Fn() -> Result<Vec<Arc<dyn Handler>>, ModuleError> + Send + Sync>;

/// Rule modules compiled into the process, registered by name
pub struct RegistryRuleSource {
    name: String,
    modules: Vec<(String, ModuleLoader)>,
    entry_points: Vec<String>,
}

impl RegistryRuleSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modules: Vec::new(),
            entry_points: default_entry_points(),
        }
    }

    /// Register a module; its loader runs on every [`RuleSource::load`]
    pub fn register<F>(mut self, module: impl Into<String>, loader: F) -> Self
    where
        F: Fn() -> Result<Vec<Arc<dyn Handler>>, ModuleError> + Send + Sync + 'static,
    {
        self.modules.push((module.into(), Box::new(loader)));
        self
    }

    pub fn with_entry_points(mut self, entry_points: Vec<String>) -> Self {
        if !entry_points.is_empty() {
            self.entry_points = entry_points;
        }
        self
    }
}

impl RuleSource for RegistryRuleSource {
    fn describe(&self) -> String {
        format!("registry '{}'", self.name)
    }

    fn load(&self) -> Result<LoadedRules, SourceError> {
        let mut collector = Collector::new(&self.entry_points);
        for (module, loader) in &self.modules {
            match loader() {
                Ok(handlers) => collector.add_handlers(module, handlers),
                Err(e) => collector.add_error(module, e),
            }
        }
        collector.finish(self.describe())
    }
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
