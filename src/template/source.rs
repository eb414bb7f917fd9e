//! Template storage
//!
//! Templates and base templates are addressed by name and read fresh on every
//! request.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use crate::error::CompileError;

/// Where template text comes from
pub trait TemplateSource {
    /// Read the full text of the named template
    fn read(&self, name: &str) -> Result<String, CompileError>;
}

/// Templates stored on the filesystem
#[derive(Debug, Clone, Default)]
pub struct FsSource {
    /// Base path for resolving relative template names
    base_path: Option<PathBuf>,
}

impl FsSource {
    /// Resolve template names relative to the working directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve template names relative to `base_path`
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: Some(base_path.into()),
        }
    }

    /// Resolve a template name to a filesystem path
    pub fn resolve_path(&self, name: &str) -> PathBuf {
        match &self.base_path {
            Some(base) => base.join(name),
            None => PathBuf::from(name),
        }
    }
}

impl TemplateSource for FsSource {
    fn read(&self, name: &str) -> Result<String, CompileError> {
        let path = self.resolve_path(name);
        std::fs::read_to_string(&path).map_err(|e| CompileError::read(path, e))
    }
}

/// Templates held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    templates: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a template
    pub fn with_template(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(name, text);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.templates.insert(name.into(), text.into());
    }
}

impl TemplateSource for MemorySource {
    fn read(&self, name: &str) -> Result<String, CompileError> {
        self.templates.get(name).cloned().ok_or_else(|| {
            CompileError::read(
                name,
                io::Error::new(io::ErrorKind::NotFound, "no such template"),
            )
        })
    }
}
