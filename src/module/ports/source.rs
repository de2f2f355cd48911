//! Module source port.
//!
//! A module source turns a configured location into module entries.

use crate::module::domain::{ModuleEntry, ModuleParseError};
use camino::{Utf8Path, Utf8PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Result type for module source operations.
pub type ModuleSourceResult<T> = Result<T, ModuleSourceError>;

/// Port for listing module definitions.
pub trait ModuleSource: Send + Sync {
    /// Lists every module entry found at `location`.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleSourceError`] when the location cannot be read or a
    /// definition is malformed.
    fn list(&self, location: &Utf8Path) -> ModuleSourceResult<Vec<ModuleEntry>>;
}

/// Error returned when a module location cannot be read.
#[derive(Debug, Clone, Error)]
#[error("failed to list modules in {location}: {source}")]
pub struct ModuleListError {
    location: Utf8PathBuf,
    source: Arc<std::io::Error>,
}

impl ModuleListError {
    /// Wraps an I/O failure at `location`.
    pub fn new(location: impl Into<Utf8PathBuf>, err: std::io::Error) -> Self {
        Self {
            location: location.into(),
            source: Arc::new(err),
        }
    }

    /// Returns the unreadable location.
    #[must_use]
    pub fn location(&self) -> &Utf8Path {
        &self.location
    }
}

/// Errors returned by module sources.
#[derive(Debug, Clone, Error)]
pub enum ModuleSourceError {
    /// The location could not be listed or read.
    #[error(transparent)]
    List(#[from] ModuleListError),

    /// A definition was malformed.
    #[error(transparent)]
    Parse(#[from] ModuleParseError),
}
