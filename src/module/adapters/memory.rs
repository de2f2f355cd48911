//! In-memory module source for tests.

use crate::module::{
    domain::ModuleEntry,
    ports::{ModuleSource, ModuleSourceError, ModuleSourceResult},
};
use camino::{Utf8Path, Utf8PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Module source returning fixed entries regardless of location.
#[derive(Debug, Clone, Default)]
pub struct InMemoryModuleSource {
    entries: Vec<ModuleEntry>,
    failure: Option<ModuleSourceError>,
    requested: Arc<Mutex<Vec<Utf8PathBuf>>>,
}

impl InMemoryModuleSource {
    /// Creates a source yielding `entries`.
    #[must_use]
    pub fn new(entries: Vec<ModuleEntry>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    /// Creates a source whose listing fails with `error`.
    #[must_use]
    pub fn failing(error: impl Into<ModuleSourceError>) -> Self {
        Self {
            failure: Some(error.into()),
            ..Self::default()
        }
    }

    /// Returns the locations listed so far, in order.
    #[must_use]
    pub fn requested_locations(&self) -> Vec<Utf8PathBuf> {
        self.requested
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ModuleSource for InMemoryModuleSource {
    fn list(&self, location: &Utf8Path) -> ModuleSourceResult<Vec<ModuleEntry>> {
        self.requested
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(location.to_owned());

        self.failure
            .as_ref()
            .map_or_else(|| Ok(self.entries.clone()), |error| Err(error.clone()))
    }
}
