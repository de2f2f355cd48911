//! Loads modules from a source in a stable order.

use crate::module::{
    domain::ModuleEntry,
    ports::{ModuleSource, ModuleSourceResult},
};
use camino::Utf8Path;
use tracing::info;

/// Loads module entries and orders them by name.
#[derive(Debug, Clone)]
pub struct ModuleLoader<S> {
    source: S,
}

impl<S> ModuleLoader<S>
where
    S: ModuleSource,
{
    /// Creates a loader over `source`.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Lists modules at `location`, sorted by name at every level.
    ///
    /// # Errors
    ///
    /// Returns the source's listing or parse error; nothing is returned
    /// partially.
    pub fn load(&self, location: &Utf8Path) -> ModuleSourceResult<Vec<ModuleEntry>> {
        let mut entries = self.source.list(location)?;
        ModuleEntry::sort_by_name(&mut entries);
        info!(module_dir = %location, modules = entries.len(), "loaded modules");
        Ok(entries)
    }
}
