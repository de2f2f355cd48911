//! Port contracts for module loading.

mod source;

pub use source::{ModuleListError, ModuleSource, ModuleSourceError, ModuleSourceResult};
