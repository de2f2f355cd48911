//! Module source adapters.

pub mod directory;
pub mod memory;

pub use directory::{DirectoryModuleSource, MODULE_EXTENSION};
pub use memory::InMemoryModuleSource;
