//! Module loading and command construction.

mod command;
mod loader;

pub use command::module_commands;
pub use loader::ModuleLoader;
