//! Domain model for script modules.

mod definition;
mod error;

pub use definition::{
    ModuleDefinition, ModuleEntry, ModuleName, ModuleParameterSpec, ModuleParameterType,
    RESERVED_PARAMETER_NAMES,
};
pub use error::ModuleParseError;
