//! Error types for module definitions.

use crate::naming::InvalidNameError;
use thiserror::Error;

/// Errors raised while parsing or validating a module definition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModuleParseError {
    /// The module or group name is not a valid command name.
    #[error("invalid module name '{name}': {source}")]
    InvalidName {
        /// Raw name as found at the module location.
        name: String,
        /// Validation failure.
        source: InvalidNameError,
    },

    /// The definition is not valid JSON for the module schema.
    #[error("module '{module}' has a malformed definition: {reason}")]
    MalformedDefinition {
        /// Module name.
        module: String,
        /// Decoding failure description.
        reason: String,
    },

    /// The definition has no template to render.
    #[error("module '{module}' has an empty template")]
    EmptyTemplate {
        /// Module name.
        module: String,
    },

    /// A parameter specification is invalid.
    #[error("invalid parameter '{parameter}' in module '{module}': {reason}")]
    InvalidParameter {
        /// Module name.
        module: String,
        /// Parameter name.
        parameter: String,
        /// Validation reason.
        reason: String,
    },

    /// The template does not compile.
    #[error("module '{module}' has an invalid template: {reason}")]
    InvalidTemplate {
        /// Module name.
        module: String,
        /// Template syntax failure.
        reason: String,
    },
}
