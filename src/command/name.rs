//! Command node names.

use crate::discovery::domain::PluginName;
use crate::module::domain::ModuleName;
use crate::naming::{InvalidNameError, normalize_name};
use std::borrow::Borrow;
use std::fmt;

/// Validated subcommand name.
///
/// Plugin and module names follow the same rules, so they convert without
/// re-validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandName(String);

impl CommandName {
    /// Creates a validated command name.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidNameError`] when the value is not a valid command name.
    pub fn new(value: impl AsRef<str>) -> Result<Self, InvalidNameError> {
        normalize_name(value.as_ref()).map(Self)
    }

    /// Wraps a name known to be valid at compile time.
    pub(crate) fn from_static(value: &'static str) -> Self {
        debug_assert!(
            normalize_name(value).is_ok_and(|normalized| normalized == value),
            "static command names must already be normalized",
        );
        Self(value.to_owned())
    }

    /// Returns the command name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&PluginName> for CommandName {
    fn from(name: &PluginName) -> Self {
        Self(name.as_str().to_owned())
    }
}

impl From<&ModuleName> for CommandName {
    fn from(name: &ModuleName) -> Self {
        Self(name.as_str().to_owned())
    }
}

impl AsRef<str> for CommandName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for CommandName {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
