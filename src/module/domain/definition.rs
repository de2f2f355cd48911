//! Module definitions and parameter validation.

use super::ModuleParseError;
use crate::naming::normalize_name;
use minijinja::Environment;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Parameter names a module cannot declare.
///
/// `help` is the generated help flag and `command` is always bound in the
/// template context. The rest are the ids and long names of the global
/// options, which every subcommand also accepts.
pub const RESERVED_PARAMETER_NAMES: [&str; 13] = [
    "help",
    "command",
    "host",
    "hosts",
    "log-level",
    "log_level",
    "log-format",
    "log_format",
    "home",
    "plugin-dir",
    "plugin_dir",
    "module-dir",
    "module_dir",
];

/// Validated module or module-group name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ModuleName(String);

impl ModuleName {
    /// Creates a validated module name.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleParseError::InvalidName`] when the value is not a valid
    /// command name.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ModuleParseError> {
        let raw = value.as_ref();
        normalize_name(raw)
            .map(Self)
            .map_err(|source| ModuleParseError::InvalidName {
                name: raw.to_owned(),
                source,
            })
    }

    /// Returns the module name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ModuleName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Parameter type of a module option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleParameterType {
    /// Free-form string value.
    String,
    /// Integer value.
    Number,
    /// Presence flag.
    Boolean,
    /// One of a fixed set of options.
    Select,
}

/// Parameter specification for a module, exposed as `--<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleParameterSpec {
    /// Parameter name.
    pub name: String,
    /// Parameter type, written `type` in definitions.
    #[serde(rename = "type")]
    pub parameter_type: ModuleParameterType,
    /// Whether the parameter must be given. Ignored for boolean flags.
    #[serde(default)]
    pub required: bool,
    /// Allowed options for `select` parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Help text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ModuleParameterSpec {
    /// Creates a parameter specification.
    #[must_use]
    pub fn new(name: impl Into<String>, parameter_type: ModuleParameterType, required: bool) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            parameter_type,
            required,
            options: Vec::new(),
            description: None,
        }
    }

    /// Adds allowed options for `select` parameters.
    #[must_use]
    pub fn with_options(mut self, options: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModuleDocument {
    #[serde(default)]
    description: String,
    template: String,
    #[serde(default)]
    parameters: Vec<ModuleParameterSpec>,
}

/// A validated script module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDefinition {
    name: ModuleName,
    description: String,
    template: String,
    parameters: Vec<ModuleParameterSpec>,
}

impl ModuleDefinition {
    /// Creates and validates a module definition.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleParseError`] when the template is empty or does not
    /// compile, or when a parameter is invalid, reserved, duplicated, or a
    /// `select` without options.
    pub fn new(
        name: ModuleName,
        description: impl Into<String>,
        template: impl Into<String>,
        parameters: Vec<ModuleParameterSpec>,
    ) -> Result<Self, ModuleParseError> {
        let definition = Self {
            name,
            description: description.into().trim().to_owned(),
            template: template.into(),
            parameters,
        };
        definition.validate()?;
        Ok(definition)
    }

    /// Parses a JSON module document.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleParseError`] when the name is invalid, the document
    /// does not match the module schema, or validation fails.
    pub fn from_json(name: &str, document: &str) -> Result<Self, ModuleParseError> {
        let module_name = ModuleName::new(name)?;
        let parsed: ModuleDocument = serde_json::from_str(document).map_err(|err| {
            ModuleParseError::MalformedDefinition {
                module: module_name.to_string(),
                reason: err.to_string(),
            }
        })?;
        Self::new(
            module_name,
            parsed.description,
            parsed.template,
            parsed.parameters,
        )
    }

    /// Returns the module name.
    #[must_use]
    pub const fn name(&self) -> &ModuleName {
        &self.name
    }

    /// Returns the description; empty when none was given.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the template source.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns the parameter specifications in declaration order.
    #[must_use]
    pub fn parameters(&self) -> &[ModuleParameterSpec] {
        &self.parameters
    }

    fn validate(&self) -> Result<(), ModuleParseError> {
        let module = self.name.as_str();
        if self.template.trim().is_empty() {
            return Err(ModuleParseError::EmptyTemplate {
                module: module.to_owned(),
            });
        }

        let mut names = HashSet::new();
        for parameter in &self.parameters {
            let invalid = |reason: String| ModuleParseError::InvalidParameter {
                module: module.to_owned(),
                parameter: parameter.name.clone(),
                reason,
            };
            let normalized =
                normalize_name(&parameter.name).map_err(|err| invalid(err.to_string()))?;
            if normalized != parameter.name {
                return Err(invalid("parameter names must be lowercase".to_owned()));
            }
            if RESERVED_PARAMETER_NAMES.contains(&parameter.name.as_str()) {
                return Err(invalid("parameter name is reserved".to_owned()));
            }
            if !names.insert(parameter.name.as_str()) {
                return Err(invalid("duplicate parameter definition".to_owned()));
            }
            if parameter.parameter_type == ModuleParameterType::Select
                && parameter.options.is_empty()
            {
                return Err(invalid("select parameters must provide options".to_owned()));
            }
        }

        let environment = Environment::new();
        environment
            .template_from_str(&self.template)
            .map_err(|err| ModuleParseError::InvalidTemplate {
                module: module.to_owned(),
                reason: err.to_string(),
            })?;
        Ok(())
    }
}

/// A loaded module or a named group of modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleEntry {
    /// A runnable module.
    Command(ModuleDefinition),
    /// A group of nested entries.
    Group {
        /// Group name.
        name: ModuleName,
        /// Nested entries.
        entries: Vec<ModuleEntry>,
    },
}

impl ModuleEntry {
    /// Returns the entry name.
    #[must_use]
    pub const fn name(&self) -> &ModuleName {
        match self {
            Self::Command(definition) => definition.name(),
            Self::Group { name, .. } => name,
        }
    }

    /// Sorts entries by name, recursing into groups.
    pub fn sort_by_name(entries: &mut [Self]) {
        entries.sort_by(|left, right| left.name().cmp(right.name()));
        for entry in entries {
            if let Self::Group {
                entries: nested, ..
            } = entry
            {
                Self::sort_by_name(nested);
            }
        }
    }
}
