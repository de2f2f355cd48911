//! Plugin identity as reported by a discovery backend.

use super::{Address, DiscoveryDomainError};
use crate::naming::normalize_name;
use serde::Serialize;
use std::fmt;

/// Validated plugin name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PluginName(String);

impl PluginName {
    /// Creates a validated plugin name.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryDomainError::InvalidPluginName`] when the value is
    /// not a valid command name.
    pub fn new(value: impl AsRef<str>) -> Result<Self, DiscoveryDomainError> {
        Ok(Self(normalize_name(value.as_ref())?))
    }

    /// Returns the plugin name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PluginName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PluginName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A discovered plugin and where to reach it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginRef {
    name: PluginName,
    endpoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    host: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl PluginRef {
    /// Creates a plugin reference.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryDomainError::EmptyEndpoint`] when `endpoint` is
    /// empty after trimming.
    pub fn new(name: PluginName, endpoint: impl Into<String>) -> Result<Self, DiscoveryDomainError> {
        let normalized_endpoint = endpoint.into().trim().to_owned();
        if normalized_endpoint.is_empty() {
            return Err(DiscoveryDomainError::EmptyEndpoint(name.0));
        }

        Ok(Self {
            name,
            endpoint: normalized_endpoint,
            host: None,
            description: None,
        })
    }

    /// Records the remote host that reported the plugin.
    #[must_use]
    pub fn with_host(mut self, host: Address) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets a human-readable description; blank values are ignored.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let normalized = description.into().trim().to_owned();
        self.description = (!normalized.is_empty()).then_some(normalized);
        self
    }

    /// Returns the plugin name.
    #[must_use]
    pub const fn name(&self) -> &PluginName {
        &self.name
    }

    /// Returns the endpoint a client dials to reach the plugin.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the remote host that reported the plugin, if any.
    #[must_use]
    pub const fn host(&self) -> Option<&Address> {
        self.host.as_ref()
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::InvalidNameError;

    #[test]
    fn plugin_name_is_normalized() {
        let name = PluginName::new(" Group-Stateless ").expect("valid plugin name");
        assert_eq!(name.as_str(), "group-stateless");
    }

    #[test]
    fn plugin_name_rejects_socket_suffixes() {
        assert_eq!(
            PluginName::new("group.sock"),
            Err(DiscoveryDomainError::InvalidPluginName(
                InvalidNameError::InvalidCharacters("group.sock".to_owned())
            ))
        );
    }

    #[test]
    fn plugin_ref_requires_endpoint() {
        let name = PluginName::new("group").expect("valid plugin name");
        assert_eq!(
            PluginRef::new(name, "  "),
            Err(DiscoveryDomainError::EmptyEndpoint("group".to_owned()))
        );
    }

    #[test]
    fn blank_description_is_dropped() {
        let name = PluginName::new("group").expect("valid plugin name");
        let plugin = PluginRef::new(name, "unix:///run/plugins/group")
            .expect("valid plugin")
            .with_description("   ");
        assert_eq!(plugin.description(), None);
    }
}
