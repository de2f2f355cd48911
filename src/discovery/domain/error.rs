//! Error types for host address parsing and plugin identity validation.

use crate::naming::InvalidNameError;
use thiserror::Error;

/// Error returned when a raw `--host` value is not a valid address.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid host address '{input}': {reason}")]
pub struct AddressParseError {
    input: String,
    reason: AddressParseReason,
}

impl AddressParseError {
    /// Creates an error for the offending raw input.
    #[must_use]
    pub fn new(input: impl Into<String>, reason: AddressParseReason) -> Self {
        Self {
            input: input.into(),
            reason,
        }
    }

    /// Returns the raw input that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns why the input was rejected.
    #[must_use]
    pub const fn reason(&self) -> &AddressParseReason {
        &self.reason
    }
}

/// Reasons a host address is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AddressParseReason {
    /// The value is empty after trimming.
    #[error("address must not be empty")]
    Empty,

    /// The value is not a URL.
    #[error("{0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The URL has no host component.
    #[error("address must name a host")]
    MissingHost,

    /// The URL carries a component an endpoint reference cannot have.
    #[error("address must not contain a {0}")]
    UnexpectedComponent(&'static str),
}

/// Errors returned while constructing discovery domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DiscoveryDomainError {
    /// The plugin name failed validation.
    #[error("invalid plugin name: {0}")]
    InvalidPluginName(#[from] InvalidNameError),

    /// The plugin endpoint is empty after trimming.
    #[error("plugin '{0}' has an empty endpoint")]
    EmptyEndpoint(String),
}
