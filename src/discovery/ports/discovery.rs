//! Discovery ports: plugin enumeration and backend construction.

use crate::discovery::domain::{DiscoveryDomainError, HostList, PluginRef};
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Result type for plugin enumeration.
pub type PluginDiscoveryResult<T> = Result<T, PluginDiscoveryError>;

/// Result type for backend construction.
pub type DiscoveryInitResult<T> = Result<T, DiscoveryInitError>;

/// Capability to enumerate currently reachable plugins.
#[async_trait]
pub trait PluginDiscovery: Send + Sync {
    /// Lists reachable plugins in a stable order.
    async fn list_plugins(&self) -> PluginDiscoveryResult<Vec<PluginRef>>;
}

/// Constructs the discovery backend for plugins on this machine.
pub trait LocalDiscoveryFactory: Send + Sync {
    /// Builds a backend over the local plugin directory.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryInitError`] when the backend cannot be prepared.
    fn construct(&self, plugin_dir: &Utf8Path) -> DiscoveryInitResult<Box<dyn PluginDiscovery>>;
}

/// Constructs the discovery backend for plugins at remote hosts.
pub trait RemoteDiscoveryFactory: Send + Sync {
    /// Builds a backend over every host in `hosts`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryInitError`] when the backend cannot be prepared.
    fn construct(&self, hosts: &HostList) -> DiscoveryInitResult<Box<dyn PluginDiscovery>>;
}

/// Errors returned while constructing a discovery backend.
#[derive(Debug, Clone, Error)]
pub enum DiscoveryInitError {
    /// The local plugin directory cannot be created or opened.
    #[error("plugin directory {path} is unavailable: {source}")]
    PluginDirectory {
        /// Directory path.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        source: Arc<std::io::Error>,
    },

    /// Remote discovery was requested without hosts.
    #[error("remote discovery requires at least one host")]
    NoHosts,

    /// A host uses a scheme the remote backend cannot speak.
    #[error("unsupported scheme '{scheme}' for host {address}")]
    UnsupportedScheme {
        /// Host address as given.
        address: String,
        /// Offending scheme.
        scheme: String,
    },

    /// Generic backend construction failure.
    #[error("backend initialisation failed: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl DiscoveryInitError {
    /// Wraps a plugin directory I/O failure.
    pub fn plugin_directory(path: impl Into<Utf8PathBuf>, err: std::io::Error) -> Self {
        Self::PluginDirectory {
            path: path.into(),
            source: Arc::new(err),
        }
    }

    /// Wraps a generic backend construction failure.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}

/// Errors returned while enumerating plugins.
#[derive(Debug, Clone, Error)]
pub enum PluginDiscoveryError {
    /// The local plugin directory cannot be listed.
    #[error("failed to list plugin directory {path}: {source}")]
    Directory {
        /// Directory path.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        source: Arc<std::io::Error>,
    },

    /// A remote host could not be reached.
    #[error("failed to reach {host}: {reason}")]
    Unreachable {
        /// Host address.
        host: String,
        /// Transport failure description.
        reason: String,
    },

    /// A remote host answered the listing request with an error status.
    #[error("{host} answered plugin listing with HTTP {status}")]
    HttpStatus {
        /// Host address.
        host: String,
        /// HTTP status code.
        status: u16,
    },

    /// A listing could not be decoded.
    #[error("malformed plugin listing from {origin}: {reason}")]
    MalformedListing {
        /// Directory or host the listing came from.
        origin: String,
        /// Decoding failure description.
        reason: String,
    },

    /// A listed plugin has an invalid identity.
    #[error("invalid plugin reported by {origin}: {source}")]
    InvalidPlugin {
        /// Directory or host the listing came from.
        origin: String,
        /// Validation failure.
        source: DiscoveryDomainError,
    },
}

impl PluginDiscoveryError {
    /// Wraps a plugin directory listing failure.
    pub fn directory(path: impl Into<Utf8PathBuf>, err: std::io::Error) -> Self {
        Self::Directory {
            path: path.into(),
            source: Arc::new(err),
        }
    }

    /// Wraps an invalid plugin identity.
    pub fn invalid_plugin(origin: impl Into<String>, source: DiscoveryDomainError) -> Self {
        Self::InvalidPlugin {
            origin: origin.into(),
            source,
        }
    }
}
