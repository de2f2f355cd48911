//! Chooses exactly one discovery backend per process run.

use crate::discovery::{
    domain::{HostList, PluginRef},
    ports::{
        DiscoveryInitResult, LocalDiscoveryFactory, PluginDiscovery, PluginDiscoveryResult,
        RemoteDiscoveryFactory,
    },
};
use camino::Utf8Path;
use std::fmt;
use tracing::debug;

/// Which discovery strategy is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Plugins on this machine.
    Local,
    /// Plugins at explicitly named hosts.
    Remote,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Local => "local",
            Self::Remote => "remote",
        })
    }
}

/// The discovery backend selected for this run.
pub enum DiscoveryBackend {
    /// Local discovery, used when no host was given.
    Local(Box<dyn PluginDiscovery>),
    /// Remote discovery over every given host.
    Remote {
        /// Hosts the backend was constructed with, in input order.
        hosts: HostList,
        /// Backend enumerating those hosts.
        discovery: Box<dyn PluginDiscovery>,
    },
}

impl DiscoveryBackend {
    /// Returns which strategy is active.
    #[must_use]
    pub const fn kind(&self) -> BackendKind {
        match self {
            Self::Local(_) => BackendKind::Local,
            Self::Remote { .. } => BackendKind::Remote,
        }
    }

    /// Returns the remote hosts, or `None` for local discovery.
    #[must_use]
    pub const fn hosts(&self) -> Option<&HostList> {
        match self {
            Self::Local(_) => None,
            Self::Remote { hosts, .. } => Some(hosts),
        }
    }

    /// Enumerates currently reachable plugins.
    ///
    /// # Errors
    ///
    /// Returns the backend's enumeration failure.
    pub async fn list_plugins(&self) -> PluginDiscoveryResult<Vec<PluginRef>> {
        match self {
            Self::Local(discovery) | Self::Remote { discovery, .. } => {
                discovery.list_plugins().await
            }
        }
    }
}

impl fmt::Debug for DiscoveryBackend {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(_) => formatter.write_str("DiscoveryBackend::Local"),
            Self::Remote { hosts, .. } => formatter
                .debug_struct("DiscoveryBackend::Remote")
                .field("hosts", hosts)
                .finish_non_exhaustive(),
        }
    }
}

/// Selects the discovery backend from the parsed host list.
///
/// An empty list constructs the local backend over `plugin_dir`; any host
/// constructs the remote backend over the full list. Only the chosen factory
/// is consulted.
///
/// # Errors
///
/// Returns the chosen factory's [`DiscoveryInitError`](crate::discovery::ports::DiscoveryInitError).
pub fn select_backend<L, R>(
    hosts: &HostList,
    plugin_dir: &Utf8Path,
    local: &L,
    remote: &R,
) -> DiscoveryInitResult<DiscoveryBackend>
where
    L: LocalDiscoveryFactory + ?Sized,
    R: RemoteDiscoveryFactory + ?Sized,
{
    if hosts.is_empty() {
        debug!(%plugin_dir, "selecting local plugin discovery");
        return local.construct(plugin_dir).map(DiscoveryBackend::Local);
    }

    debug!(%hosts, "selecting remote plugin discovery");
    let discovery = remote.construct(hosts)?;
    Ok(DiscoveryBackend::Remote {
        hosts: hosts.clone(),
        discovery,
    })
}
