//! In-memory discovery backends for tests and embedding.

use crate::discovery::{
    domain::{HostList, PluginRef},
    ports::{
        DiscoveryInitError, DiscoveryInitResult, LocalDiscoveryFactory, PluginDiscovery,
        PluginDiscoveryError, PluginDiscoveryResult, RemoteDiscoveryFactory,
    },
};
use async_trait::async_trait;
use camino::Utf8Path;
use std::sync::{Arc, Mutex, PoisonError};

/// Discovery backend returning a fixed plugin list.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPluginDiscovery {
    plugins: Vec<PluginRef>,
    failure: Option<String>,
}

impl InMemoryPluginDiscovery {
    /// Creates a backend that reports `plugins`.
    #[must_use]
    pub const fn new(plugins: Vec<PluginRef>) -> Self {
        Self {
            plugins,
            failure: None,
        }
    }

    /// Creates a backend whose enumeration always fails with `reason`.
    #[must_use]
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            plugins: Vec::new(),
            failure: Some(reason.into()),
        }
    }
}

#[async_trait]
impl PluginDiscovery for InMemoryPluginDiscovery {
    async fn list_plugins(&self) -> PluginDiscoveryResult<Vec<PluginRef>> {
        self.failure.as_ref().map_or_else(
            || Ok(self.plugins.clone()),
            |reason| {
                Err(PluginDiscoveryError::Unreachable {
                    host: "memory".to_owned(),
                    reason: reason.clone(),
                })
            },
        )
    }
}

/// Factory producing [`InMemoryPluginDiscovery`] backends for either role.
///
/// Every construction is recorded so callers can check which factory the
/// selector consulted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDiscoveryFactory {
    discovery: InMemoryPluginDiscovery,
    construction_failure: Option<String>,
    constructed_with: Arc<Mutex<Vec<HostList>>>,
}

impl InMemoryDiscoveryFactory {
    /// Creates a factory whose backends report `plugins`.
    #[must_use]
    pub fn new(plugins: Vec<PluginRef>) -> Self {
        Self {
            discovery: InMemoryPluginDiscovery::new(plugins),
            ..Self::default()
        }
    }

    /// Creates a factory whose backends fail to enumerate with `reason`.
    #[must_use]
    pub fn failing_enumeration(reason: impl Into<String>) -> Self {
        Self {
            discovery: InMemoryPluginDiscovery::failing(reason),
            ..Self::default()
        }
    }

    /// Creates a factory whose construction fails with `reason`.
    #[must_use]
    pub fn failing_construction(reason: impl Into<String>) -> Self {
        Self {
            construction_failure: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Returns how many backends were requested from this factory.
    #[must_use]
    pub fn construction_count(&self) -> usize {
        self.constructed_with
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns the host lists passed to each construction, in order.
    ///
    /// Local constructions record an empty list.
    #[must_use]
    pub fn constructed_with(&self) -> Vec<HostList> {
        self.constructed_with
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn build(&self, hosts: HostList) -> DiscoveryInitResult<Box<dyn PluginDiscovery>> {
        self.constructed_with
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(hosts);

        if let Some(reason) = &self.construction_failure {
            return Err(DiscoveryInitError::backend(std::io::Error::other(
                reason.clone(),
            )));
        }
        Ok(Box::new(self.discovery.clone()))
    }
}

impl LocalDiscoveryFactory for InMemoryDiscoveryFactory {
    fn construct(&self, _plugin_dir: &Utf8Path) -> DiscoveryInitResult<Box<dyn PluginDiscovery>> {
        self.build(HostList::default())
    }
}

impl RemoteDiscoveryFactory for InMemoryDiscoveryFactory {
    fn construct(&self, hosts: &HostList) -> DiscoveryInitResult<Box<dyn PluginDiscovery>> {
        self.build(hosts.clone())
    }
}
