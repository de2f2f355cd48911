//! Port contracts for plugin discovery.

mod discovery;

pub use discovery::{
    DiscoveryInitError, DiscoveryInitResult, LocalDiscoveryFactory, PluginDiscovery,
    PluginDiscoveryError, PluginDiscoveryResult, RemoteDiscoveryFactory,
};
