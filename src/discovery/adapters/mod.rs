//! Discovery adapters: socket directory, remote HTTP listing, and in-memory.

pub mod local;
pub mod memory;
pub mod remote;

pub use local::{SocketDirectoryDiscovery, SocketDirectoryDiscoveryFactory};
pub use memory::{InMemoryDiscoveryFactory, InMemoryPluginDiscovery};
pub use remote::{HttpRemoteDiscovery, HttpRemoteDiscoveryFactory, PLUGIN_LISTING_PATH};
