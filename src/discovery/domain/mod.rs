//! Domain model for host addresses and discovered plugins.

mod address;
mod error;
mod plugin;

pub use address::{Address, DEFAULT_SCHEME, HostList};
pub use error::{AddressParseError, AddressParseReason, DiscoveryDomainError};
pub use plugin::{PluginName, PluginRef};
