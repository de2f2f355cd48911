//! Remote discovery through each host's HTTP plugin listing.

use crate::discovery::{
    domain::{Address, HostList, PluginName, PluginRef},
    ports::{
        DiscoveryInitError, DiscoveryInitResult, PluginDiscovery, PluginDiscoveryError,
        PluginDiscoveryResult, RemoteDiscoveryFactory,
    },
};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// Path of the plugin listing served by every remote host.
pub const PLUGIN_LISTING_PATH: &str = "plugins";

/// Builds [`HttpRemoteDiscovery`] backends.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpRemoteDiscoveryFactory;

impl HttpRemoteDiscoveryFactory {
    /// Creates the factory.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl RemoteDiscoveryFactory for HttpRemoteDiscoveryFactory {
    fn construct(&self, hosts: &HostList) -> DiscoveryInitResult<Box<dyn PluginDiscovery>> {
        Ok(Box::new(HttpRemoteDiscovery::new(hosts)?))
    }
}

#[derive(Debug, Clone)]
struct ListingTarget {
    address: Address,
    listing_url: Url,
}

/// Discovers plugins by fetching `GET <host>/plugins` from every host.
///
/// `tcp://` hosts are queried over plain HTTP. The listing is a JSON array
/// whose items are plugin names or objects with `name`, and optionally
/// `endpoint` and `description`.
#[derive(Debug, Clone)]
pub struct HttpRemoteDiscovery {
    client: reqwest::Client,
    targets: Vec<ListingTarget>,
}

impl HttpRemoteDiscovery {
    /// Prepares a backend over `hosts` without contacting them.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryInitError::NoHosts`] for an empty list,
    /// [`DiscoveryInitError::UnsupportedScheme`] for hosts that are not
    /// `tcp`, `http` or `https`, and [`DiscoveryInitError::Backend`] when the
    /// HTTP client cannot be built.
    pub fn new(hosts: &HostList) -> DiscoveryInitResult<Self> {
        if hosts.is_empty() {
            return Err(DiscoveryInitError::NoHosts);
        }

        let targets = hosts
            .iter()
            .map(|address| {
                Ok(ListingTarget {
                    address: address.clone(),
                    listing_url: listing_url(address)?,
                })
            })
            .collect::<DiscoveryInitResult<Vec<_>>>()?;

        let client = reqwest::Client::builder()
            .build()
            .map_err(DiscoveryInitError::backend)?;

        Ok(Self { client, targets })
    }

    /// Returns the listing URLs in host order.
    pub fn listing_urls(&self) -> impl Iterator<Item = &Url> {
        self.targets.iter().map(|target| &target.listing_url)
    }

    async fn list_host(&self, target: &ListingTarget) -> PluginDiscoveryResult<Vec<PluginRef>> {
        let host = target.address.to_string();
        debug!(%host, url = %target.listing_url, "requesting plugin listing");

        let response = self
            .client
            .get(target.listing_url.clone())
            .send()
            .await
            .map_err(|err| PluginDiscoveryError::Unreachable {
                host: host.clone(),
                reason: err.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PluginDiscoveryError::HttpStatus {
                host,
                status: status.as_u16(),
            });
        }

        let entries: Vec<ListingEntry> =
            response
                .json()
                .await
                .map_err(|err| PluginDiscoveryError::MalformedListing {
                    origin: host.clone(),
                    reason: err.to_string(),
                })?;

        entries
            .into_iter()
            .map(|entry| entry.into_plugin_ref(&target.address))
            .collect()
    }
}

#[async_trait]
impl PluginDiscovery for HttpRemoteDiscovery {
    async fn list_plugins(&self) -> PluginDiscoveryResult<Vec<PluginRef>> {
        let mut plugins = Vec::new();
        for target in &self.targets {
            plugins.extend(self.list_host(target).await?);
        }
        Ok(plugins)
    }
}

/// One item of a remote plugin listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum ListingEntry {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        endpoint: Option<String>,
        #[serde(default)]
        description: Option<String>,
    },
}

impl ListingEntry {
    fn into_plugin_ref(self, host: &Address) -> PluginDiscoveryResult<PluginRef> {
        let (raw_name, listed_endpoint, description) = match self {
            Self::Name(name) => (name, None, None),
            Self::Detailed {
                name,
                endpoint,
                description,
            } => (name, endpoint, description),
        };

        let invalid = |err| PluginDiscoveryError::invalid_plugin(host.to_string(), err);
        let name = PluginName::new(&raw_name).map_err(invalid)?;
        let endpoint = listed_endpoint.unwrap_or_else(|| format!("{host}/{name}"));
        Ok(PluginRef::new(name, endpoint)
            .map_err(invalid)?
            .with_host(host.clone())
            .with_description(description.unwrap_or_default()))
    }
}

fn listing_url(address: &Address) -> DiscoveryInitResult<Url> {
    let scheme = match address.scheme() {
        "tcp" | "http" => "http",
        "https" => "https",
        other => {
            return Err(DiscoveryInitError::UnsupportedScheme {
                address: address.to_string(),
                scheme: other.to_owned(),
            });
        }
    };

    Url::parse(&format!(
        "{scheme}://{}/{PLUGIN_LISTING_PATH}",
        address.authority()
    ))
    .map_err(DiscoveryInitError::backend)
}
