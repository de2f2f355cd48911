//! Host addresses and the ordered host list built from `--host` values.

use super::{AddressParseError, AddressParseReason};
use serde::{Serialize, Serializer};
use std::fmt;
use url::Url;

/// Scheme assumed when a host value carries none.
pub const DEFAULT_SCHEME: &str = "tcp";

/// Validated endpoint reference: scheme, host and optional port.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    scheme: String,
    host: String,
    port: Option<u16>,
}

impl Address {
    /// Parses a raw host value.
    ///
    /// Values without `://` are read as `tcp://<value>`. Credentials, query
    /// strings, fragments and non-root paths are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`AddressParseError`] naming the offending input when the value
    /// is not a valid endpoint reference.
    pub fn parse(raw: &str) -> Result<Self, AddressParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AddressParseError::new(raw, AddressParseReason::Empty));
        }

        let candidate = if trimmed.contains("://") {
            trimmed.to_owned()
        } else {
            format!("{DEFAULT_SCHEME}://{trimmed}")
        };
        let url = Url::parse(&candidate)
            .map_err(|err| AddressParseError::new(raw, AddressParseReason::InvalidUrl(err)))?;

        Self::from_url(&url).map_err(|reason| AddressParseError::new(raw, reason))
    }

    fn from_url(url: &Url) -> Result<Self, AddressParseReason> {
        let host = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or(AddressParseReason::MissingHost)?;

        if !url.username().is_empty() || url.password().is_some() {
            return Err(AddressParseReason::UnexpectedComponent("credential"));
        }
        if url.query().is_some() {
            return Err(AddressParseReason::UnexpectedComponent("query"));
        }
        if url.fragment().is_some() {
            return Err(AddressParseReason::UnexpectedComponent("fragment"));
        }
        if !matches!(url.path(), "" | "/") {
            return Err(AddressParseReason::UnexpectedComponent("path"));
        }

        Ok(Self {
            scheme: url.scheme().to_owned(),
            host: host.to_owned(),
            port: url.port(),
        })
    }

    /// Returns the lowercase scheme.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns the host, bracketed when it is an IPv6 literal.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the explicit port, if any.
    #[must_use]
    pub const fn port(&self) -> Option<u16> {
        self.port
    }

    /// Returns `host[:port]`.
    #[must_use]
    pub fn authority(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{port}", self.host),
            None => self.host.clone(),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}://{}", self.scheme, self.authority())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Ordered list of validated host addresses.
///
/// Insertion order is preserved and duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostList(Vec<Address>);

impl HostList {
    /// Parses raw host values in order, stopping at the first malformed one.
    ///
    /// An empty input yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns the [`AddressParseError`] of the first value that fails to
    /// parse; no partial list is produced.
    pub fn parse<I, S>(raw_hosts: I) -> Result<Self, AddressParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        raw_hosts
            .into_iter()
            .map(|raw| Address::parse(raw.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Returns whether the list holds no address.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of addresses.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the addresses in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Address> {
        self.0.iter()
    }

    /// Returns the addresses as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Address] {
        &self.0
    }
}

impl From<Vec<Address>> for HostList {
    fn from(addresses: Vec<Address>) -> Self {
        Self(addresses)
    }
}

impl<'a> IntoIterator for &'a HostList {
    type Item = &'a Address;
    type IntoIter = std::slice::Iter<'a, Address>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for HostList {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for address in &self.0 {
            if !first {
                formatter.write_str(", ")?;
            }
            write!(formatter, "{address}")?;
            first = false;
        }
        Ok(())
    }
}
