//! Plugin discovery: host addresses, backend selection and enumeration.
//!
//! Hosts given on the command line are parsed into a [`domain::HostList`].
//! The selector then constructs exactly one backend: local discovery over
//! the plugin socket directory when the list is empty, or remote discovery
//! over every listed host otherwise. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Backend selection in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
