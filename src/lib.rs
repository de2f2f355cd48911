//! pluginctl: a control-plane CLI assembled from discovered plugins.
//!
//! At startup the command tree is built from three sources: built-in
//! commands, plugins found by a discovery backend, and user-authored script
//! modules. Plugins are discovered locally through a socket directory, or at
//! remote hosts when `--host` is given.
//!
//! # Architecture
//!
//! Each context follows hexagonal architecture principles:
//!
//! - **Domain**: Validated values with no infrastructure dependencies
//! - **Ports**: Trait interfaces for discovery backends and module sources
//! - **Adapters**: Socket directory, HTTP listing, filesystem and in-memory
//!   implementations
//! - **Services**: Backend selection, module loading and tree assembly
//!
//! # Modules
//!
//! - [`discovery`]: Host parsing and plugin discovery backends
//! - [`module`]: Script module definitions and their loader
//! - [`command`]: Command nodes, built-ins and tree assembly
//! - [`cli`]: Configuration, logging and the execution driver

pub mod cli;
pub mod command;
pub mod discovery;
pub mod module;
pub mod naming;
