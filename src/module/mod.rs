//! User-authored script modules loaded at startup.
//!
//! Modules are JSON definitions under the module directory. Each one becomes
//! a subcommand that renders a `minijinja` template with its parsed options.
//! Malformed definitions abort startup rather than being skipped.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Loading and command construction in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
