//! Discovery services.

mod selector;

pub use selector::{BackendKind, DiscoveryBackend, select_backend};
