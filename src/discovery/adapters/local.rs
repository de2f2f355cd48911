//! Local discovery over a directory of plugin sockets.

use crate::discovery::{
    domain::{PluginName, PluginRef},
    ports::{
        DiscoveryInitError, DiscoveryInitResult, LocalDiscoveryFactory, PluginDiscovery,
        PluginDiscoveryError, PluginDiscoveryResult,
    },
};
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use tracing::debug;

/// File extensions of bookkeeping files that live next to plugin sockets.
const IGNORED_EXTENSIONS: [&str; 2] = ["pid", "lock"];

/// Builds [`SocketDirectoryDiscovery`] backends.
#[derive(Debug, Clone, Copy, Default)]
pub struct SocketDirectoryDiscoveryFactory;

impl SocketDirectoryDiscoveryFactory {
    /// Creates the factory.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl LocalDiscoveryFactory for SocketDirectoryDiscoveryFactory {
    fn construct(&self, plugin_dir: &Utf8Path) -> DiscoveryInitResult<Box<dyn PluginDiscovery>> {
        Ok(Box::new(SocketDirectoryDiscovery::open(plugin_dir)?))
    }
}

/// Discovers plugins by listing the socket directory they listen in.
///
/// Every entry that is not a directory, a dot-file, or a `.pid`/`.lock` file
/// is a plugin named after the entry.
#[derive(Debug)]
pub struct SocketDirectoryDiscovery {
    path: Utf8PathBuf,
    dir: Dir,
}

impl SocketDirectoryDiscovery {
    /// Opens the plugin directory, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryInitError::PluginDirectory`] when the directory
    /// cannot be created or opened.
    pub fn open(path: &Utf8Path) -> DiscoveryInitResult<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority())
            .map_err(|err| DiscoveryInitError::plugin_directory(path, err))?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(|err| DiscoveryInitError::plugin_directory(path, err))?;
        debug!(plugin_dir = %path, "opened local plugin directory");
        Ok(Self {
            path: path.to_owned(),
            dir,
        })
    }

    /// Returns the directory being scanned.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn socket_names(&self) -> PluginDiscoveryResult<Vec<String>> {
        let entries = self
            .dir
            .entries()
            .map_err(|err| PluginDiscoveryError::directory(&self.path, err))?;

        let mut names = Vec::new();
        for entry_result in entries {
            let entry =
                entry_result.map_err(|err| PluginDiscoveryError::directory(&self.path, err))?;
            let file_type = entry
                .file_type()
                .map_err(|err| PluginDiscoveryError::directory(&self.path, err))?;
            let file_name = entry
                .file_name()
                .map_err(|err| PluginDiscoveryError::directory(&self.path, err))?;
            if file_type.is_dir() || is_ignored(&file_name) {
                debug!(entry = %file_name, "skipping plugin directory entry");
                continue;
            }
            names.push(file_name);
        }
        names.sort();
        Ok(names)
    }
}

#[async_trait]
impl PluginDiscovery for SocketDirectoryDiscovery {
    async fn list_plugins(&self) -> PluginDiscoveryResult<Vec<PluginRef>> {
        let mut plugins = Vec::new();
        for file_name in self.socket_names()? {
            let name = match PluginName::new(&file_name) {
                Ok(name) => name,
                Err(err) => {
                    debug!(entry = %file_name, %err, "skipping entry that is not a plugin name");
                    continue;
                }
            };
            let endpoint = format!("unix://{}", self.path.join(&file_name));
            let plugin = PluginRef::new(name, endpoint)
                .map_err(|err| PluginDiscoveryError::invalid_plugin(self.path.as_str(), err))?;
            plugins.push(plugin);
        }
        Ok(plugins)
    }
}

fn is_ignored(file_name: &str) -> bool {
    if file_name.starts_with('.') {
        return true;
    }
    Utf8Path::new(file_name)
        .extension()
        .is_some_and(|extension| IGNORED_EXTENSIONS.contains(&extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(".hidden", true)]
    #[case("group.pid", true)]
    #[case("group.lock", true)]
    #[case("group", false)]
    #[case("instance-file", false)]
    fn ignores_bookkeeping_entries(#[case] file_name: &str, #[case] expected: bool) {
        assert_eq!(is_ignored(file_name), expected);
    }
}
