//! Runtime configuration resolved once at startup.

use super::args::GlobalArgs;
use super::logging::LoggingConfig;
use camino::{Utf8Path, Utf8PathBuf};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration home under the user's home directory.
pub const HOME_DIR_NAME: &str = ".pluginctl";

/// Plugin socket directory under the configuration home.
pub const PLUGINS_SUBDIR: &str = "plugins";

/// Module definition directory under the configuration home.
pub const MODULES_SUBDIR: &str = "cli";

/// Errors raised while resolving configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No configuration home was given and the user's home is unknown.
    #[error("cannot locate the home directory; set --home or PLUGINCTL_HOME")]
    HomeDirectoryNotFound,

    /// A derived directory is not valid UTF-8.
    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),
}

/// Immutable settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    hosts: Vec<String>,
    logging: LoggingConfig,
    plugin_dir: Utf8PathBuf,
    module_dir: Utf8PathBuf,
}

impl CliConfig {
    /// Resolves configuration against the current user's home directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a directory cannot be determined.
    pub fn from_args(args: GlobalArgs) -> Result<Self, ConfigError> {
        Self::resolve(args, dirs::home_dir)
    }

    /// Resolves configuration with an explicit home directory lookup.
    ///
    /// Explicit directories win; otherwise they are derived from `--home`,
    /// falling back to `~/.pluginctl`. The lookup runs only when needed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a directory cannot be determined.
    pub fn resolve(
        args: GlobalArgs,
        user_home: impl Fn() -> Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let GlobalArgs {
            hosts,
            log_level,
            log_format,
            home,
            plugin_dir,
            module_dir,
        } = args;
        let base_dir = || config_home(home.as_deref(), &user_home);
        Ok(Self {
            hosts,
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
            plugin_dir: directory(plugin_dir, &base_dir, PLUGINS_SUBDIR)?,
            module_dir: directory(module_dir, &base_dir, MODULES_SUBDIR)?,
        })
    }

    /// Returns the raw host values in the order given.
    #[must_use]
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    /// Returns the logging settings.
    #[must_use]
    pub const fn logging(&self) -> LoggingConfig {
        self.logging
    }

    /// Returns the local plugin directory.
    #[must_use]
    pub fn plugin_dir(&self) -> &Utf8Path {
        &self.plugin_dir
    }

    /// Returns the module definition directory.
    #[must_use]
    pub fn module_dir(&self) -> &Utf8Path {
        &self.module_dir
    }
}

fn directory(
    explicit: Option<String>,
    base_dir: &dyn Fn() -> Result<Utf8PathBuf, ConfigError>,
    subdir: &str,
) -> Result<Utf8PathBuf, ConfigError> {
    explicit.map_or_else(
        || base_dir().map(|base| base.join(subdir)),
        |dir| Ok(Utf8PathBuf::from(dir)),
    )
}

fn config_home(
    explicit: Option<&str>,
    user_home: &dyn Fn() -> Option<PathBuf>,
) -> Result<Utf8PathBuf, ConfigError> {
    explicit.map_or_else(
        || {
            let home = user_home().ok_or(ConfigError::HomeDirectoryNotFound)?;
            Utf8PathBuf::from_path_buf(home.join(HOME_DIR_NAME)).map_err(ConfigError::NonUtf8Path)
        },
        |dir| Ok(Utf8PathBuf::from(dir)),
    )
}
