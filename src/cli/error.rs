//! Fatal errors and their one-line reports.

use super::config::ConfigError;
use crate::command::{AssemblyError, CommandExecutionError, CommandTreeError};
use crate::discovery::domain::AddressParseError;
use crate::discovery::ports::{DiscoveryInitError, PluginDiscoveryError};
use crate::module::domain::ModuleParseError;
use crate::module::ports::{ModuleListError, ModuleSourceError};
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Any error that ends an invocation.
#[derive(Debug, Clone, Error)]
pub enum CliError {
    /// The command line could not be parsed.
    #[error("usage: {0}")]
    Usage(String),

    /// Configuration could not be resolved.
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    /// A host value is malformed.
    #[error("host: {0}")]
    AddressParse(#[from] AddressParseError),

    /// The discovery backend could not be constructed.
    #[error("discovery: {0}")]
    DiscoveryInit(#[from] DiscoveryInitError),

    /// Plugins could not be enumerated.
    #[error("discovery: {0}")]
    PluginDiscovery(#[from] PluginDiscoveryError),

    /// The module directory could not be read.
    #[error("modules: {0}")]
    ModuleList(ModuleListError),

    /// A module definition is malformed.
    #[error("modules: {0}")]
    ModuleParse(ModuleParseError),

    /// Command names collide.
    #[error("commands: {0}")]
    CommandTree(#[from] CommandTreeError),

    /// The selected command failed.
    #[error("execution: {command}: {source}")]
    CommandExecution {
        /// Space-separated path of the command.
        command: String,
        /// Underlying failure.
        source: CommandExecutionError,
    },

    /// Help or version text could not be written.
    #[error("output: {0}")]
    Output(Arc<io::Error>),
}

impl CliError {
    /// Builds a usage error from a `clap` parse failure.
    #[must_use]
    pub fn usage(err: &clap::Error) -> Self {
        let rendered = err.to_string();
        let first_line = rendered.lines().next().unwrap_or_default();
        Self::Usage(
            first_line
                .strip_prefix("error: ")
                .unwrap_or(first_line)
                .to_owned(),
        )
    }

    /// Names the startup or execution stage that failed.
    #[must_use]
    pub const fn stage(&self) -> &'static str {
        match self {
            Self::Usage(_) => "usage",
            Self::Config(_) => "configuration",
            Self::AddressParse(_) => "host",
            Self::DiscoveryInit(_) | Self::PluginDiscovery(_) => "discovery",
            Self::ModuleList(_) | Self::ModuleParse(_) => "modules",
            Self::CommandTree(_) => "commands",
            Self::CommandExecution { .. } => "execution",
            Self::Output(_) => "output",
        }
    }

    /// Renders the error as one line prefixed with `error: `.
    #[must_use]
    pub fn diagnostic(&self) -> String {
        let message = self.to_string();
        let collapsed = message
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        format!("error: {collapsed}")
    }

    /// Writes the diagnostic line to `err`.
    pub fn report(&self, err: &mut dyn Write) {
        if writeln!(err, "{}", self.diagnostic()).is_err() {
            debug!(stage = self.stage(), "failed to write the error report");
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::Output(Arc::new(err))
    }
}

impl From<ModuleSourceError> for CliError {
    fn from(err: ModuleSourceError) -> Self {
        match err {
            ModuleSourceError::List(list) => Self::ModuleList(list),
            ModuleSourceError::Parse(parse) => Self::ModuleParse(parse),
        }
    }
}

impl From<AssemblyError> for CliError {
    fn from(err: AssemblyError) -> Self {
        match err {
            AssemblyError::Discovery(discovery) => Self::PluginDiscovery(discovery),
            AssemblyError::Tree(tree) => Self::CommandTree(tree),
        }
    }
}

/// How an invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command ran, or help was shown.
    Success,
    /// A fatal error was reported.
    Failure,
}

impl Outcome {
    /// Returns the process exit status.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        Self::from(outcome.exit_code())
    }
}
