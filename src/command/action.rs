//! Runnable behaviour attached to command nodes.

use clap::ArgMatches;
use std::io::Write;
use std::sync::Arc;
use thiserror::Error;

/// Errors reported by an executed command.
#[derive(Debug, Clone, Error)]
pub enum CommandExecutionError {
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    Output(Arc<std::io::Error>),

    /// A parsed argument could not be read back.
    #[error("invalid argument '{argument}': {reason}")]
    Argument {
        /// Argument identifier.
        argument: String,
        /// Failure description.
        reason: String,
    },

    /// A template could not be rendered.
    #[error("template rendering failed: {0}")]
    Render(String),

    /// Output could not be encoded.
    #[error("failed to encode output: {0}")]
    Encode(String),

    /// The command reported a failure of its own.
    #[error("{0}")]
    Failed(String),
}

impl CommandExecutionError {
    /// Creates a command-reported failure.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }
}

impl From<std::io::Error> for CommandExecutionError {
    fn from(err: std::io::Error) -> Self {
        Self::Output(Arc::new(err))
    }
}

/// Parsed arguments and output sink handed to a running command.
pub struct Invocation<'a> {
    command_path: &'a str,
    matches: &'a ArgMatches,
    out: &'a mut dyn Write,
}

impl<'a> Invocation<'a> {
    /// Creates an invocation for the command at `command_path`.
    #[must_use]
    pub const fn new(
        command_path: &'a str,
        matches: &'a ArgMatches,
        out: &'a mut dyn Write,
    ) -> Self {
        Self {
            command_path,
            matches,
            out,
        }
    }

    /// Returns the space-separated path from the root, e.g. `plugin info`.
    #[must_use]
    pub const fn command_path(&self) -> &str {
        self.command_path
    }

    /// Returns the arguments parsed for this command.
    #[must_use]
    pub const fn matches(&self) -> &ArgMatches {
        self.matches
    }

    /// Returns the standard output sink.
    pub const fn out(&mut self) -> &mut dyn Write {
        &mut *self.out
    }
}

/// Behaviour run when a command node is selected.
pub trait CommandAction: Send + Sync {
    /// Runs the command.
    ///
    /// # Errors
    ///
    /// Returns [`CommandExecutionError`] when the command fails.
    fn run(&self, invocation: &mut Invocation<'_>) -> Result<(), CommandExecutionError>;
}

impl<F> CommandAction for F
where
    F: Fn(&mut Invocation<'_>) -> Result<(), CommandExecutionError> + Send + Sync,
{
    fn run(&self, invocation: &mut Invocation<'_>) -> Result<(), CommandExecutionError> {
        self(invocation)
    }
}
