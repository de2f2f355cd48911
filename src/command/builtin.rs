//! Commands shipped with the CLI.

use super::{CommandAction, CommandExecutionError, CommandName, CommandNode, Invocation};
use clap::{Arg, ArgAction};
use serde::Serialize;

/// Name of the built-in version command.
pub const VERSION_COMMAND: &str = "version";

/// Name of the built-in help command.
pub const HELP_COMMAND: &str = "help";

/// Positional argument of `help` naming the command to describe.
pub const HELP_TOPIC_ARG: &str = "topic";

/// Build metadata reported by the `version` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    /// Binary name.
    pub name: String,
    /// Crate version.
    pub version: String,
    /// Operating system and architecture.
    pub platform: String,
}

impl VersionInfo {
    /// Captures the metadata of this build.
    #[must_use]
    pub fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            platform: format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH),
        }
    }

    /// Formats the one-line human-readable form.
    #[must_use]
    pub fn format_brief(&self) -> String {
        format!("{} {} ({})", self.name, self.version, self.platform)
    }
}

struct VersionAction {
    info: VersionInfo,
}

impl CommandAction for VersionAction {
    fn run(&self, invocation: &mut Invocation<'_>) -> Result<(), CommandExecutionError> {
        let as_json = invocation
            .matches()
            .try_get_one::<bool>("json")
            .map_err(|err| CommandExecutionError::Argument {
                argument: "json".to_owned(),
                reason: err.to_string(),
            })?
            .copied()
            .unwrap_or(false);

        if as_json {
            let rendered = serde_json::to_string_pretty(&self.info)
                .map_err(|err| CommandExecutionError::Encode(err.to_string()))?;
            writeln!(invocation.out(), "{rendered}")?;
        } else {
            writeln!(invocation.out(), "{}", self.info.format_brief())?;
        }
        Ok(())
    }
}

/// Builds the `version` command.
#[must_use]
pub fn version_command(info: VersionInfo) -> CommandNode {
    CommandNode::new(CommandName::from_static(VERSION_COMMAND))
        .with_about("Print version information")
        .with_arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print as JSON"),
        )
        .with_action(VersionAction { info })
}

/// Builds the `help` command.
///
/// It has no action of its own; the driver renders help for the command path
/// given as its topic.
#[must_use]
pub fn help_command() -> CommandNode {
    CommandNode::new(CommandName::from_static(HELP_COMMAND))
        .with_about("Print help for the CLI or one of its commands")
        .with_arg(
            Arg::new(HELP_TOPIC_ARG)
                .value_name("COMMAND")
                .num_args(0..)
                .action(ArgAction::Append),
        )
}

/// Returns every built-in command.
#[must_use]
pub fn builtin_commands(info: VersionInfo) -> Vec<CommandNode> {
    vec![version_command(info), help_command()]
}
