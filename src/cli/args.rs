//! Global command-line arguments shared by every invocation.

use clap::{Arg, ArgAction, Args, Command, FromArgMatches, ValueEnum};
use std::ffi::OsString;

/// Name of the binary and of the root command.
pub const ROOT_COMMAND: &str = "pluginctl";

/// Verbosity accepted by `--log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Errors only.
    Error,
    /// Warnings and errors.
    Warn,
    /// Progress messages.
    Info,
    /// Startup and dispatch details.
    Debug,
    /// Everything.
    Trace,
}

impl LogLevel {
    /// Returns the `tracing` filter directive for this level.
    #[must_use]
    pub const fn as_directive(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Diagnostic output format accepted by `--log-format`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Options accepted by the root and every subcommand.
///
/// Every option takes a value; the bootstrap pass relies on that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct GlobalArgs {
    /// Remote host to discover plugins at; repeat or separate with commas
    #[arg(
        short = 'H',
        long = "host",
        value_name = "ADDRESS",
        value_delimiter = ',',
        action = ArgAction::Append,
        global = true
    )]
    pub hosts: Vec<String>,

    /// Diagnostic verbosity; RUST_LOG applies when unset
    #[arg(long, value_enum, env = "PLUGINCTL_LOG", value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Diagnostic output format
    #[arg(
        long,
        value_enum,
        env = "PLUGINCTL_LOG_FORMAT",
        default_value_t = LogFormat::Text,
        global = true
    )]
    pub log_format: LogFormat,

    /// Configuration home holding the plugin and module directories
    #[arg(long, env = "PLUGINCTL_HOME", value_name = "DIR", global = true)]
    pub home: Option<String>,

    /// Directory where local plugins publish their sockets
    #[arg(long, env = "PLUGINCTL_PLUGINS_DIR", value_name = "DIR", global = true)]
    pub plugin_dir: Option<String>,

    /// Directory holding script module definitions
    #[arg(long, env = "PLUGINCTL_CLI_DIR", value_name = "DIR", global = true)]
    pub module_dir: Option<String>,
}

/// Adds the global options to `command`.
#[must_use]
pub fn with_global_args(command: Command) -> Command {
    GlobalArgs::augment_args(command)
}

/// Reads the global options before the command tree exists.
///
/// Global options are picked out of `args` wherever they appear ahead of a
/// `--` separator. Subcommands, their options, `--help` and `--version` are
/// left for the full parse once the tree is known.
///
/// # Errors
///
/// Returns the `clap` error for a malformed global option.
pub fn parse_global_args(args: &[OsString]) -> Result<GlobalArgs, clap::Error> {
    let bootstrap = bootstrap_command();
    let tokens = global_tokens(&bootstrap, args);
    let matches = bootstrap.try_get_matches_from(tokens)?;
    GlobalArgs::from_arg_matches(&matches)
}

fn bootstrap_command() -> Command {
    with_global_args(Command::new(ROOT_COMMAND))
        .disable_help_flag(true)
        .disable_version_flag(true)
}

/// Where the value of a global option sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValuePlacement {
    /// `--host=alpha` or `-Halpha`.
    Attached,
    /// `--host alpha` or `-H alpha`.
    Following,
}

fn global_tokens(bootstrap: &Command, args: &[OsString]) -> Vec<OsString> {
    let longs: Vec<&str> = bootstrap.get_arguments().filter_map(Arg::get_long).collect();
    let shorts: Vec<char> = bootstrap.get_arguments().filter_map(Arg::get_short).collect();

    let mut tokens: Vec<OsString> = args.iter().take(1).cloned().collect();
    let mut remaining = args.iter().skip(1);
    while let Some(arg) = remaining.next() {
        let Some(text) = arg.to_str() else {
            continue;
        };
        if text == "--" {
            break;
        }
        match value_placement(text, &longs, &shorts) {
            Some(ValuePlacement::Attached) => tokens.push(arg.clone()),
            Some(ValuePlacement::Following) => {
                tokens.push(arg.clone());
                tokens.extend(remaining.next().cloned());
            }
            None => {}
        }
    }
    tokens
}

fn value_placement(text: &str, longs: &[&str], shorts: &[char]) -> Option<ValuePlacement> {
    if let Some(long) = text.strip_prefix("--") {
        return match long.split_once('=') {
            Some((name, _)) => longs.contains(&name).then_some(ValuePlacement::Attached),
            None => longs.contains(&long).then_some(ValuePlacement::Following),
        };
    }
    let mut chars = text.strip_prefix('-')?.chars();
    let short = chars.next()?;
    if !shorts.contains(&short) {
        return None;
    }
    if chars.as_str().is_empty() {
        Some(ValuePlacement::Following)
    } else {
        Some(ValuePlacement::Attached)
    }
}
