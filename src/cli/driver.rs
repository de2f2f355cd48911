//! Startup sequence and command dispatch for one invocation.

use super::args::{ROOT_COMMAND, parse_global_args, with_global_args};
use super::config::CliConfig;
use super::error::{CliError, Outcome};
use super::logging::init_logging;
use crate::command::{
    CommandName, CommandTree, CommandTreeBuilder, HELP_COMMAND, HELP_TOPIC_ARG, Invocation,
    PluginCommandBuilder, StaticCommands, VersionInfo, assemble_command_tree, builtin_commands,
};
use crate::discovery::domain::HostList;
use crate::discovery::ports::{LocalDiscoveryFactory, RemoteDiscoveryFactory};
use crate::discovery::services::select_backend;
use crate::module::ports::ModuleSource;
use crate::module::services::{ModuleLoader, module_commands};
use clap::error::ErrorKind;
use clap::{ArgMatches, ColorChoice, Command};
use std::ffi::OsString;
use std::io::Write;
use tracing::{debug, info};

/// Help text of the root command.
pub const ROOT_ABOUT: &str = "Control plane for local and remote plugins";

const ROOT_HELP_TEMPLATE: &str = "\
{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}";

const ROOT_AFTER_HELP: &str =
    "Use \"pluginctl help <command>\" for more information about a command.";

/// Runs invocations against injected discovery and module adapters.
#[derive(Debug, Clone)]
pub struct ExecutionDriver<L, R, M, P> {
    local: L,
    remote: R,
    modules: ModuleLoader<M>,
    plugin_commands: P,
    version: VersionInfo,
}

impl<L, R, M, P> ExecutionDriver<L, R, M, P>
where
    L: LocalDiscoveryFactory,
    R: RemoteDiscoveryFactory,
    M: ModuleSource,
    P: PluginCommandBuilder,
{
    /// Creates a driver reporting this build's version.
    #[must_use]
    pub fn new(local: L, remote: R, module_source: M, plugin_commands: P) -> Self {
        Self {
            local,
            remote,
            modules: ModuleLoader::new(module_source),
            plugin_commands,
            version: VersionInfo::current(),
        }
    }

    /// Replaces the reported version metadata.
    #[must_use]
    pub fn with_version(mut self, version: VersionInfo) -> Self {
        self.version = version;
        self
    }

    /// Runs one invocation; `args` includes the binary name.
    ///
    /// Command output and help go to `out`. A fatal error is reported to
    /// `err` as exactly one line.
    pub async fn run<I, T>(&self, args: I, out: &mut dyn Write, err: &mut dyn Write) -> Outcome
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        match self.execute(&args, out).await {
            Ok(()) => Outcome::Success,
            Err(error) => {
                debug!(stage = error.stage(), %error, "invocation failed");
                error.report(err);
                Outcome::Failure
            }
        }
    }

    async fn execute(&self, args: &[OsString], out: &mut dyn Write) -> Result<(), CliError> {
        let global = parse_global_args(args).map_err(|err| CliError::usage(&err))?;
        let config = CliConfig::from_args(global)?;
        let logging = init_logging(config.logging());
        debug!(
            ?logging,
            plugin_dir = %config.plugin_dir(),
            module_dir = %config.module_dir(),
            hosts = config.hosts().len(),
            "resolved configuration"
        );

        let hosts = HostList::parse(config.hosts())?;
        let backend = select_backend(&hosts, config.plugin_dir(), &self.local, &self.remote)?;
        let modules = self.modules.load(config.module_dir())?;
        let tree = assemble_command_tree(
            CommandTreeBuilder::new(CommandName::from_static(ROOT_COMMAND)).with_about(ROOT_ABOUT),
            StaticCommands {
                builtins: builtin_commands(self.version.clone()),
                modules: module_commands(&modules),
            },
            &backend,
            &self.plugin_commands,
        )
        .await?;
        info!(commands = tree.command_names().len(), "command tree ready");

        let mut root = self.root_command(&tree);
        match root.try_get_matches_from_mut(args) {
            Ok(matches) => dispatch(&tree, &mut root, &matches, out),
            Err(err) if is_informational(&err) => {
                write!(out, "{}", err.render())?;
                Ok(())
            }
            Err(err) => Err(CliError::usage(&err)),
        }
    }

    fn root_command(&self, tree: &CommandTree) -> Command {
        with_global_args(tree.to_clap())
            .bin_name(ROOT_COMMAND)
            .version(self.version.version.clone())
            .help_template(ROOT_HELP_TEMPLATE)
            .after_help(ROOT_AFTER_HELP)
            .color(ColorChoice::Never)
    }
}

/// Writes the help of the command at `path`, with the global options it
/// inherits from the root.
fn write_help(root: &mut Command, path: &[&str], out: &mut dyn Write) -> Result<(), CliError> {
    root.build();
    let mut command = root;
    for name in path {
        command = command
            .find_subcommand_mut(name)
            .ok_or_else(|| CliError::Usage(format!("unrecognized command '{name}'")))?;
    }
    write!(out, "{}", command.render_help())?;
    Ok(())
}

fn is_informational(err: &clap::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    )
}

fn dispatch(
    tree: &CommandTree,
    root: &mut Command,
    matches: &ArgMatches,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let resolved = tree.resolve(matches);
    if resolved.path() == [HELP_COMMAND] {
        let topic: Vec<&str> = resolved
            .matches()
            .try_get_many::<String>(HELP_TOPIC_ARG)
            .ok()
            .flatten()
            .map(|values| values.map(String::as_str).collect())
            .unwrap_or_default();
        if tree.find(&topic).is_none() {
            return Err(CliError::Usage(format!(
                "unrecognized command '{}'",
                topic.join(" ")
            )));
        }
        return write_help(root, &topic, out);
    }
    let Some(action) = resolved.node().action() else {
        return write_help(root, resolved.path(), out);
    };

    let command = resolved.display_path();
    info!(%command, "running command");
    action
        .run(&mut Invocation::new(&command, resolved.matches(), out))
        .map_err(|source| CliError::CommandExecution {
            command: command.clone(),
            source,
        })
}
