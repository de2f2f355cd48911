//! Assembles the full command tree from every command source.

use super::{
    CommandNode, CommandSource, CommandTree, CommandTreeBuilder, CommandTreeError,
    PluginCommandBuilder,
};
use crate::discovery::ports::PluginDiscoveryError;
use crate::discovery::services::DiscoveryBackend;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while assembling the command tree.
#[derive(Debug, Clone, Error)]
pub enum AssemblyError {
    /// The discovery backend failed to enumerate plugins.
    #[error(transparent)]
    Discovery(#[from] PluginDiscoveryError),

    /// Two commands share a name.
    #[error(transparent)]
    Tree(#[from] CommandTreeError),
}

/// Command sources other than discovery, in attachment order.
#[derive(Debug)]
pub struct StaticCommands {
    /// Commands shipped with the CLI.
    pub builtins: Vec<CommandNode>,
    /// Commands built from script modules.
    pub modules: Vec<CommandNode>,
}

/// Builds the root command from built-ins, discovered plugins and modules.
///
/// Children are attached in that order; plugins keep the backend's
/// enumeration order.
///
/// # Errors
///
/// Returns [`AssemblyError::Discovery`] when enumeration fails and
/// [`AssemblyError::Tree`] when names collide.
pub async fn assemble_command_tree<P>(
    mut builder: CommandTreeBuilder,
    commands: StaticCommands,
    backend: &DiscoveryBackend,
    plugin_commands: &P,
) -> Result<CommandTree, AssemblyError>
where
    P: PluginCommandBuilder + ?Sized,
{
    builder.add_all(CommandSource::BuiltIn, commands.builtins)?;

    let plugins = backend.list_plugins().await?;
    info!(
        backend = %backend.kind(),
        plugins = plugins.len(),
        "discovered plugins"
    );
    for plugin in &plugins {
        let nodes = plugin_commands.build(plugin);
        debug!(plugin = %plugin.name(), commands = nodes.len(), "built plugin commands");
        builder.add_all(CommandSource::Plugin, nodes)?;
    }

    builder.add_all(CommandSource::Module, commands.modules)?;
    Ok(builder.build())
}
