//! Turning discovered plugins into commands.

use super::{CommandExecutionError, CommandName, CommandNode, Invocation};
use crate::discovery::domain::PluginRef;

/// Name of the per-plugin command printing the plugin reference.
pub const INFO_COMMAND: &str = "info";

/// Builds the commands exposed for one discovered plugin.
pub trait PluginCommandBuilder: Send + Sync {
    /// Returns the commands for `plugin`; may be empty.
    fn build(&self, plugin: &PluginRef) -> Vec<CommandNode>;
}

/// Default builder: one group per plugin with an `info` subcommand.
#[derive(Debug, Clone, Copy, Default)]
pub struct PluginInfoCommands;

impl PluginInfoCommands {
    /// Creates the builder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PluginCommandBuilder for PluginInfoCommands {
    fn build(&self, plugin: &PluginRef) -> Vec<CommandNode> {
        let about = plugin
            .description()
            .map_or_else(|| format!("Plugin at {}", plugin.endpoint()), ToOwned::to_owned);
        let snapshot = plugin.clone();
        let info = CommandNode::new(CommandName::from_static(INFO_COMMAND))
            .with_about("Print how the plugin is reached")
            .with_action(
                move |invocation: &mut Invocation<'_>| -> Result<(), CommandExecutionError> {
                    let rendered = serde_json::to_string_pretty(&snapshot)
                        .map_err(|err| CommandExecutionError::Encode(err.to_string()))?;
                    writeln!(invocation.out(), "{rendered}")?;
                    Ok(())
                },
            );

        vec![
            CommandNode::new(CommandName::from(plugin.name()))
                .with_about(about)
                .with_child(info),
        ]
    }
}
