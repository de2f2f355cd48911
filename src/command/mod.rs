//! Command tree: nodes, actions, built-ins and assembly.
//!
//! Built-in commands, commands derived from discovered plugins and commands
//! loaded from modules are merged under one root by
//! [`CommandTreeBuilder`], which rejects duplicate names instead of letting
//! one source shadow another.

mod action;
mod assembly;
mod builtin;
mod name;
mod node;
mod plugin;
mod tree;

pub use action::{CommandAction, CommandExecutionError, Invocation};
pub use assembly::{AssemblyError, StaticCommands, assemble_command_tree};
pub use builtin::{
    HELP_COMMAND, HELP_TOPIC_ARG, VERSION_COMMAND, VersionInfo, builtin_commands, help_command,
    version_command,
};
pub use name::CommandName;
pub use node::CommandNode;
pub use plugin::{INFO_COMMAND, PluginCommandBuilder, PluginInfoCommands};
pub use tree::{CommandSource, CommandTree, CommandTreeBuilder, CommandTreeError, ResolvedCommand};
