//! Command tree nodes.

use super::{CommandAction, CommandName};
use clap::{Arg, Command};
use std::fmt;
use std::sync::Arc;

/// A named command with optional behaviour and nested subcommands.
///
/// A node without an action is a group: invoking it prints its help.
#[derive(Clone)]
pub struct CommandNode {
    name: CommandName,
    about: Option<String>,
    args: Vec<Arg>,
    action: Option<Arc<dyn CommandAction>>,
    children: Vec<CommandNode>,
}

impl CommandNode {
    /// Creates a node with no arguments, action or children.
    #[must_use]
    pub const fn new(name: CommandName) -> Self {
        Self {
            name,
            about: None,
            args: Vec::new(),
            action: None,
            children: Vec::new(),
        }
    }

    /// Sets the one-line help text; blank values are ignored.
    #[must_use]
    pub fn with_about(mut self, about: impl Into<String>) -> Self {
        let normalized = about.into().trim().to_owned();
        self.about = (!normalized.is_empty()).then_some(normalized);
        self
    }

    /// Adds an argument.
    #[must_use]
    pub fn with_arg(mut self, arg: Arg) -> Self {
        self.args.push(arg);
        self
    }

    /// Sets the behaviour run when this node is selected.
    #[must_use]
    pub fn with_action(mut self, action: impl CommandAction + 'static) -> Self {
        self.action = Some(Arc::new(action));
        self
    }

    /// Adds a child node.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Returns the node name.
    #[must_use]
    pub const fn name(&self) -> &CommandName {
        &self.name
    }

    /// Returns the help text, if any.
    #[must_use]
    pub fn about(&self) -> Option<&str> {
        self.about.as_deref()
    }

    /// Returns the node arguments.
    #[must_use]
    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// Returns the behaviour, or `None` for a group.
    #[must_use]
    pub fn action(&self) -> Option<&dyn CommandAction> {
        self.action.as_deref()
    }

    /// Returns the children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Finds a direct child by name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children
            .iter()
            .find(|child| child.name.as_str() == name)
    }

    /// Builds the `clap` command for this node and its subtree.
    #[must_use]
    pub fn to_clap(&self) -> Command {
        let mut command = Command::new(self.name.as_str().to_owned())
            .args(self.args.iter().cloned())
            .disable_help_subcommand(true)
            .subcommands(self.children.iter().map(Self::to_clap));
        if let Some(about) = &self.about {
            command = command.about(about.clone());
        }
        command
    }
}

impl fmt::Debug for CommandNode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("CommandNode")
            .field("name", &self.name)
            .field("about", &self.about)
            .field(
                "args",
                &self
                    .args
                    .iter()
                    .map(|arg| arg.get_id().as_str())
                    .collect::<Vec<_>>(),
            )
            .field("has_action", &self.action.is_some())
            .field("children", &self.children)
            .finish()
    }
}
