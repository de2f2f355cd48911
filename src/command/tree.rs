//! Command tree assembly with unique names.

use super::{CommandName, CommandNode};
use clap::{ArgMatches, Command};
use std::collections::{HashMap, HashSet};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Where a root-level command came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandSource {
    /// Shipped with the CLI.
    BuiltIn,
    /// Built from a discovered plugin.
    Plugin,
    /// Loaded from a script module.
    Module,
}

impl fmt::Display for CommandSource {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::BuiltIn => "built-in command",
            Self::Plugin => "plugin",
            Self::Module => "module",
        })
    }
}

/// Errors raised while assembling the command tree.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandTreeError {
    /// Two root-level commands share a name.
    #[error("command '{name}' is defined by both a {first} and a {second}")]
    NameCollision {
        /// Contested name.
        name: String,
        /// Source of the command registered first.
        first: CommandSource,
        /// Source of the conflicting command.
        second: CommandSource,
    },

    /// A nested command has two children with the same name.
    #[error("command '{parent}' has more than one subcommand named '{name}'")]
    DuplicateChild {
        /// Space-separated path of the parent node.
        parent: String,
        /// Contested name.
        name: String,
    },
}

/// Accumulates root-level commands keyed by name.
///
/// Nothing is exposed until [`CommandTreeBuilder::build`], so a collision
/// never yields a partial tree.
#[derive(Debug)]
pub struct CommandTreeBuilder {
    root_name: CommandName,
    about: Option<String>,
    sources: HashMap<CommandName, CommandSource>,
    children: Vec<CommandNode>,
}

impl CommandTreeBuilder {
    /// Starts an empty tree whose root is named `root_name`.
    #[must_use]
    pub fn new(root_name: CommandName) -> Self {
        Self {
            root_name,
            about: None,
            sources: HashMap::new(),
            children: Vec::new(),
        }
    }

    /// Sets the root help text.
    #[must_use]
    pub fn with_about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    /// Registers a root-level command.
    ///
    /// # Errors
    ///
    /// Returns [`CommandTreeError::NameCollision`] when the name is already
    /// registered, or [`CommandTreeError::DuplicateChild`] when the node's
    /// subtree repeats a name among siblings.
    pub fn add(
        &mut self,
        source: CommandSource,
        node: CommandNode,
    ) -> Result<(), CommandTreeError> {
        if let Some(first) = self.sources.get(node.name()) {
            return Err(CommandTreeError::NameCollision {
                name: node.name().to_string(),
                first: *first,
                second: source,
            });
        }
        ensure_unique_children(&node, node.name().as_str())?;

        debug!(command = %node.name(), %source, "registered command");
        self.sources.insert(node.name().clone(), source);
        self.children.push(node);
        Ok(())
    }

    /// Registers every node from one source, in order.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by [`CommandTreeBuilder::add`].
    pub fn add_all(
        &mut self,
        source: CommandSource,
        nodes: impl IntoIterator<Item = CommandNode>,
    ) -> Result<(), CommandTreeError> {
        nodes.into_iter().try_for_each(|node| self.add(source, node))
    }

    /// Finishes the tree.
    #[must_use]
    pub fn build(self) -> CommandTree {
        let root = CommandNode::new(self.root_name).with_about(self.about.unwrap_or_default());
        CommandTree {
            root: self.children.into_iter().fold(root, CommandNode::with_child),
            sources: self.sources,
        }
    }
}

fn ensure_unique_children(node: &CommandNode, path: &str) -> Result<(), CommandTreeError> {
    let mut seen = HashSet::new();
    for child in node.children() {
        if !seen.insert(child.name().as_str()) {
            return Err(CommandTreeError::DuplicateChild {
                parent: path.to_owned(),
                name: child.name().to_string(),
            });
        }
        ensure_unique_children(child, &format!("{path} {}", child.name()))?;
    }
    Ok(())
}

/// The assembled command tree.
#[derive(Debug)]
pub struct CommandTree {
    root: CommandNode,
    sources: HashMap<CommandName, CommandSource>,
}

/// The node selected by a parsed command line.
#[derive(Debug)]
pub struct ResolvedCommand<'t, 'm> {
    node: &'t CommandNode,
    matches: &'m ArgMatches,
    path: Vec<&'t str>,
}

impl<'t, 'm> ResolvedCommand<'t, 'm> {
    /// Returns the selected node.
    #[must_use]
    pub const fn node(&self) -> &'t CommandNode {
        self.node
    }

    /// Returns the arguments parsed for the selected node.
    #[must_use]
    pub const fn matches(&self) -> &'m ArgMatches {
        self.matches
    }

    /// Returns the names from the root's child down to the selected node.
    ///
    /// Empty when no subcommand was given.
    #[must_use]
    pub fn path(&self) -> &[&'t str] {
        &self.path
    }

    /// Returns the path joined with spaces.
    #[must_use]
    pub fn display_path(&self) -> String {
        self.path.join(" ")
    }
}

impl CommandTree {
    /// Returns the root node.
    #[must_use]
    pub const fn root(&self) -> &CommandNode {
        &self.root
    }

    /// Returns the root-level command names in order.
    #[must_use]
    pub fn command_names(&self) -> Vec<&str> {
        self.root
            .children()
            .iter()
            .map(|child| child.name().as_str())
            .collect()
    }

    /// Returns which source registered a root-level command.
    #[must_use]
    pub fn source_of(&self, name: &str) -> Option<CommandSource> {
        self.sources.get(name).copied()
    }

    /// Builds the `clap` command for the whole tree.
    #[must_use]
    pub fn to_clap(&self) -> Command {
        self.root.to_clap()
    }

    /// Returns the node at `path` below the root; an empty path is the root.
    #[must_use]
    pub fn find(&self, path: &[&str]) -> Option<&CommandNode> {
        path.iter().try_fold(&self.root, |node, name| node.child(name))
    }

    /// Walks `matches` down the tree to the deepest selected node.
    #[must_use]
    pub fn resolve<'t, 'm>(&'t self, matches: &'m ArgMatches) -> ResolvedCommand<'t, 'm> {
        let mut node = &self.root;
        let mut current = matches;
        let mut path = Vec::new();
        while let Some((name, sub_matches)) = current.subcommand() {
            let Some(child) = node.child(name) else {
                break;
            };
            path.push(child.name().as_str());
            node = child;
            current = sub_matches;
        }
        ResolvedCommand {
            node,
            matches: current,
            path,
        }
    }
}
