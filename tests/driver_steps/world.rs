//! Shared world state for execution driver BDD scenarios.

use pluginctl::cli::{ExecutionDriver, Outcome};
use pluginctl::command::{
    CommandExecutionError, CommandName, CommandNode, Invocation, PluginCommandBuilder,
    PluginInfoCommands,
};
use pluginctl::discovery::adapters::InMemoryDiscoveryFactory;
use pluginctl::discovery::domain::{PluginName, PluginRef};
use pluginctl::module::adapters::InMemoryModuleSource;
use pluginctl::module::domain::ModuleEntry;
use rstest::fixture;
use std::collections::HashMap;

/// Plugin commands that fail for selected plugins and describe the rest.
#[derive(Debug, Default, Clone)]
pub struct ScenarioPluginCommands {
    /// Failure message keyed by plugin name.
    pub failures: HashMap<String, String>,
}

impl PluginCommandBuilder for ScenarioPluginCommands {
    fn build(&self, plugin: &PluginRef) -> Vec<CommandNode> {
        let Some(message) = self.failures.get(plugin.name().as_str()).cloned() else {
            return PluginInfoCommands::new().build(plugin);
        };
        vec![CommandNode::new(CommandName::from(plugin.name())).with_action(
            move |_: &mut Invocation<'_>| -> Result<(), CommandExecutionError> {
                Err(CommandExecutionError::failed(message.clone()))
            },
        )]
    }
}

/// Captured result of one CLI run.
pub struct RunResult {
    /// How the run ended.
    pub outcome: Outcome,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
}

/// Scenario world for execution driver behaviour tests.
#[derive(Default)]
pub struct DriverWorld {
    /// Plugins reported by local discovery.
    pub local_plugins: Vec<PluginRef>,
    /// Plugins reported by remote discovery.
    pub remote_plugins: Vec<PluginRef>,
    /// Modules available to the loader.
    pub modules: Vec<ModuleEntry>,
    /// Plugin command behaviour.
    pub plugin_commands: ScenarioPluginCommands,
    /// Local factory used by the last run.
    pub local_factory: Option<InMemoryDiscoveryFactory>,
    /// Remote factory used by the last run.
    pub remote_factory: Option<InMemoryDiscoveryFactory>,
    /// Result of the last run.
    pub last_run: Option<RunResult>,
}

impl DriverWorld {
    /// Runs the CLI with whitespace-separated `args` against the world state.
    pub fn run(&mut self, args: &str) {
        let local = InMemoryDiscoveryFactory::new(self.local_plugins.clone());
        let remote = InMemoryDiscoveryFactory::new(self.remote_plugins.clone());
        let driver = ExecutionDriver::new(
            local.clone(),
            remote.clone(),
            InMemoryModuleSource::new(self.modules.clone()),
            self.plugin_commands.clone(),
        );
        let argv = [
            "pluginctl",
            "--plugin-dir",
            "/run/pluginctl/plugins",
            "--module-dir",
            "/etc/pluginctl/cli",
        ]
        .into_iter()
        .chain(args.split_whitespace());

        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let outcome = run_async(driver.run(argv, &mut stdout, &mut stderr));

        self.local_factory = Some(local);
        self.remote_factory = Some(remote);
        self.last_run = Some(RunResult {
            outcome,
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
        });
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DriverWorld {
    DriverWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Builds a plugin reference reached through the default socket directory.
pub fn plugin_named(name: &str) -> Result<PluginRef, eyre::Report> {
    let plugin_name = PluginName::new(name)?;
    Ok(PluginRef::new(
        plugin_name,
        format!("unix:///run/pluginctl/plugins/{name}"),
    )?)
}
