//! Integration tests for backend selection and command tree assembly.

use camino::Utf8Path;
use pluginctl::command::{
    AssemblyError, CommandName, CommandSource, CommandTreeBuilder, CommandTreeError,
    PluginInfoCommands, StaticCommands, VersionInfo, assemble_command_tree, builtin_commands,
};
use pluginctl::discovery::adapters::InMemoryDiscoveryFactory;
use pluginctl::discovery::domain::{Address, HostList, PluginName, PluginRef};
use pluginctl::discovery::services::{BackendKind, select_backend};
use pluginctl::module::domain::{ModuleDefinition, ModuleEntry, ModuleName};
use pluginctl::module::services::module_commands;
use rstest::{fixture, rstest};

const PLUGIN_DIR: &str = "/run/pluginctl/plugins";

fn plugin(name: &str, host: &str) -> PluginRef {
    PluginRef::new(
        PluginName::new(name).expect("valid plugin name"),
        format!("{host}/{name}"),
    )
    .expect("valid plugin reference")
}

fn module(name: &str) -> ModuleEntry {
    ModuleEntry::Command(
        ModuleDefinition::new(
            ModuleName::new(name).expect("valid module name"),
            "",
            "{{ command }}",
            Vec::new(),
        )
        .expect("valid module"),
    )
}

fn root() -> CommandTreeBuilder {
    CommandTreeBuilder::new(CommandName::new("pluginctl").expect("valid root name"))
}

fn static_commands(modules: &[ModuleEntry]) -> StaticCommands {
    StaticCommands {
        builtins: builtin_commands(VersionInfo::current()),
        modules: module_commands(modules),
    }
}

#[fixture]
fn remote_factory() -> InMemoryDiscoveryFactory {
    InMemoryDiscoveryFactory::new(vec![
        plugin("alpha", "tcp://10.0.0.1:24864"),
        plugin("beta", "tcp://10.0.0.2:24864"),
    ])
}

#[rstest]
#[tokio::test]
async fn remote_plugins_and_modules_share_the_root(remote_factory: InMemoryDiscoveryFactory) {
    let local_factory = InMemoryDiscoveryFactory::default();
    let hosts = HostList::parse(["tcp://10.0.0.1:24864"]).expect("hosts parse");
    let backend = select_backend(
        &hosts,
        Utf8Path::new(PLUGIN_DIR),
        &local_factory,
        &remote_factory,
    )
    .expect("backend selected");

    let tree = assemble_command_tree(
        root(),
        static_commands(&[module("gamma")]),
        &backend,
        &PluginInfoCommands::new(),
    )
    .await
    .expect("tree assembles");

    assert_eq!(tree.command_names(), ["version", "help", "alpha", "beta", "gamma"]);
    assert_eq!(tree.source_of("alpha"), Some(CommandSource::Plugin));
    assert_eq!(tree.source_of("gamma"), Some(CommandSource::Module));
    for name in ["version", "help", "alpha", "beta", "gamma"] {
        assert!(tree.root().child(name).is_some(), "{name} should be reachable");
    }
    let matches = tree
        .to_clap()
        .try_get_matches_from(["pluginctl", "beta", "info"])
        .expect("nested plugin command parses");
    assert_eq!(tree.resolve(&matches).display_path(), "beta info");
}

#[rstest]
fn two_hosts_build_one_remote_backend(remote_factory: InMemoryDiscoveryFactory) {
    let local_factory = InMemoryDiscoveryFactory::default();
    let hosts = HostList::parse(["tcp://10.0.0.1:24864", "tcp://10.0.0.2:24864"])
        .expect("hosts parse");

    let backend = select_backend(
        &hosts,
        Utf8Path::new(PLUGIN_DIR),
        &local_factory,
        &remote_factory,
    )
    .expect("backend selected");

    assert_eq!(backend.kind(), BackendKind::Remote);
    assert_eq!(remote_factory.constructed_with(), [hosts]);
    assert_eq!(local_factory.construction_count(), 0);
    let authorities: Vec<String> = backend
        .hosts()
        .expect("remote backend keeps its hosts")
        .iter()
        .map(Address::authority)
        .collect();
    assert_eq!(authorities, ["10.0.0.1:24864", "10.0.0.2:24864"]);
}

#[rstest]
#[tokio::test]
async fn plugin_and_module_collision_is_rejected(remote_factory: InMemoryDiscoveryFactory) {
    let hosts = HostList::parse(["10.0.0.1"]).expect("hosts parse");
    let backend = select_backend(
        &hosts,
        Utf8Path::new(PLUGIN_DIR),
        &InMemoryDiscoveryFactory::default(),
        &remote_factory,
    )
    .expect("backend selected");

    let result = assemble_command_tree(
        root(),
        static_commands(&[module("beta")]),
        &backend,
        &PluginInfoCommands::new(),
    )
    .await;

    let Err(AssemblyError::Tree(error)) = result else {
        panic!("expected a collision");
    };
    assert_eq!(
        error,
        CommandTreeError::NameCollision {
            name: "beta".to_owned(),
            first: CommandSource::Plugin,
            second: CommandSource::Module,
        }
    );
}

#[rstest]
#[case("version")]
#[case("help")]
#[tokio::test]
async fn modules_cannot_shadow_built_ins(#[case] name: &str) {
    let backend = select_backend(
        &HostList::default(),
        Utf8Path::new(PLUGIN_DIR),
        &InMemoryDiscoveryFactory::default(),
        &InMemoryDiscoveryFactory::default(),
    )
    .expect("backend selected");

    let result = assemble_command_tree(
        root(),
        static_commands(&[module(name)]),
        &backend,
        &PluginInfoCommands::new(),
    )
    .await;

    assert!(matches!(
        result,
        Err(AssemblyError::Tree(
            CommandTreeError::NameCollision {
                first: CommandSource::BuiltIn,
                ..
            }
        ))
    ));
}
