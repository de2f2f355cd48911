//! Given steps for execution driver BDD scenarios.

use super::world::{DriverWorld, plugin_named};
use eyre::WrapErr;
use pluginctl::module::domain::{ModuleDefinition, ModuleEntry, ModuleName};
use rstest_bdd_macros::given;

#[given(r#"a local plugin named "{name}""#)]
fn a_local_plugin(world: &mut DriverWorld, name: String) -> Result<(), eyre::Report> {
    world.local_plugins.push(plugin_named(&name)?);
    Ok(())
}

#[given(r#"a remote plugin named "{name}""#)]
fn a_remote_plugin(world: &mut DriverWorld, name: String) -> Result<(), eyre::Report> {
    world.remote_plugins.push(plugin_named(&name)?);
    Ok(())
}

#[given(r#"a failing local plugin named "{name}" reporting "{message}""#)]
fn a_failing_local_plugin(
    world: &mut DriverWorld,
    name: String,
    message: String,
) -> Result<(), eyre::Report> {
    world.local_plugins.push(plugin_named(&name)?);
    world.plugin_commands.failures.insert(name, message);
    Ok(())
}

#[given(r#"a module named "{name}" rendering "{template}""#)]
fn a_module(world: &mut DriverWorld, name: String, template: String) -> Result<(), eyre::Report> {
    let module_name = ModuleName::new(&name).wrap_err("module name in scenario")?;
    let definition = ModuleDefinition::new(module_name, "", template, Vec::new())
        .wrap_err("module definition in scenario")?;
    world.modules.push(ModuleEntry::Command(definition));
    Ok(())
}
