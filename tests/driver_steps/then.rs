//! Then steps for execution driver BDD scenarios.

use super::world::{DriverWorld, RunResult};
use rstest_bdd_macros::then;

fn last_run(world: &DriverWorld) -> Result<&RunResult, eyre::Report> {
    world
        .last_run
        .as_ref()
        .ok_or_else(|| eyre::eyre!("the CLI has not been run in this scenario"))
}

#[then("the exit code is {code:u8}")]
fn exit_code_is(world: &DriverWorld, code: u8) -> Result<(), eyre::Report> {
    let run = last_run(world)?;
    if run.outcome.exit_code() != code {
        return Err(eyre::eyre!(
            "expected exit code {code}, got {} (stderr: {})",
            run.outcome.exit_code(),
            run.stderr
        ));
    }
    Ok(())
}

#[then(r#"standard output is "{expected}""#)]
fn stdout_is(world: &DriverWorld, expected: String) -> Result<(), eyre::Report> {
    let run = last_run(world)?;
    if run.stdout.trim_end() != expected {
        return Err(eyre::eyre!("expected stdout {expected:?}, got {:?}", run.stdout));
    }
    Ok(())
}

#[then("standard error is empty")]
fn stderr_is_empty(world: &DriverWorld) -> Result<(), eyre::Report> {
    let run = last_run(world)?;
    if !run.stderr.is_empty() {
        return Err(eyre::eyre!("expected no diagnostics, got {:?}", run.stderr));
    }
    Ok(())
}

#[then(r#"standard error is one line starting with "{prefix}""#)]
fn stderr_is_one_line(world: &DriverWorld, prefix: String) -> Result<(), eyre::Report> {
    let run = last_run(world)?;
    if run.stderr.lines().count() != 1 {
        return Err(eyre::eyre!("expected one diagnostic line, got {:?}", run.stderr));
    }
    if !run.stderr.starts_with(&prefix) {
        return Err(eyre::eyre!("expected {prefix:?} prefix, got {:?}", run.stderr));
    }
    Ok(())
}

#[then("no discovery backend was constructed")]
fn no_backend_constructed(world: &DriverWorld) -> Result<(), eyre::Report> {
    let local = world.local_factory.as_ref().map_or(0, |factory| factory.construction_count());
    let remote = world.remote_factory.as_ref().map_or(0, |factory| factory.construction_count());
    if local + remote != 0 {
        return Err(eyre::eyre!(
            "expected no constructions, got {local} local and {remote} remote"
        ));
    }
    Ok(())
}

#[then("only the remote discovery backend was constructed")]
fn only_remote_constructed(world: &DriverWorld) -> Result<(), eyre::Report> {
    let local = world
        .local_factory
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing local factory"))?
        .construction_count();
    let remote = world
        .remote_factory
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing remote factory"))?
        .construction_count();
    if (local, remote) != (0, 1) {
        return Err(eyre::eyre!(
            "expected only a remote construction, got {local} local and {remote} remote"
        ));
    }
    Ok(())
}
