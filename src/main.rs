//! `pluginctl` binary entry point.

use pluginctl::cli::{ExecutionDriver, Outcome};
use pluginctl::command::PluginInfoCommands;
use pluginctl::discovery::adapters::{HttpRemoteDiscoveryFactory, SocketDirectoryDiscoveryFactory};
use pluginctl::module::adapters::DirectoryModuleSource;
use std::io::{self, Write};
use std::process::ExitCode;
use tokio::runtime::Builder;

fn main() -> ExitCode {
    let runtime = match Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => {
            // Nowhere left to report a failed write.
            writeln!(io::stderr(), "error: runtime: {err}").ok();
            return Outcome::Failure.into();
        }
    };

    let driver = ExecutionDriver::new(
        SocketDirectoryDiscoveryFactory::new(),
        HttpRemoteDiscoveryFactory::new(),
        DirectoryModuleSource::new(),
        PluginInfoCommands::new(),
    );
    let stdout = io::stdout();
    let stderr = io::stderr();
    let outcome = runtime.block_on(driver.run(
        std::env::args_os(),
        &mut stdout.lock(),
        &mut stderr.lock(),
    ));
    outcome.into()
}
