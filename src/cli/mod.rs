//! Command-line entry layer.
//!
//! [`ExecutionDriver`] runs one invocation end to end: it resolves
//! configuration, starts logging, parses hosts, selects a discovery backend,
//! loads modules, assembles the command tree and dispatches. Every fatal
//! error is reported to stderr as one `error: <stage>: <cause>` line and
//! ends the invocation with exit status 1.

mod args;
mod config;
mod driver;
mod error;
mod logging;

pub use args::{GlobalArgs, LogFormat, LogLevel, ROOT_COMMAND, parse_global_args, with_global_args};
pub use config::{CliConfig, ConfigError, HOME_DIR_NAME, MODULES_SUBDIR, PLUGINS_SUBDIR};
pub use driver::{ExecutionDriver, ROOT_ABOUT};
pub use error::{CliError, Outcome};
pub use logging::{DEFAULT_LOG_FILTER, LoggingConfig, init_logging};
