//! Terminal binding layer: a command shell standing in for the records page.

mod commands;
mod core;
pub mod output;
mod registry;
mod shell;

pub use self::core::{CliError, CliMode, CommandError, CommandResult, ShellContext};
pub use shell::{run_cli, SCRIPT_ENV};
