//! Command-line interface definitions and handlers.

/// CLI argument parsing with clap.
pub mod args;

/// Subcommand implementations.
pub mod commands;

use thiserror::Error;

pub use args::{
    Args, Command, GlobalArgs, ProfileCommand, ServersCommand, SlotsCommand, TextFileCommand,
};

/// The server ran a task and reported that it failed.
///
/// The result has already been printed; only the exit status is left.
#[derive(Debug, Error)]
#[error("{task} failed")]
pub struct TaskFailed {
    pub task: &'static str,
}

/// Prints a value as a single line of JSON on stdout.
pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
