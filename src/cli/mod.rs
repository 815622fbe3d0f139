//! Host shell: keeps the tracker session and re-runs the projection on each command.

mod context;
pub mod output;
mod shell;

use std::io;

use thiserror::Error;

use crate::{config::ConfigError, errors::CycleError};

pub use context::{CliMode, ShellContext};
pub use shell::run_cli;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Failures that end the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CycleError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Failures of a single command; the shell reports them and keeps going.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("No user selected. Use `user <uuid>` first.")]
    NoUser,
    #[error("Unknown command `{0}`. Type `help` for a list of commands.")]
    UnknownCommand(String),
    #[error(transparent)]
    Core(#[from] CycleError),
}
