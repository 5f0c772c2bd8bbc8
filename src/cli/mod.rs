//! cli
//!
//! Command-line interface layer for versionstamp.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Resolve configuration and apply flag overrides
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It opens the repository through [`crate::git`],
//! loads [`crate::core::config`], and hands the graph to
//! [`crate::describe`] for the actual work.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context as _, Result};

use crate::ui::output::Verbosity;

/// Execution context shared by all command handlers.
#[derive(Debug, Clone)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Output verbosity.
    pub verbosity: Verbosity,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            cwd: None,
            verbosity: Verbosity::Normal,
        }
    }
}

impl Context {
    /// Directory to discover the repository from.
    pub fn working_dir(&self) -> Result<PathBuf> {
        match &self.cwd {
            Some(cwd) => Ok(cwd.clone()),
            None => std::env::current_dir().context("failed to determine current directory"),
        }
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`. Logging must
/// already be initialized.
pub fn run(cli: Cli) -> Result<ExitCode> {
    let ctx = Context {
        cwd: cli.cwd.clone(),
        verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
    };

    commands::dispatch(cli.command, &ctx)
}
