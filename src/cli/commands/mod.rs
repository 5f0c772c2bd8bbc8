//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Opens the repository and loads configuration
//! 2. Applies command-line overrides on top of configuration
//! 3. Runs the describe machinery and formats the output
//!
//! Handlers never write to the repository.

mod completion;
mod describe;
mod tags;

pub use completion::completion;
pub use describe::describe;
pub use tags::tags;

use std::process::ExitCode;

use anyhow::{Context as _, Result};

use crate::cli::args::Command;
use crate::cli::Context;
use crate::core::config::Config;
use crate::git::Git;
use crate::ui::output;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<ExitCode> {
    match command {
        Command::Describe {
            prefix,
            mode,
            tag_order,
            max_depth,
            json,
        } => describe::describe(
            ctx,
            describe::Overrides {
                prefix,
                release_mode: mode.map(Into::into),
                tag_order: tag_order.map(Into::into),
                max_depth: max_depth.map(|d| d as usize),
            },
            json,
        ),
        Command::Tags {
            prefix,
            tag_order,
            json,
        } => tags::tags(ctx, prefix.as_deref(), tag_order.map(Into::into), json),
        Command::Completion { shell } => {
            completion::completion(shell)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Open the repository containing the working directory.
fn open_repo(ctx: &Context) -> Result<Git> {
    let cwd = ctx.working_dir()?;
    Git::open(&cwd).with_context(|| format!("failed to open repository at {}", cwd.display()))
}

/// Load configuration for `git`, reporting load warnings.
fn load_config(ctx: &Context, git: &Git) -> Result<Config> {
    let result = Config::load(Some(&git.info())).context("failed to load configuration")?;
    if let Some(path) = result.config.global_path() {
        log::debug!("global config: {}", path.display());
    }
    if let Some(path) = result.config.repo_path() {
        log::debug!("repo config: {}", path.display());
    }
    for warning in &result.warnings {
        output::warn(&warning.message, ctx.verbosity);
    }
    Ok(result.config)
}
