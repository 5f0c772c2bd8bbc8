//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::types::{ReleaseMode, TagOrderKind};

/// vstamp - Version strings from Git tags
#[derive(Parser, Debug)]
#[command(name = "vstamp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if vstamp was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; only results and errors are printed
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the version string for HEAD
    #[command(
        name = "describe",
        long_about = "Print the version string for HEAD.\n\n\
            Walks HEAD's first-parent ancestry to the nearest tagged commit. If that \
            tag starts with the prefix, the version is the tag itself when HEAD carries \
            it, or <tag>-<distance>-g<abbrev> otherwise. If no tag qualifies, the \
            abbreviated HEAD id is printed.\n\n\
            Exits with status 1 and prints nothing when no version can be determined.",
        after_help = "\
EXAMPLES:
    # Describe with tags named v*
    vstamp describe --prefix v

    # Release branches: always show the distance for x.y.0 tags
    vstamp describe --prefix v --mode release-branch

    # Machine-readable output
    vstamp describe --json"
    )]
    Describe {
        /// Only tags starting with this prefix qualify (overrides config)
        #[arg(long)]
        prefix: Option<String>,

        /// Formatting rule for exact matches (overrides config)
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        /// Tie-break among tags on the same commit (overrides config)
        #[arg(long, value_enum)]
        tag_order: Option<TagOrderArg>,

        /// Inspect at most this many first-parent ancestors
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        max_depth: Option<u64>,

        /// Print the description as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the commit to tag index
    #[command(
        name = "tags",
        long_about = "List the tag chosen for each tagged commit.\n\n\
            When several tags point at one commit, only the tag that describe \
            would use is shown."
    )]
    Tags {
        /// Only list tags starting with this prefix (overrides config)
        #[arg(long)]
        prefix: Option<String>,

        /// Tie-break among tags on the same commit (overrides config)
        #[arg(long, value_enum)]
        tag_order: Option<TagOrderArg>,

        /// Print the index as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    #[command(name = "completion")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Release mode as accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    Plain,
    ReleaseBranch,
}

impl From<ModeArg> for ReleaseMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Plain => ReleaseMode::Plain,
            ModeArg::ReleaseBranch => ReleaseMode::ReleaseBranch,
        }
    }
}

/// Tag tie-break policy as accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagOrderArg {
    AnnotatedThenName,
    NewestAnnotated,
}

impl From<TagOrderArg> for TagOrderKind {
    fn from(arg: TagOrderArg) -> Self {
        match arg {
            TagOrderArg::AnnotatedThenName => TagOrderKind::AnnotatedThenName,
            TagOrderArg::NewestAnnotated => TagOrderKind::NewestAnnotated,
        }
    }
}

/// Supported shells for completion
#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
