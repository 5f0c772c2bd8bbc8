//! versionstamp - version strings from Git tags for build tooling
//!
//! versionstamp answers "what version is HEAD?" the way
//! `git describe --tags --first-parent` would, restricted to tags with a
//! given name prefix. Only the first-parent chain is searched, so commits
//! merged in from side branches never shorten the distance.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface (`vstamp`)
//! - [`describe`] - Ancestry walk, tag index, and the describe engine
//! - [`core`] - Domain types and configuration
//! - [`git`] - Single interface for all Git access
//! - [`ui`] - User-facing output
//!
//! # Guarantees
//!
//! 1. The repository is only ever read
//! 2. Describing the same repository state twice yields the same result
//! 3. Failures inside the engine surface as "no version", never a panic

pub mod cli;
pub mod core;
pub mod describe;
pub mod git;
pub mod ui;
