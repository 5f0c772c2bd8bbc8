//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and verbosity handling
//!
//! All command output goes through this module so quiet and debug
//! modes behave the same across commands.

pub mod output;
