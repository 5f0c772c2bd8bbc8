//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to Git. All repository reads flow
//! through this interface. No other module should import `git2`.
//!
//! We use the `git2` crate exclusively (no shelling out to the git CLI).
//!
//! # Responsibilities
//!
//! - Repository discovery and opening
//! - HEAD resolution
//! - Tag enumeration and annotated-tag peeling
//! - Commit parent lookup
//! - Collision-aware object id abbreviation
//!
//! # Invariants
//!
//! - Read-only: nothing here mutates refs or objects
//! - No other module calls git2 directly
//! - All operations return strong types (Oid)
//!
//! # Example
//!
//! ```ignore
//! use versionstamp::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! let head = git.head_oid()?;
//! let parents = git.commit_parents(&head)?;
//! ```

mod interface;

pub use interface::{Git, GitError, RepoInfo};
