//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module provides the **single doorway** to all Git operations in
//! versionstamp. All repository reads flow through this interface, which
//! provides structured results and normalizes errors into typed failure
//! categories.
//!
//! # Architecture
//!
//! The `Git` struct is the only way to interact with a Git repository.
//! No other module should import `git2` directly. This ensures:
//!
//! - Consistent error handling across all Git operations
//! - Strong type guarantees at the boundary
//! - The describe engine stays testable against an in-memory graph
//!
//! # Error Handling
//!
//! Git errors are categorized into typed variants:
//! - [`GitError::NotARepo`]: Not inside a Git repository
//! - [`GitError::RefNotFound`]: Requested ref does not exist (or HEAD is unborn)
//! - [`GitError::ObjectNotFound`]: Object missing from the object database
//!
//! # Example
//!
//! ```ignore
//! use versionstamp::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! let head = git.head_oid()?;
//! println!("HEAD is at {}", git.abbreviate(&head)?);
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::types::{Oid, TypeError};
use crate::describe::{ObjectGraph, PeeledTag, TagCandidate};

/// Prefix under which tag references live.
const TAG_REF_PREFIX: &str = "refs/tags/";

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Requested ref does not exist.
    #[error("ref not found: {refname}")]
    RefNotFound {
        /// The ref that was not found
        refname: String,
    },

    /// Object not found in repository.
    #[error("object not found: {oid}")]
    ObjectNotFound {
        /// The OID that was not found
        oid: String,
    },

    /// Invalid object id format.
    #[error("invalid object id: {oid}")]
    InvalidOid {
        /// The invalid OID string
        oid: String,
    },

    /// Permission or filesystem error.
    #[error("repository access error: {message}")]
    AccessError {
        /// Description of the error
        message: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Create a GitError from a git2::Error with richer context.
    fn from_git2(err: git2::Error, context: &str) -> Self {
        match err.code() {
            git2::ErrorCode::UnbornBranch => GitError::RefNotFound {
                refname: context.to_string(),
            },
            git2::ErrorCode::NotFound => {
                if context == "HEAD" || context.starts_with("refs/") {
                    GitError::RefNotFound {
                        refname: context.to_string(),
                    }
                } else {
                    GitError::ObjectNotFound {
                        oid: context.to_string(),
                    }
                }
            }
            git2::ErrorCode::InvalidSpec => GitError::InvalidOid {
                oid: context.to_string(),
            },
            git2::ErrorCode::Locked => GitError::AccessError {
                message: format!("repository is locked: {}", err.message()),
            },
            _ => GitError::Internal {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }
}

impl From<TypeError> for GitError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::InvalidOid(msg) => GitError::InvalidOid { oid: msg },
            other => GitError::Internal {
                message: other.to_string(),
            },
        }
    }
}

/// Information about a Git repository.
#[derive(Debug, Clone)]
pub struct RepoInfo {
    /// Path to .git directory
    pub git_dir: PathBuf,
    /// Path to working directory (`None` for bare repositories)
    pub work_dir: Option<PathBuf>,
}

/// The Git interface.
///
/// This is the **single point of interaction** with Git. It is read-only:
/// nothing here writes refs or objects, so concurrent describes against
/// the same repository are safe as long as nobody else is writing to it.
///
/// # Example
///
/// ```ignore
/// use versionstamp::git::Git;
/// use std::path::Path;
///
/// let git = Git::open(Path::new("."))?;
/// for tag in git.list_tags()? {
///     println!("{} -> {}", tag.name, tag.target.short(7));
/// }
/// ```
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    // =========================================================================
    // Repository Opening and Info
    // =========================================================================

    /// Open a repository at the given path.
    ///
    /// Uses `git2::Repository::discover` to find the repository root,
    /// so `path` can be any directory within the repository. Bare
    /// repositories are accepted; describe only needs HEAD and refs.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        Ok(Self { repo })
    }

    /// Get repository information (git_dir and work_dir paths).
    pub fn info(&self) -> RepoInfo {
        RepoInfo {
            git_dir: self.repo.path().to_path_buf(),
            work_dir: self.repo.workdir().map(Path::to_path_buf),
        }
    }

    // =========================================================================
    // Ref Resolution
    // =========================================================================

    /// Get HEAD commit OID.
    ///
    /// # Errors
    ///
    /// - [`GitError::RefNotFound`] if HEAD is unborn (new repository)
    pub fn head_oid(&self) -> Result<Oid, GitError> {
        let head = self
            .repo
            .head()
            .map_err(|e| GitError::from_git2(e, "HEAD"))?;

        let oid = head
            .peel_to_commit()
            .map_err(|e| GitError::from_git2(e, "HEAD"))?
            .id();

        Oid::new(oid.to_string()).map_err(|e| e.into())
    }

    // =========================================================================
    // Tag Enumeration
    // =========================================================================

    /// List every tag reference with its raw (unpeeled) target.
    ///
    /// Names are returned without the `refs/tags/` prefix. Symbolic tag
    /// refs are resolved to their final direct target. Refs with non-UTF8
    /// names are skipped.
    pub fn list_tags(&self) -> Result<Vec<TagCandidate>, GitError> {
        let pattern = format!("{}*", TAG_REF_PREFIX);
        let refs = self
            .repo
            .references_glob(&pattern)
            .map_err(|e| GitError::Internal {
                message: e.message().to_string(),
            })?;

        let mut tags = Vec::new();
        for reference in refs {
            let reference = reference.map_err(|e| GitError::Internal {
                message: e.message().to_string(),
            })?;

            let name = match reference
                .name()
                .and_then(|n| n.strip_prefix(TAG_REF_PREFIX))
            {
                Some(n) => n.to_string(),
                None => continue,
            };

            let resolved = reference
                .resolve()
                .map_err(|e| GitError::from_git2(e, &format!("{}{}", TAG_REF_PREFIX, name)))?;
            let target = match resolved.target() {
                Some(oid) => oid,
                None => continue,
            };

            tags.push(TagCandidate {
                name,
                target: Oid::new(target.to_string())?,
            });
        }

        Ok(tags)
    }

    /// Peel an annotated tag object down to the object it describes.
    ///
    /// Returns `None` when `oid` is not a tag object (the ref was a
    /// lightweight tag). Nested tags (a tag of a tag) are followed until a
    /// non-tag object is reached; the tagger time reported is that of the
    /// outermost tag.
    ///
    /// # Errors
    ///
    /// - [`GitError::ObjectNotFound`] if any object in the chain is missing
    pub fn peel_tag(&self, oid: &Oid) -> Result<Option<PeeledTag>, GitError> {
        let object = self.find_object(oid)?;
        let tag = match object.as_tag() {
            Some(tag) => tag,
            None => return Ok(None),
        };

        let tagger_time = tag
            .tagger()
            .and_then(|sig| chrono::DateTime::from_timestamp(sig.when().seconds(), 0));

        let mut target = tag.target_id();
        loop {
            let inner = self
                .repo
                .find_object(target, None)
                .map_err(|e| GitError::from_git2(e, &target.to_string()))?;
            match inner.as_tag() {
                Some(nested) => target = nested.target_id(),
                None => break,
            }
        }

        Ok(Some(PeeledTag {
            target: Oid::new(target.to_string())?,
            tagger_time,
        }))
    }

    // =========================================================================
    // Commit Information
    // =========================================================================

    /// Get the parent OIDs of a commit.
    ///
    /// Returns empty vec for root commits, multiple OIDs for merge commits.
    /// The first element is the first parent.
    pub fn commit_parents(&self, oid: &Oid) -> Result<Vec<Oid>, GitError> {
        let git_oid = Self::to_git2(oid)?;

        let commit = self
            .repo
            .find_commit(git_oid)
            .map_err(|e| GitError::from_git2(e, oid.as_str()))?;

        let mut parents = Vec::with_capacity(commit.parent_count());
        for parent_id in commit.parent_ids() {
            parents.push(Oid::new(parent_id.to_string())?);
        }

        Ok(parents)
    }

    /// Abbreviate an object id.
    ///
    /// Delegates to libgit2's `short_id`, which honors `core.abbrev`
    /// (7 characters by default) and lengthens the result until it is
    /// unambiguous within the object database.
    pub fn abbreviate(&self, oid: &Oid) -> Result<String, GitError> {
        let object = self.find_object(oid)?;
        let short = object
            .short_id()
            .map_err(|e| GitError::from_git2(e, oid.as_str()))?;

        short
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| GitError::Internal {
                message: format!("abbreviation of {} is not valid UTF-8", oid),
            })
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn find_object(&self, oid: &Oid) -> Result<git2::Object<'_>, GitError> {
        let git_oid = Self::to_git2(oid)?;
        self.repo
            .find_object(git_oid, None)
            .map_err(|e| GitError::from_git2(e, oid.as_str()))
    }

    fn to_git2(oid: &Oid) -> Result<git2::Oid, GitError> {
        git2::Oid::from_str(oid.as_str()).map_err(|e| GitError::from_git2(e, oid.as_str()))
    }
}

impl ObjectGraph for Git {
    fn resolve_head(&self) -> Result<Oid, GitError> {
        self.head_oid()
    }

    fn parents_of(&self, commit: &Oid) -> Result<Vec<Oid>, GitError> {
        self.commit_parents(commit)
    }

    fn list_tag_references(&self) -> Result<Vec<TagCandidate>, GitError> {
        self.list_tags()
    }

    fn peel_annotated_tag(&self, target: &Oid) -> Result<Option<PeeledTag>, GitError> {
        self.peel_tag(target)
    }

    fn abbreviate(&self, commit: &Oid) -> Result<String, GitError> {
        Git::abbreviate(self, commit)
    }
}
