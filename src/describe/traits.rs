//! describe::traits
//!
//! The object-graph capability the describe engine consumes, plus the
//! engine's error type.
//!
//! # Design
//!
//! The engine never touches a repository directly. It borrows an
//! [`ObjectGraph`], which the [`Git`](crate::git::Git) doorway implements
//! over git2 and [`MockGraph`](super::mock::MockGraph) implements in
//! memory. All methods are read-only.
//!
//! # Example
//!
//! ```
//! use versionstamp::describe::ObjectGraph;
//! use versionstamp::describe::mock::MockGraph;
//!
//! let graph = MockGraph::linear(3);
//! let head = graph.resolve_head().unwrap();
//! assert_eq!(graph.parents_of(&head).unwrap().len(), 1);
//! ```

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::core::types::Oid;
use crate::git::GitError;

/// Errors from a describe call.
///
/// These never escape [`DescribeEngine::describe`](super::DescribeEngine::describe),
/// which absorbs them into an absent result. They are visible through
/// [`DescribeEngine::try_describe`](super::DescribeEngine::try_describe)
/// for callers that want to report why no version was produced.
#[derive(Debug, Error)]
pub enum DescribeError {
    /// HEAD could not be resolved (empty repository, missing HEAD).
    #[error("repository unavailable: {0}")]
    RepositoryUnavailable(#[source] GitError),

    /// An object could not be read while walking parents or peeling tags.
    #[error("graph access failed: {0}")]
    GraphAccess(#[source] GitError),

    /// The first-parent walk revisited a commit.
    #[error("first-parent cycle detected at {oid}")]
    CycleDetected {
        /// The commit seen twice
        oid: Oid,
    },
}

/// A tag reference as enumerated, before peeling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCandidate {
    /// Tag name without the `refs/tags/` prefix
    pub name: String,
    /// Object the reference points at (a commit, or a tag object)
    pub target: Oid,
}

/// Result of peeling an annotated tag object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeeledTag {
    /// Object the tag ultimately describes
    pub target: Oid,
    /// Tagger timestamp, when the tag records one
    pub tagger_time: Option<DateTime<Utc>>,
}

/// Read access to commits and tags.
///
/// Implementations must be deterministic for a fixed repository state:
/// the same call with the same arguments returns the same answer.
pub trait ObjectGraph {
    /// Resolve HEAD to the commit it points at.
    fn resolve_head(&self) -> Result<Oid, GitError>;

    /// Parents of a commit in recorded order; empty for root commits.
    fn parents_of(&self, commit: &Oid) -> Result<Vec<Oid>, GitError>;

    /// Every tag reference with its raw target. Order is unspecified.
    fn list_tag_references(&self) -> Result<Vec<TagCandidate>, GitError>;

    /// Peel `target` if it is an annotated tag object.
    ///
    /// Returns `Ok(None)` when `target` is already a commit (lightweight tag).
    fn peel_annotated_tag(&self, target: &Oid) -> Result<Option<PeeledTag>, GitError>;

    /// Short, unambiguous rendering of a commit id.
    fn abbreviate(&self, commit: &Oid) -> Result<String, GitError>;
}
