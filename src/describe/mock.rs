//! describe::mock
//!
//! In-memory object graph for deterministic testing.
//!
//! # Design
//!
//! `MockGraph` implements [`ObjectGraph`] over plain maps. Commit and tag
//! object ids are derived from small integers so tests can name them
//! without hashing anything, and their leading characters differ so
//! abbreviations are distinct. Failures can be injected per operation.
//!
//! # Example
//!
//! ```
//! use versionstamp::describe::mock::MockGraph;
//! use versionstamp::describe::{describe, ObjectGraph};
//! use versionstamp::core::types::ReleaseMode;
//!
//! // c0 (HEAD) -> c1 -> c2 (root), v1.0 on c2
//! let mut graph = MockGraph::linear(3);
//! graph.lightweight_tag("v1.0", MockGraph::commit_id(2));
//!
//! let head = MockGraph::commit_id(0);
//! let expected = format!("v1.0-2-g{}", graph.abbreviate(&head).unwrap());
//! assert_eq!(describe(&graph, "v", ReleaseMode::Plain), Some(expected));
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Utc};

use super::traits::{ObjectGraph, PeeledTag, TagCandidate};
use crate::core::types::Oid;
use crate::git::GitError;

/// Length of abbreviations produced by the mock.
const MOCK_ABBREV_LEN: usize = 7;

/// Which operation the mock should fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailOn {
    /// `resolve_head` fails as if HEAD were unborn.
    ResolveHead,
    /// `parents_of` fails for this commit.
    ParentsOf(Oid),
    /// `list_tag_references` fails.
    ListTags,
    /// `peel_annotated_tag` fails for this object.
    Peel(Oid),
    /// `abbreviate` fails.
    Abbreviate,
}

/// Mock object graph for testing.
#[derive(Debug, Default)]
pub struct MockGraph {
    /// Commit HEAD resolves to.
    head: Option<Oid>,
    /// Parent lists by commit.
    commits: HashMap<Oid, Vec<Oid>>,
    /// Annotated tag objects by their own id.
    tag_objects: HashMap<Oid, PeeledTag>,
    /// Tag refs in enumeration order.
    tags: Vec<TagCandidate>,
    /// Operation to fail, if any.
    fail_on: Option<FailOn>,
    /// Number of `parents_of` calls served.
    parent_lookups: AtomicUsize,
}

impl MockGraph {
    /// Create an empty graph with no HEAD.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deterministic id of the `n`th commit.
    pub fn commit_id(n: usize) -> Oid {
        Self::synthetic_id(n as u128, 0x9e37_79b1)
    }

    /// Deterministic id of the `n`th annotated tag object.
    pub fn tag_object_id(n: usize) -> Oid {
        Self::synthetic_id((n as u128) | (1u128 << 120), 0x85eb_ca6b)
    }

    fn synthetic_id(n: u128, mix: u32) -> Oid {
        // Odd multiplier keeps the leading word unique per n.
        let lead = (n as u32).wrapping_add(1).wrapping_mul(mix);
        Oid::new(format!("{:08x}{:032x}", lead, n)).expect("synthetic ids are valid hex")
    }

    /// A linear history of `len` commits: `commit_id(0)` is HEAD and each
    /// `commit_id(i)` has `commit_id(i + 1)` as its only parent. The last
    /// commit is a root.
    pub fn linear(len: usize) -> Self {
        let mut graph = Self::new();
        for i in 0..len {
            let parents = if i + 1 < len {
                vec![Self::commit_id(i + 1)]
            } else {
                Vec::new()
            };
            graph.add_commit(Self::commit_id(i), parents);
        }
        if len > 0 {
            graph.set_head(Self::commit_id(0));
        }
        graph
    }

    /// Add (or replace) a commit with the given ordered parents.
    pub fn add_commit(&mut self, oid: Oid, parents: Vec<Oid>) -> &mut Self {
        self.commits.insert(oid, parents);
        self
    }

    /// Point HEAD at `oid`.
    pub fn set_head(&mut self, oid: Oid) -> &mut Self {
        self.head = Some(oid);
        self
    }

    /// Add a lightweight tag pointing directly at `commit`.
    pub fn lightweight_tag(&mut self, name: &str, commit: Oid) -> &mut Self {
        self.tags.push(TagCandidate {
            name: name.to_string(),
            target: commit,
        });
        self
    }

    /// Add an annotated tag on `commit`, backed by a fresh tag object.
    pub fn annotated_tag(
        &mut self,
        name: &str,
        commit: Oid,
        tagger_time: Option<DateTime<Utc>>,
    ) -> &mut Self {
        let object = Self::tag_object_id(self.tag_objects.len());
        self.tag_objects.insert(
            object.clone(),
            PeeledTag {
                target: commit,
                tagger_time,
            },
        );
        self.tags.push(TagCandidate {
            name: name.to_string(),
            target: object,
        });
        self
    }

    /// Reverse the order in which tag refs are enumerated.
    pub fn reverse_tag_enumeration(&mut self) -> &mut Self {
        self.tags.reverse();
        self
    }

    /// Apply an arbitrary permutation to the tag enumeration order.
    pub fn reorder_tags(&mut self, reorder: impl FnOnce(&mut Vec<TagCandidate>)) -> &mut Self {
        reorder(&mut self.tags);
        self
    }

    /// Configure the mock to fail on a specific operation.
    pub fn fail_on(mut self, fail_on: FailOn) -> Self {
        self.fail_on = Some(fail_on);
        self
    }

    /// Number of `parents_of` calls served so far.
    pub fn parent_lookups(&self) -> usize {
        self.parent_lookups.load(Ordering::SeqCst)
    }

    fn injected(&self, op: &FailOn) -> bool {
        self.fail_on.as_ref() == Some(op)
    }
}

impl ObjectGraph for MockGraph {
    fn resolve_head(&self) -> Result<Oid, GitError> {
        if self.injected(&FailOn::ResolveHead) {
            return Err(GitError::RefNotFound {
                refname: "HEAD".into(),
            });
        }
        self.head.clone().ok_or_else(|| GitError::RefNotFound {
            refname: "HEAD".into(),
        })
    }

    fn parents_of(&self, commit: &Oid) -> Result<Vec<Oid>, GitError> {
        self.parent_lookups.fetch_add(1, Ordering::SeqCst);
        if self.injected(&FailOn::ParentsOf(commit.clone())) {
            return Err(GitError::ObjectNotFound {
                oid: commit.to_string(),
            });
        }
        self.commits
            .get(commit)
            .cloned()
            .ok_or_else(|| GitError::ObjectNotFound {
                oid: commit.to_string(),
            })
    }

    fn list_tag_references(&self) -> Result<Vec<TagCandidate>, GitError> {
        if self.injected(&FailOn::ListTags) {
            return Err(GitError::Internal {
                message: "tag enumeration failed".into(),
            });
        }
        Ok(self.tags.clone())
    }

    fn peel_annotated_tag(&self, target: &Oid) -> Result<Option<PeeledTag>, GitError> {
        if self.injected(&FailOn::Peel(target.clone())) {
            return Err(GitError::ObjectNotFound {
                oid: target.to_string(),
            });
        }
        Ok(self.tag_objects.get(target).cloned())
    }

    fn abbreviate(&self, commit: &Oid) -> Result<String, GitError> {
        if self.injected(&FailOn::Abbreviate) || !self.commits.contains_key(commit) {
            return Err(GitError::ObjectNotFound {
                oid: commit.to_string(),
            });
        }
        Ok(commit.short(MOCK_ABBREV_LEN).to_string())
    }
}
