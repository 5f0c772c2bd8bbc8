//! describe::ancestry
//!
//! Lazy first-parent walk from a starting commit.
//!
//! The walk yields the start commit first, then its first parent, and so
//! on until a root commit. Parents are looked up only when the next
//! element is requested, so a caller that stops at the first tagged
//! commit never reads the rest of history.
//!
//! # Example
//!
//! ```
//! use versionstamp::describe::FirstParentWalk;
//! use versionstamp::describe::mock::MockGraph;
//!
//! let graph = MockGraph::linear(3);
//! let chain: Vec<_> = FirstParentWalk::new(&graph, MockGraph::commit_id(0))
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(chain, vec![
//!     MockGraph::commit_id(0),
//!     MockGraph::commit_id(1),
//!     MockGraph::commit_id(2),
//! ]);
//! ```

use std::collections::HashSet;

use super::traits::{DescribeError, ObjectGraph};
use crate::core::types::Oid;

/// Iterator over first-parent ancestry.
///
/// Yields `Ok(oid)` for each commit at increasing depth. After an `Err`
/// the iterator is exhausted.
pub struct FirstParentWalk<'a, G: ObjectGraph + ?Sized> {
    graph: &'a G,
    /// Commit to yield next; `None` once the walk is over.
    next: Option<Oid>,
    /// Commit yielded last whose parents have not been read yet.
    pending: Option<Oid>,
    seen: HashSet<Oid>,
    depth: usize,
    max_depth: Option<usize>,
}

impl<'a, G: ObjectGraph + ?Sized> FirstParentWalk<'a, G> {
    /// Start a walk at `start` (depth 0).
    pub fn new(graph: &'a G, start: Oid) -> Self {
        Self {
            graph,
            next: Some(start),
            pending: None,
            seen: HashSet::new(),
            depth: 0,
            max_depth: None,
        }
    }

    /// Stop after the commit at depth `max_depth` has been yielded.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    fn advance(&mut self) -> Result<Option<Oid>, DescribeError> {
        let Some(current) = self.pending.take() else {
            return Ok(self.next.take());
        };

        if let Some(limit) = self.max_depth {
            if self.depth > limit {
                log::debug!("first-parent walk truncated after depth {}", limit);
                return Ok(None);
            }
        }

        let parents = self
            .graph
            .parents_of(&current)
            .map_err(DescribeError::GraphAccess)?;
        Ok(parents.into_iter().next())
    }
}

impl<G: ObjectGraph + ?Sized> Iterator for FirstParentWalk<'_, G> {
    type Item = Result<Oid, DescribeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let oid = match self.advance() {
            Ok(Some(oid)) => oid,
            Ok(None) => {
                self.next = None;
                return None;
            }
            Err(e) => {
                self.next = None;
                self.pending = None;
                return Some(Err(e));
            }
        };

        if !self.seen.insert(oid.clone()) {
            self.next = None;
            self.pending = None;
            return Some(Err(DescribeError::CycleDetected { oid }));
        }

        log::trace!("depth {}: {}", self.depth, oid);
        self.pending = Some(oid.clone());
        self.depth += 1;
        Some(Ok(oid))
    }
}
