//! describe::engine
//!
//! Nearest-tag scan and version formatting.
//!
//! # Algorithm
//!
//! 1. Resolve HEAD (failure: [`DescribeError::RepositoryUnavailable`])
//! 2. Build the [`TagIndex`]
//! 3. Walk first-parent ancestry from HEAD; stop at the first commit with
//!    an index entry
//! 4. If that tag does not start with the prefix, give up on tags
//!    entirely (the scan does not skip ahead to older matching tags)
//! 5. Depth 0 renders the bare tag unless the release mode forces long
//!    form; any other depth renders `{tag}-{depth}-g{abbrev(HEAD)}`
//! 6. No qualifying tag renders the abbreviated HEAD id
//!
//! [`DescribeEngine::describe`] absorbs every error into `None`; a version
//! string is best-effort and must never fail a build.

use log::debug;

use super::ancestry::FirstParentWalk;
use super::tags::TagIndex;
use super::traits::{DescribeError, ObjectGraph};
use super::Description;
use crate::core::types::{ReleaseMode, TagOrderKind};

/// Knobs for a describe call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DescribeOptions {
    /// Exact-match formatting rule
    pub release_mode: ReleaseMode,
    /// Tie-break among tags on one commit
    pub tag_order: TagOrderKind,
    /// Deepest first-parent ancestor to inspect (`None` = unbounded)
    pub max_depth: Option<usize>,
}

impl DescribeOptions {
    /// Options with the given release mode and defaults otherwise.
    pub fn with_release_mode(release_mode: ReleaseMode) -> Self {
        Self {
            release_mode,
            ..Self::default()
        }
    }
}

/// Describes HEAD of an injected object graph.
///
/// Holds no state between calls: every describe builds its own tag index
/// and ancestry walk and drops them on return.
///
/// # Example
///
/// ```
/// use versionstamp::core::types::ReleaseMode;
/// use versionstamp::describe::{DescribeEngine, DescribeOptions, Description};
/// use versionstamp::describe::mock::MockGraph;
///
/// let mut graph = MockGraph::linear(2);
/// graph.lightweight_tag("v2.1", MockGraph::commit_id(0));
///
/// let engine = DescribeEngine::new(&graph)
///     .options(DescribeOptions::with_release_mode(ReleaseMode::ReleaseBranch));
/// assert_eq!(
///     engine.describe("v"),
///     Some(Description::Exact { tag: "v2.1".into() })
/// );
/// ```
pub struct DescribeEngine<'a, G: ObjectGraph + ?Sized> {
    graph: &'a G,
    options: DescribeOptions,
}

impl<'a, G: ObjectGraph + ?Sized> DescribeEngine<'a, G> {
    /// Create an engine with default options.
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            options: DescribeOptions::default(),
        }
    }

    /// Replace the engine's options.
    pub fn options(mut self, options: DescribeOptions) -> Self {
        self.options = options;
        self
    }

    /// Describe HEAD, reporting why when no version can be produced.
    ///
    /// # Errors
    ///
    /// - [`DescribeError::RepositoryUnavailable`] if HEAD cannot be resolved
    /// - [`DescribeError::GraphAccess`] if a commit or tag cannot be read
    /// - [`DescribeError::CycleDetected`] if first-parent history loops
    pub fn try_describe(&self, prefix: &str) -> Result<Description, DescribeError> {
        let head = self
            .graph
            .resolve_head()
            .map_err(DescribeError::RepositoryUnavailable)?;

        let order = self.options.tag_order.comparator();
        let index = TagIndex::build(self.graph, order.as_ref())?;
        debug!("indexed {} tagged commit(s)", index.len());

        let abbreviate = || {
            self.graph
                .abbreviate(&head)
                .map_err(DescribeError::GraphAccess)
        };

        let walk = FirstParentWalk::new(self.graph, head.clone())
            .with_max_depth(self.options.max_depth);

        for (depth, commit) in walk.enumerate() {
            let commit = commit?;
            let Some(tag) = index.get(&commit) else {
                continue;
            };

            if !tag.name.starts_with(prefix) {
                debug!(
                    "nearest tag {} at depth {} does not match prefix {:?}",
                    tag.name, depth, prefix
                );
                break;
            }

            if depth == 0 && !self.options.release_mode.forces_long_form(&tag.name) {
                return Ok(Description::Exact {
                    tag: tag.name.clone(),
                });
            }

            return Ok(Description::Distance {
                tag: tag.name.clone(),
                depth,
                abbrev: abbreviate()?,
            });
        }

        Ok(Description::Untagged {
            abbrev: abbreviate()?,
        })
    }

    /// Describe HEAD, or `None` if no version can be determined.
    ///
    /// Errors are logged at debug level and never propagated.
    pub fn describe(&self, prefix: &str) -> Option<Description> {
        match self.try_describe(prefix) {
            Ok(description) => Some(description),
            Err(e) => {
                debug!("describe failed: {}", e);
                None
            }
        }
    }

    /// Rendered form of [`describe`](Self::describe).
    pub fn describe_string(&self, prefix: &str) -> Option<String> {
        self.describe(prefix).map(|d| d.to_string())
    }
}
