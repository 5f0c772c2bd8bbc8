//! describe
//!
//! First-parent `git describe --tags` for build tooling.
//!
//! # Architecture
//!
//! - `traits` - [`ObjectGraph`] capability and [`DescribeError`]
//! - `ancestry` - [`FirstParentWalk`], lazy first-parent iterator
//! - `tags` - [`TagIndex`] and the [`TagOrder`] tie-break
//! - `engine` - [`DescribeEngine`], scan and formatting
//! - [`mock`] - In-memory graph for deterministic testing
//!
//! The engine never opens a repository itself. Callers inject a graph,
//! usually [`Git`](crate::git::Git).
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use versionstamp::core::types::ReleaseMode;
//! use versionstamp::describe::describe;
//! use versionstamp::git::Git;
//!
//! let git = Git::open(Path::new(".")).unwrap();
//! match describe(&git, "v", ReleaseMode::Plain) {
//!     Some(version) => println!("version {}", version),
//!     None => println!("no version could be determined"),
//! }
//! ```

mod ancestry;
mod engine;
pub mod mock;
mod tags;
mod traits;

pub use ancestry::FirstParentWalk;
pub use engine::{DescribeEngine, DescribeOptions};
pub use tags::{AnnotatedThenName, NewestAnnotated, TagIndex, TagKind, TagOrder, TagRef};
pub use traits::{DescribeError, ObjectGraph, PeeledTag, TagCandidate};

use serde::Serialize;

use crate::core::types::ReleaseMode;

/// Outcome of a successful describe.
///
/// `Display` renders the version string:
///
/// ```
/// use versionstamp::describe::Description;
///
/// let exact = Description::Exact { tag: "v1.2".into() };
/// assert_eq!(exact.to_string(), "v1.2");
///
/// let distance = Description::Distance {
///     tag: "v1.2".into(),
///     depth: 3,
///     abbrev: "abc1234".into(),
/// };
/// assert_eq!(distance.to_string(), "v1.2-3-gabc1234");
///
/// let untagged = Description::Untagged { abbrev: "abc1234".into() };
/// assert_eq!(untagged.to_string(), "abc1234");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Description {
    /// HEAD carries the tag.
    Exact {
        /// Tag name
        tag: String,
    },
    /// Nearest matching tag is `depth` first-parent steps behind HEAD.
    Distance {
        /// Tag name
        tag: String,
        /// First-parent distance from HEAD (0 only in release-branch mode)
        depth: usize,
        /// Abbreviated HEAD id
        abbrev: String,
    },
    /// No qualifying tag was found.
    Untagged {
        /// Abbreviated HEAD id
        abbrev: String,
    },
}

impl Description {
    /// Name of the tag the description is based on, if any.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Description::Exact { tag } | Description::Distance { tag, .. } => Some(tag.as_str()),
            Description::Untagged { .. } => None,
        }
    }

    /// Distance from the tag; `Some(0)` for an exact match.
    pub fn depth(&self) -> Option<usize> {
        match self {
            Description::Exact { .. } => Some(0),
            Description::Distance { depth, .. } => Some(*depth),
            Description::Untagged { .. } => None,
        }
    }
}

impl std::fmt::Display for Description {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Description::Exact { tag } => write!(f, "{}", tag),
            Description::Distance { tag, depth, abbrev } => {
                write!(f, "{}-{}-g{}", tag, depth, abbrev)
            }
            Description::Untagged { abbrev } => write!(f, "{}", abbrev),
        }
    }
}

/// Describe HEAD of `graph` with default options and the given mode.
///
/// Returns `None` when no version can be determined; never fails.
pub fn describe<G>(graph: &G, prefix: &str, release_mode: ReleaseMode) -> Option<String>
where
    G: ObjectGraph + ?Sized,
{
    DescribeEngine::new(graph)
        .options(DescribeOptions::with_release_mode(release_mode))
        .describe_string(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let exact = Description::Exact { tag: "v1".into() };
        assert_eq!(exact.tag(), Some("v1"));
        assert_eq!(exact.depth(), Some(0));

        let untagged = Description::Untagged {
            abbrev: "abc1234".into(),
        };
        assert_eq!(untagged.tag(), None);
        assert_eq!(untagged.depth(), None);
    }

    #[test]
    fn json_shape() {
        let distance = Description::Distance {
            tag: "v1.0".into(),
            depth: 2,
            abbrev: "abc1234".into(),
        };
        let json = serde_json::to_value(&distance).unwrap();
        assert_eq!(json["kind"], "distance");
        assert_eq!(json["tag"], "v1.0");
        assert_eq!(json["depth"], 2);
        assert_eq!(json["abbrev"], "abc1234");
    }

    #[test]
    fn concrete_scenarios() {
        use mock::MockGraph;

        // C0 (HEAD) -> C1 -> C2 (root), v1.0 on C2.
        let mut graph = MockGraph::linear(3);
        graph.lightweight_tag("v1.0", MockGraph::commit_id(2));
        let head = graph.abbreviate(&MockGraph::commit_id(0)).unwrap();
        assert_eq!(
            describe(&graph, "v", ReleaseMode::Plain),
            Some(format!("v1.0-2-g{}", head))
        );

        // Same graph, v1.0 on HEAD, release-branch mode.
        let mut graph = MockGraph::linear(3);
        graph.lightweight_tag("v1.0", MockGraph::commit_id(0));
        assert_eq!(
            describe(&graph, "v", ReleaseMode::ReleaseBranch),
            Some(format!("v1.0-0-g{}", head))
        );
    }
}
