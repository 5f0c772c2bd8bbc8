//! Property-based tests for describe.
//!
//! These tests use proptest over in-memory graphs to verify invariants
//! hold across randomly generated histories and tag layouts.

use std::collections::HashSet;

use chrono::DateTime;
use proptest::prelude::*;

use versionstamp::core::types::{ReleaseMode, TagOrderKind};
use versionstamp::describe::mock::MockGraph;
use versionstamp::describe::{DescribeEngine, DescribeOptions, Description, ObjectGraph};

/// A tag to place on a linear history.
#[derive(Debug, Clone)]
struct TagSpec {
    name: String,
    commit: usize,
    annotated: bool,
    time: i64,
}

/// Strategy for tag names drawn from a few prefixes.
fn tag_name() -> impl Strategy<Value = String> {
    "(v|rel-|nightly-)[0-9]{1,2}\\.[0-9]"
}

/// Strategy for up to `max` uniquely named tags on a history of `len` commits.
fn tag_specs(len: usize, max: usize) -> impl Strategy<Value = Vec<TagSpec>> {
    prop::collection::vec(
        (tag_name(), 0..len, any::<bool>(), 0i64..1_000_000),
        0..max,
    )
    .prop_map(|raw| {
        let mut seen = HashSet::new();
        raw.into_iter()
            .filter(|(name, ..)| seen.insert(name.clone()))
            .map(|(name, commit, annotated, time)| TagSpec {
                name,
                commit,
                annotated,
                time,
            })
            .collect()
    })
}

/// A linear history plus tags.
fn history() -> impl Strategy<Value = (usize, Vec<TagSpec>)> {
    (1usize..25).prop_flat_map(|len| (Just(len), tag_specs(len, 8)))
}

fn build(len: usize, tags: &[TagSpec]) -> MockGraph {
    let mut graph = MockGraph::linear(len);
    for tag in tags {
        let commit = MockGraph::commit_id(tag.commit);
        if tag.annotated {
            graph.annotated_tag(&tag.name, commit, DateTime::from_timestamp(tag.time, 0));
        } else {
            graph.lightweight_tag(&tag.name, commit);
        }
    }
    graph
}

fn options(mode: ReleaseMode, order: TagOrderKind) -> DescribeOptions {
    DescribeOptions {
        release_mode: mode,
        tag_order: order,
        max_depth: None,
    }
}

fn release_mode() -> impl Strategy<Value = ReleaseMode> {
    prop_oneof![Just(ReleaseMode::Plain), Just(ReleaseMode::ReleaseBranch)]
}

fn tag_order() -> impl Strategy<Value = TagOrderKind> {
    prop_oneof![
        Just(TagOrderKind::AnnotatedThenName),
        Just(TagOrderKind::NewestAnnotated)
    ]
}

fn prefix() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), Just("v".into()), Just("rel-".into())]
}

proptest! {
    /// A single matching tag at depth `k` on a linear chain.
    #[test]
    fn distance_formula_on_linear_chain(len in 1usize..40, pick in any::<prop::sample::Index>()) {
        let depth = pick.index(len);
        let mut graph = MockGraph::linear(len);
        graph.lightweight_tag("v1.2.3", MockGraph::commit_id(depth));
        let head = graph.abbreviate(&MockGraph::commit_id(0)).unwrap();

        let result = DescribeEngine::new(&graph).describe_string("v");
        let expected = if depth == 0 {
            "v1.2.3".to_string()
        } else {
            format!("v1.2.3-{}-g{}", depth, head)
        };
        prop_assert_eq!(result, Some(expected));
    }

    /// Describe never fails on a well-formed history and is repeatable.
    #[test]
    fn describe_is_total_and_idempotent(
        (len, tags) in history(),
        prefix in prefix(),
        mode in release_mode(),
        order in tag_order(),
    ) {
        let graph = build(len, &tags);
        let engine = DescribeEngine::new(&graph).options(options(mode, order));

        let first = engine.describe(&prefix);
        prop_assert!(first.is_some());
        prop_assert_eq!(engine.describe(&prefix), first);
    }

    /// The order in which tag refs are listed never changes the result.
    #[test]
    fn tag_enumeration_order_is_irrelevant(
        (len, tags) in history(),
        prefix in prefix(),
        order in tag_order(),
        rotate in any::<prop::sample::Index>(),
    ) {
        let graph = build(len, &tags);
        let expected = DescribeEngine::new(&graph)
            .options(options(ReleaseMode::Plain, order))
            .describe(&prefix);

        let mut reversed = build(len, &tags);
        reversed.reverse_tag_enumeration();
        let got = DescribeEngine::new(&reversed)
            .options(options(ReleaseMode::Plain, order))
            .describe(&prefix);
        prop_assert_eq!(&got, &expected);

        let mut rotated = build(len, &tags);
        rotated.reorder_tags(|tags| {
            if !tags.is_empty() {
                let by = rotate.index(tags.len());
                tags.rotate_left(by);
            }
        });
        let got = DescribeEngine::new(&rotated)
            .options(options(ReleaseMode::Plain, order))
            .describe(&prefix);
        prop_assert_eq!(&got, &expected);
    }

    /// Any tag in the result starts with the prefix, and the reported
    /// depth is the nearest tagged commit.
    #[test]
    fn result_tag_matches_prefix_and_is_nearest(
        (len, tags) in history(),
        prefix in prefix(),
    ) {
        let graph = build(len, &tags);
        let nearest = tags.iter().map(|t| t.commit).min();

        match DescribeEngine::new(&graph).describe(&prefix).unwrap() {
            Description::Exact { tag } => {
                prop_assert!(tag.starts_with(&prefix));
                prop_assert_eq!(nearest, Some(0));
            }
            Description::Distance { tag, depth, .. } => {
                prop_assert!(tag.starts_with(&prefix));
                prop_assert_eq!(nearest, Some(depth));
            }
            Description::Untagged { .. } => {
                // Either no tags at all, or the nearest tagged commit's
                // winner does not match.
                if let Some(nearest) = nearest {
                    let all_match = tags
                        .iter()
                        .filter(|t| t.commit == nearest)
                        .all(|t| t.name.starts_with(&prefix));
                    prop_assert!(!all_match);
                }
            }
        }
    }

    /// Tags reachable only through merged side branches are ignored.
    #[test]
    fn side_branch_tags_never_shorten_distance(
        (len, tags) in history(),
        side in prop::collection::vec((any::<prop::sample::Index>(), tag_name()), 0..5),
        prefix in prefix(),
    ) {
        let expected = DescribeEngine::new(&build(len, &tags)).describe(&prefix);

        let mut graph = build(len, &tags);
        for (i, (at, name)) in side.iter().enumerate() {
            // Turn main-line commit `m` into a merge whose second parent
            // is a tagged side commit hanging off the root.
            let m = at.index(len);
            let mut parents = graph.parents_of(&MockGraph::commit_id(m)).unwrap();
            if parents.is_empty() {
                // The root cannot become a merge without a first parent
                continue;
            }
            let side_commit = MockGraph::commit_id(1_000 + i);
            graph.add_commit(side_commit.clone(), vec![MockGraph::commit_id(len - 1)]);
            parents.push(side_commit.clone());
            graph.add_commit(MockGraph::commit_id(m), parents);
            graph.lightweight_tag(&format!("side-{}", name), side_commit);
        }

        prop_assert_eq!(DescribeEngine::new(&graph).describe(&prefix), expected);
    }
}
