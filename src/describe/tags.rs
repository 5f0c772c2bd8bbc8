//! describe::tags
//!
//! Commit → tag index with a deterministic tie-break.
//!
//! # Overview
//!
//! Every tag reference is peeled to the commit it ultimately names. When
//! several tags land on one commit, a [`TagOrder`] picks the single tag
//! that `describe --tags --exact-match` on that commit would report.
//!
//! # Tie-break
//!
//! [`AnnotatedThenName`] is the default policy:
//!
//! 1. Annotated tags before lightweight tags
//! 2. Lexicographically greatest name first
//! 3. Target id as a last resort, so the order is total
//!
//! [`NewestAnnotated`] inserts "newer tagger date first" between steps 1
//! and 2, matching `git describe`'s preference among annotated tags.
//!
//! Because both are strict total orders, the winner does not depend on
//! the order in which references are enumerated.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::traits::{DescribeError, ObjectGraph};
use crate::core::types::{Oid, TagOrderKind};

/// Whether a tag wraps its own tag object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TagKind {
    /// Tag object pointing at a commit.
    Annotated,
    /// Ref pointing directly at a commit.
    Lightweight,
}

/// A tag resolved to the commit it targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagRef {
    /// Tag name without `refs/tags/`
    pub name: String,
    /// Peeled commit id
    pub target: Oid,
    /// Annotated or lightweight
    pub kind: TagKind,
    /// Tagger timestamp (annotated tags only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagger_time: Option<DateTime<Utc>>,
}

impl TagRef {
    /// Create a lightweight tag ref.
    pub fn lightweight(name: impl Into<String>, target: Oid) -> Self {
        Self {
            name: name.into(),
            target,
            kind: TagKind::Lightweight,
            tagger_time: None,
        }
    }

    /// Create an annotated tag ref.
    pub fn annotated(
        name: impl Into<String>,
        target: Oid,
        tagger_time: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            name: name.into(),
            target,
            kind: TagKind::Annotated,
            tagger_time,
        }
    }

    /// Check if this is an annotated tag.
    pub fn is_annotated(&self) -> bool {
        self.kind == TagKind::Annotated
    }
}

/// Pluggable tie-break for tags sharing a commit.
///
/// `compare(a, b) == Ordering::Less` means `a` is preferred. Implementations
/// must be strict total orders: distinct tag refs never compare `Equal`.
pub trait TagOrder {
    fn compare(&self, a: &TagRef, b: &TagRef) -> Ordering;
}

/// Annotated over lightweight, then greatest name.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotatedThenName;

impl TagOrder for AnnotatedThenName {
    fn compare(&self, a: &TagRef, b: &TagRef) -> Ordering {
        kind_rank(a)
            .cmp(&kind_rank(b))
            .then_with(|| b.name.cmp(&a.name))
            .then_with(|| a.target.cmp(&b.target))
    }
}

/// Annotated over lightweight, newest tagger date, then greatest name.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewestAnnotated;

impl TagOrder for NewestAnnotated {
    fn compare(&self, a: &TagRef, b: &TagRef) -> Ordering {
        kind_rank(a)
            .cmp(&kind_rank(b))
            .then_with(|| match (a.tagger_time, b.tagger_time) {
                (Some(ta), Some(tb)) => tb.cmp(&ta),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
            .then_with(|| AnnotatedThenName.compare(a, b))
    }
}

fn kind_rank(tag: &TagRef) -> u8 {
    match tag.kind {
        TagKind::Annotated => 0,
        TagKind::Lightweight => 1,
    }
}

impl TagOrderKind {
    /// The comparator this policy names.
    pub fn comparator(&self) -> Box<dyn TagOrder> {
        match self {
            TagOrderKind::AnnotatedThenName => Box::new(AnnotatedThenName),
            TagOrderKind::NewestAnnotated => Box::new(NewestAnnotated),
        }
    }
}

/// Mapping from commit to the single winning tag on it.
///
/// Built once per describe call and read-only afterwards. Every value's
/// `target` equals the key it is stored under.
#[derive(Debug, Clone, Default)]
pub struct TagIndex {
    by_commit: HashMap<Oid, TagRef>,
}

impl TagIndex {
    /// Enumerate, peel, and index every tag in `graph`.
    ///
    /// # Errors
    ///
    /// [`DescribeError::GraphAccess`] if enumeration or peeling fails.
    pub fn build<G>(graph: &G, order: &dyn TagOrder) -> Result<Self, DescribeError>
    where
        G: ObjectGraph + ?Sized,
    {
        let candidates = graph
            .list_tag_references()
            .map_err(DescribeError::GraphAccess)?;

        let mut refs = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let tag = match graph
                .peel_annotated_tag(&candidate.target)
                .map_err(DescribeError::GraphAccess)?
            {
                Some(peeled) => TagRef::annotated(candidate.name, peeled.target, peeled.tagger_time),
                None => TagRef::lightweight(candidate.name, candidate.target),
            };
            refs.push(tag);
        }

        Ok(Self::from_refs(refs, order))
    }

    /// Index already-peeled tag refs.
    pub fn from_refs(refs: impl IntoIterator<Item = TagRef>, order: &dyn TagOrder) -> Self {
        let mut index = Self::default();
        for tag in refs {
            index.insert(tag, order);
        }
        index
    }

    /// Insert `tag`, keeping the existing entry unless `tag` is preferred.
    pub fn insert(&mut self, tag: TagRef, order: &dyn TagOrder) {
        match self.by_commit.entry(tag.target.clone()) {
            Entry::Occupied(mut slot) => {
                if order.compare(&tag, slot.get()) == Ordering::Less {
                    log::trace!(
                        "tag {} replaces {} on {}",
                        tag.name,
                        slot.get().name,
                        tag.target.short(7)
                    );
                    slot.insert(tag);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(tag);
            }
        }
    }

    /// The winning tag on `commit`, if any.
    pub fn get(&self, commit: &Oid) -> Option<&TagRef> {
        self.by_commit.get(commit)
    }

    /// Number of tagged commits.
    pub fn len(&self) -> usize {
        self.by_commit.len()
    }

    /// Check if no commit is tagged.
    pub fn is_empty(&self) -> bool {
        self.by_commit.is_empty()
    }

    /// Winning tags sorted by name, for display.
    pub fn sorted_by_name(&self) -> Vec<&TagRef> {
        let mut tags: Vec<&TagRef> = self.by_commit.values().collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.target.cmp(&b.target)));
        tags
    }
}
