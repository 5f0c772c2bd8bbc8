//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`Oid`] - Git object identifier (SHA)
//! - [`ReleaseMode`] - Exact-match formatting rule for tags on HEAD
//! - [`TagOrderKind`] - Named tie-break policy for tags sharing a commit
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use versionstamp::core::types::{Oid, ReleaseMode};
//!
//! let oid = Oid::new("abc123def4567890abc123def4567890abc12345").unwrap();
//! assert_eq!(oid.short(7), "abc123d");
//!
//! assert!(Oid::new("not-a-sha").is_err());
//! assert_eq!(ReleaseMode::default(), ReleaseMode::Plain);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid object id: {0}")]
    InvalidOid(String),

    #[error("unknown release mode: {0}")]
    UnknownReleaseMode(String),

    #[error("unknown tag order: {0}")]
    UnknownTagOrder(String),
}

/// A Git object identifier (SHA-1 or SHA-256).
///
/// OIDs are normalized to lowercase for consistency.
///
/// # Example
///
/// ```
/// use versionstamp::core::types::Oid;
///
/// // Create from hex string (normalized to lowercase)
/// let oid = Oid::new("ABC123DEF4567890ABC123DEF4567890ABC12345").unwrap();
/// assert_eq!(oid.as_str(), "abc123def4567890abc123def4567890abc12345");
///
/// // Get abbreviated form
/// assert_eq!(oid.short(7), "abc123d");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Oid(String);

impl Oid {
    /// Create a new validated object id.
    ///
    /// The OID is normalized to lowercase.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidOid` if the string is not a valid hex OID.
    pub fn new(oid: impl Into<String>) -> Result<Self, TypeError> {
        let oid = oid.into().to_ascii_lowercase();
        Self::validate(&oid)?;
        Ok(Self(oid))
    }

    /// Get an abbreviated form of the OID.
    ///
    /// Returns the first `len` characters. If `len` exceeds the OID length,
    /// returns the full OID. This is a plain prefix with no collision
    /// awareness; repository-backed abbreviation lives behind
    /// [`ObjectGraph::abbreviate`](crate::describe::ObjectGraph::abbreviate).
    ///
    /// # Example
    ///
    /// ```
    /// use versionstamp::core::types::Oid;
    ///
    /// let oid = Oid::new("abc123def4567890abc123def4567890abc12345").unwrap();
    /// assert_eq!(oid.short(7), "abc123d");
    /// assert_eq!(oid.short(4), "abc1");
    /// ```
    pub fn short(&self, len: usize) -> &str {
        let end = len.min(self.0.len());
        &self.0[..end]
    }

    /// Validate an object id.
    fn validate(oid: &str) -> Result<(), TypeError> {
        // SHA-1 is 40 hex chars, SHA-256 is 64
        if oid.len() != 40 && oid.len() != 64 {
            return Err(TypeError::InvalidOid(format!(
                "expected 40 or 64 hex characters, got {}",
                oid.len()
            )));
        }
        if !oid.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidOid(
                "object id must be hexadecimal".into(),
            ));
        }
        Ok(())
    }

    /// Get the object id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Oid {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Oid> for String {
    fn from(oid: Oid) -> Self {
        oid.0
    }
}

impl AsRef<str> for Oid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Oid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How an exact tag match on HEAD is rendered.
///
/// In `ReleaseBranch` mode a tag ending in `.0` on HEAD is rendered in
/// long form (`v1.0-0-gabc1234`) so that the first commit of a release
/// branch is distinguishable from the release itself.
///
/// # Example
///
/// ```
/// use versionstamp::core::types::ReleaseMode;
///
/// let mode: ReleaseMode = "release-branch".parse().unwrap();
/// assert_eq!(mode, ReleaseMode::ReleaseBranch);
/// assert_eq!(mode.as_str(), "release-branch");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReleaseMode {
    /// Exact matches are always rendered as the bare tag name.
    #[default]
    Plain,
    /// Exact matches on `.0` tags are rendered in long form.
    ReleaseBranch,
}

impl ReleaseMode {
    /// Configuration spelling of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseMode::Plain => "plain",
            ReleaseMode::ReleaseBranch => "release-branch",
        }
    }

    /// Whether an exact match on `tag` must be rendered in long form.
    pub fn forces_long_form(&self, tag: &str) -> bool {
        matches!(self, ReleaseMode::ReleaseBranch) && tag.ends_with(".0")
    }
}

impl std::str::FromStr for ReleaseMode {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(ReleaseMode::Plain),
            "release-branch" => Ok(ReleaseMode::ReleaseBranch),
            other => Err(TypeError::UnknownReleaseMode(other.to_string())),
        }
    }
}

impl std::fmt::Display for ReleaseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Named tie-break policy for several tags on one commit.
///
/// Maps onto the [`TagOrder`](crate::describe::TagOrder) implementations
/// so the policy can be chosen from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TagOrderKind {
    /// Annotated over lightweight, then greatest name.
    #[default]
    AnnotatedThenName,
    /// Annotated over lightweight, then newest tagger date, then greatest name.
    NewestAnnotated,
}

impl TagOrderKind {
    /// Configuration spelling of this policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            TagOrderKind::AnnotatedThenName => "annotated-then-name",
            TagOrderKind::NewestAnnotated => "newest-annotated",
        }
    }
}

impl std::str::FromStr for TagOrderKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "annotated-then-name" => Ok(TagOrderKind::AnnotatedThenName),
            "newest-annotated" => Ok(TagOrderKind::NewestAnnotated),
            other => Err(TypeError::UnknownTagOrder(other.to_string())),
        }
    }
}

impl std::fmt::Display for TagOrderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
