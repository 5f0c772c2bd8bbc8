//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$VSTAMP_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/vstamp/config.toml`
//! 3. `~/.vstamp/config.toml`
//!
//! # Repo Config
//!
//! Located at `.git/vstamp/config.toml` (local, untracked) or
//! `vstamp.toml` at the work-tree root (checked in).
//!
//! # Validation
//!
//! Config values are validated after parsing. Enumerated values
//! (`release_mode`, `tag_order`) are rejected by serde at parse time;
//! numeric and free-form values are checked by `validate`.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::{ReleaseMode, TagOrderKind};

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// release_mode = "plain"
/// tag_order = "newest-annotated"
/// max_depth = 10000
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Exact-match formatting rule
    pub release_mode: Option<ReleaseMode>,

    /// Tie-break among tags on one commit
    pub tag_order: Option<TagOrderKind>,

    /// Deepest first-parent ancestor to inspect
    pub max_depth: Option<usize>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_max_depth(self.max_depth)
    }
}

/// Repository configuration.
///
/// # Example
///
/// ```toml
/// prefix = "v"
/// release_mode = "release-branch"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Tag name prefix to match
    pub prefix: Option<String>,

    /// Exact-match formatting rule
    pub release_mode: Option<ReleaseMode>,

    /// Tie-break among tags on one commit
    pub tag_order: Option<TagOrderKind>,

    /// Deepest first-parent ancestor to inspect
    pub max_depth: Option<usize>,
}

impl RepoConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(prefix) = &self.prefix {
            if prefix.chars().any(|c| c.is_whitespace() || c.is_control()) {
                return Err(ConfigError::InvalidValue(format!(
                    "prefix {:?} cannot contain whitespace or control characters",
                    prefix
                )));
            }
        }

        validate_max_depth(self.max_depth)
    }
}

fn validate_max_depth(max_depth: Option<usize>) -> Result<(), ConfigError> {
    if max_depth == Some(0) {
        return Err(ConfigError::InvalidValue(
            "max_depth must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    mod global_config {
        use super::*;

        #[test]
        fn default_is_empty() {
            let config = GlobalConfig::default();
            assert!(config.release_mode.is_none());
            assert!(config.tag_order.is_none());
            assert!(config.max_depth.is_none());
        }

        #[test]
        fn parse_full() {
            let toml = r#"
                release_mode = "release-branch"
                tag_order = "newest-annotated"
                max_depth = 500
            "#;
            let config: GlobalConfig = toml::from_str(toml).unwrap();
            assert_eq!(config.release_mode, Some(ReleaseMode::ReleaseBranch));
            assert_eq!(config.tag_order, Some(TagOrderKind::NewestAnnotated));
            assert_eq!(config.max_depth, Some(500));
            assert!(config.validate().is_ok());
        }

        #[test]
        fn prefix_is_repo_only() {
            let result: Result<GlobalConfig, _> = toml::from_str(r#"prefix = "v""#);
            assert!(result.is_err());
        }

        #[test]
        fn zero_max_depth_rejected() {
            let config = GlobalConfig {
                max_depth: Some(0),
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidValue(_))
            ));
        }
    }

    mod repo_config {
        use super::*;

        #[test]
        fn parse_prefix_and_mode() {
            let toml = r#"
                prefix = "release-"
                release_mode = "plain"
            "#;
            let config: RepoConfig = toml::from_str(toml).unwrap();
            assert_eq!(config.prefix.as_deref(), Some("release-"));
            assert_eq!(config.release_mode, Some(ReleaseMode::Plain));
            assert!(config.validate().is_ok());
        }

        #[test]
        fn unknown_field_rejected() {
            let result: Result<RepoConfig, _> = toml::from_str(r#"trunk = "main""#);
            assert!(result.is_err());
        }

        #[test]
        fn unknown_mode_rejected() {
            let result: Result<RepoConfig, _> = toml::from_str(r#"release_mode = "nightly""#);
            assert!(result.is_err());
        }

        #[test]
        fn whitespace_prefix_rejected() {
            let config = RepoConfig {
                prefix: Some("v 1".into()),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn empty_prefix_allowed() {
            let config = RepoConfig {
                prefix: Some(String::new()),
                ..Default::default()
            };
            assert!(config.validate().is_ok());
        }

        #[test]
        fn serialize_roundtrip() {
            let config = RepoConfig {
                prefix: Some("v".into()),
                release_mode: Some(ReleaseMode::ReleaseBranch),
                tag_order: None,
                max_depth: Some(64),
            };
            let toml = toml::to_string(&config).unwrap();
            let parsed: RepoConfig = toml::from_str(&toml).unwrap();
            assert_eq!(config, parsed);
        }
    }
}
