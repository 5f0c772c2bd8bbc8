//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! versionstamp has two configuration scopes:
//! - **Global**: User-level defaults
//! - **Repo**: Repository-level settings, including the tag prefix
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$VSTAMP_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/vstamp/config.toml`
//! 3. `~/.vstamp/config.toml`
//!
//! # Repo Config Locations
//!
//! Searched in order:
//! 1. `.git/vstamp/config.toml` (local, never committed)
//! 2. `vstamp.toml` in the work-tree root (checked in with the project)
//!
//! # Example
//!
//! ```no_run
//! use versionstamp::core::config::Config;
//! use versionstamp::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new(".")).unwrap();
//! let result = Config::load(Some(&git.info())).unwrap();
//! let config = result.config;
//!
//! println!("Prefix: {:?}", config.prefix());
//! println!("Release mode: {}", config.release_mode());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, RepoConfig};

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::core::types::{ReleaseMode, TagOrderKind};
use crate::describe::DescribeOptions;
use crate::git::RepoInfo;

/// File name of the checked-in repo config.
pub const TRACKED_CONFIG_FILE: &str = "vstamp.toml";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// This struct provides accessor methods that apply precedence rules
/// automatically. Repo config overrides global config.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Repository configuration (if in a repo)
    pub repo: Option<RepoConfig>,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
    /// Path to the repo config file (if loaded)
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `repo` is provided, also loads repo-specific config.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed.
    /// Missing config files are not an error (defaults are used).
    pub fn load(repo: Option<&RepoInfo>) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let (global, global_path) = Self::load_global()?;

        let (repo, repo_path) = match repo {
            Some(info) => Self::load_repo(info, &mut warnings)?,
            None => (None, None),
        };

        global.validate()?;
        if let Some(ref r) = repo {
            r.validate()?;
        }

        Ok(ConfigLoadResult {
            config: Config {
                global,
                repo,
                global_path,
                repo_path,
            },
            warnings,
        })
    }

    /// Load global configuration from standard locations.
    fn load_global() -> Result<(GlobalConfig, Option<PathBuf>), ConfigError> {
        // 1. Check $VSTAMP_CONFIG
        if let Ok(path) = std::env::var("VSTAMP_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                let config = read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        // 2. Check $XDG_CONFIG_HOME/vstamp/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("vstamp/config.toml");
            if path.exists() {
                let config = read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        // 3. Check ~/.vstamp/config.toml
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".vstamp/config.toml");
            if path.exists() {
                let config = read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        Ok((GlobalConfig::default(), None))
    }

    /// Load repository configuration from standard locations.
    fn load_repo(
        info: &RepoInfo,
        warnings: &mut Vec<ConfigWarning>,
    ) -> Result<(Option<RepoConfig>, Option<PathBuf>), ConfigError> {
        let local = Self::local_config_path(&info.git_dir);
        let tracked = info
            .work_dir
            .as_deref()
            .map(|dir| dir.join(TRACKED_CONFIG_FILE))
            .filter(|path| path.exists());

        // 1. Check .git/vstamp/config.toml
        if local.exists() {
            if let Some(tracked) = tracked {
                warnings.push(ConfigWarning {
                    message: format!(
                        "'{}' is shadowed by local config '{}'",
                        tracked.display(),
                        local.display()
                    ),
                    path: tracked,
                });
            }
            let config = read_config(&local)?;
            return Ok((Some(config), Some(local)));
        }

        // 2. Check vstamp.toml in the work tree
        if let Some(tracked) = tracked {
            let config = read_config(&tracked)?;
            return Ok((Some(config), Some(tracked)));
        }

        Ok((None, None))
    }

    /// Build a config from already-parsed parts, with no backing files.
    pub fn from_parts(global: GlobalConfig, repo: Option<RepoConfig>) -> Self {
        Self {
            global,
            repo,
            global_path: None,
            repo_path: None,
        }
    }

    /// Get the path of the local (untracked) repo config.
    ///
    /// Returns `<git_dir>/vstamp/config.toml`.
    pub fn local_config_path(git_dir: &Path) -> PathBuf {
        git_dir.join("vstamp/config.toml")
    }

    /// Path of the global config file that was loaded, if any.
    pub fn global_path(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Path of the repo config file that was loaded, if any.
    pub fn repo_path(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Get the tag name prefix.
    ///
    /// Defaults to `""` (every tag matches) if not configured.
    pub fn prefix(&self) -> &str {
        self.repo
            .as_ref()
            .and_then(|r| r.prefix.as_deref())
            .unwrap_or("")
    }

    /// Get the release mode.
    ///
    /// Defaults to [`ReleaseMode::Plain`] if not configured.
    pub fn release_mode(&self) -> ReleaseMode {
        self.repo
            .as_ref()
            .and_then(|r| r.release_mode)
            .or(self.global.release_mode)
            .unwrap_or_default()
    }

    /// Get the tag tie-break policy.
    ///
    /// Defaults to [`TagOrderKind::AnnotatedThenName`] if not configured.
    pub fn tag_order(&self) -> TagOrderKind {
        self.repo
            .as_ref()
            .and_then(|r| r.tag_order)
            .or(self.global.tag_order)
            .unwrap_or_default()
    }

    /// Get the ancestry depth limit.
    ///
    /// Defaults to unbounded (`None`) if not configured.
    pub fn max_depth(&self) -> Option<usize> {
        self.repo
            .as_ref()
            .and_then(|r| r.max_depth)
            .or(self.global.max_depth)
    }

    /// Describe options with precedence applied.
    pub fn describe_options(&self) -> DescribeOptions {
        DescribeOptions {
            release_mode: self.release_mode(),
            tag_order: self.tag_order(),
            max_depth: self.max_depth(),
        }
    }
}

/// Read and parse a config file.
fn read_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
