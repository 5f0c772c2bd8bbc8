//! describe command - Print the version string for HEAD

use std::process::ExitCode;

use anyhow::{Context as _, Result};

use super::{load_config, open_repo};
use crate::cli::Context;
use crate::core::config::Config;
use crate::core::types::{ReleaseMode, TagOrderKind};
use crate::describe::{DescribeEngine, DescribeOptions};
use crate::ui::output;

/// Command-line values that take precedence over configuration.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub prefix: Option<String>,
    pub release_mode: Option<ReleaseMode>,
    pub tag_order: Option<TagOrderKind>,
    pub max_depth: Option<usize>,
}

impl Overrides {
    /// Resolve the effective prefix and options.
    pub fn resolve(self, config: &Config) -> (String, DescribeOptions) {
        let defaults = config.describe_options();
        let prefix = self.prefix.unwrap_or_else(|| config.prefix().to_string());
        let options = DescribeOptions {
            release_mode: self.release_mode.unwrap_or(defaults.release_mode),
            tag_order: self.tag_order.unwrap_or(defaults.tag_order),
            max_depth: self.max_depth.or(defaults.max_depth),
        };
        (prefix, options)
    }
}

/// Describe HEAD of the repository at the working directory.
///
/// Returns exit code 1 when no version can be determined.
pub fn describe(ctx: &Context, overrides: Overrides, json: bool) -> Result<ExitCode> {
    let git = open_repo(ctx)?;
    let config = load_config(ctx, &git)?;
    let (prefix, options) = overrides.resolve(&config);

    log::debug!(
        "describing with prefix {:?}, mode {}, tag order {}",
        prefix,
        options.release_mode,
        options.tag_order
    );

    let Some(description) = DescribeEngine::new(&git).options(options).describe(&prefix) else {
        output::warn("no version could be determined", ctx.verbosity);
        return Ok(ExitCode::FAILURE);
    };

    if json {
        let rendered =
            serde_json::to_string(&description).context("failed to serialize description")?;
        output::result(rendered);
    } else {
        output::result(&description);
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{GlobalConfig, RepoConfig};

    fn configured() -> Config {
        Config::from_parts(
            GlobalConfig {
                tag_order: Some(TagOrderKind::NewestAnnotated),
                ..Default::default()
            },
            Some(RepoConfig {
                prefix: Some("release-".into()),
                release_mode: Some(ReleaseMode::ReleaseBranch),
                max_depth: Some(100),
                ..Default::default()
            }),
        )
    }

    #[test]
    fn config_used_without_flags() {
        let (prefix, options) = Overrides::default().resolve(&configured());
        assert_eq!(prefix, "release-");
        assert_eq!(options.release_mode, ReleaseMode::ReleaseBranch);
        assert_eq!(options.tag_order, TagOrderKind::NewestAnnotated);
        assert_eq!(options.max_depth, Some(100));
    }

    #[test]
    fn flags_override_config() {
        let overrides = Overrides {
            prefix: Some("v".into()),
            release_mode: Some(ReleaseMode::Plain),
            tag_order: Some(TagOrderKind::AnnotatedThenName),
            max_depth: Some(5),
        };
        let (prefix, options) = overrides.resolve(&configured());
        assert_eq!(prefix, "v");
        assert_eq!(options.release_mode, ReleaseMode::Plain);
        assert_eq!(options.tag_order, TagOrderKind::AnnotatedThenName);
        assert_eq!(options.max_depth, Some(5));
    }

    #[test]
    fn empty_prefix_flag_overrides_config() {
        let overrides = Overrides {
            prefix: Some(String::new()),
            ..Default::default()
        };
        let (prefix, _) = overrides.resolve(&configured());
        assert_eq!(prefix, "");
    }

    #[test]
    fn defaults_without_config() {
        let (prefix, options) = Overrides::default().resolve(&Config::default());
        assert_eq!(prefix, "");
        assert_eq!(options, DescribeOptions::default());
    }
}
