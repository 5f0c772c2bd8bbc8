//! tags command - List the commit to tag index

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use serde::Serialize;

use super::{load_config, open_repo};
use crate::cli::Context;
use crate::core::types::TagOrderKind;
use crate::describe::{TagIndex, TagRef};
use crate::ui::output;

/// One line of `vstamp tags --json`.
#[derive(Debug, Serialize)]
struct TagEntry<'a> {
    #[serde(flatten)]
    tag: &'a TagRef,
    abbrev: String,
}

/// List the tag chosen for each tagged commit, sorted by tag name.
///
/// Without `prefix`, the configured prefix applies.
pub fn tags(
    ctx: &Context,
    prefix: Option<&str>,
    tag_order: Option<TagOrderKind>,
    json: bool,
) -> Result<ExitCode> {
    let git = open_repo(ctx)?;
    let config = load_config(ctx, &git)?;
    let order = tag_order.unwrap_or_else(|| config.tag_order()).comparator();

    let index = TagIndex::build(&git, order.as_ref()).context("failed to read tags")?;
    let prefix = prefix.unwrap_or_else(|| config.prefix());

    let mut entries = Vec::new();
    for tag in index.sorted_by_name() {
        if !tag.name.starts_with(prefix) {
            continue;
        }
        let abbrev = git
            .abbreviate(&tag.target)
            .with_context(|| format!("failed to abbreviate {}", tag.target))?;
        entries.push(TagEntry { tag, abbrev });
    }

    if json {
        let rendered = serde_json::to_string_pretty(&entries).context("failed to serialize tags")?;
        output::result(rendered);
        return Ok(ExitCode::SUCCESS);
    }

    if entries.is_empty() {
        output::print("No tags.", ctx.verbosity);
        return Ok(ExitCode::SUCCESS);
    }

    let lines: Vec<String> = entries
        .iter()
        .map(|entry| {
            let kind = if entry.tag.is_annotated() {
                "annotated"
            } else {
                "lightweight"
            };
            format!("{} {} ({})", entry.abbrev, entry.tag.name, kind)
        })
        .collect();
    output::result(output::format_list(&lines, ""));

    Ok(ExitCode::SUCCESS)
}
