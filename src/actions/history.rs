// SPDX-FileCopyrightText: 2026 Kei Watanabe <kei.wtnb.dev@gmail.com>
// SPDX-License-Identifier: MIT

//! `history:` category, including the nested `history:edit:` one.

use crate::{config::Settings, runner::Git};

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, Subcommand)]
pub enum HistoryAction {
    /// Show commit history in various format.
    Show(ShowOptions),

    /// Show commits not uploaded yet.
    Notuploaded,

    /// Edit commit history with `git rebase -i`.
    #[command(subcommand)]
    Edit(EditAction),
}

#[derive(Debug, Clone, Args)]
pub struct ShowOptions {
    /// Paths to filter history by.
    #[arg(value_name = "path")]
    pub paths: Vec<String>,

    /// Show history of all branches.
    #[arg(short, long)]
    pub all: bool,

    /// default/compact/detailed/graph.
    #[arg(short = 'F', long, value_name = "format", default_value = "default")]
    pub format: String,

    /// Show author name before '@' of email address (only for 'graph' format).
    #[arg(short = 'u', long)]
    pub author: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum EditAction {
    /// Start `git rebase -i` to edit commit history.
    Start(StartOptions),

    /// Resume (= continue) suspended `git rebase -i`.
    Resume,

    /// Skip current commit and resume.
    Skip,

    /// Cancel (or abort) `git rebase -i`.
    Cancel,
}

#[derive(Debug, Clone, Args)]
pub struct StartOptions {
    /// Commit to start editing from.
    #[arg(value_name = "commit")]
    pub commit: Option<String>,

    /// Edit last N commits.
    #[arg(short = 'n', long = "num", value_name = "N")]
    pub count: Option<u32>,
}

impl HistoryAction {
    pub fn run(self, git: &Git, settings: &Settings) -> Result<()> {
        match self {
            Self::Show(opts) => run_show(git, settings, opts),
            Self::Notuploaded => Ok(git.run(["cherry", "-v"])?),
            Self::Edit(action) => match action {
                EditAction::Start(opts) => edit_start(git, opts.commit, opts.count),
                EditAction::Resume => Ok(git.run(["rebase", "--continue"])?),
                EditAction::Skip => Ok(git.run(["rebase", "--skip"])?),
                EditAction::Cancel => Ok(git.run(["rebase", "--abort"])?),
            },
        }
    }
}

fn run_show(git: &Git, settings: &Settings, opts: ShowOptions) -> Result<()> {
    let mut args = vec!["log".to_owned()];
    if opts.all {
        args.push("--all".to_owned());
    }
    args.extend(format_options(settings, &opts.format, opts.author)?);
    args.extend(opts.paths);

    // The pager may quit before git is done writing; not an error.
    git.run_ok(args)?;

    Ok(())
}

/// Extra `git log` options for a named history format.
pub fn format_options(settings: &Settings, format: &str, author: bool) -> Result<Vec<String>> {
    let options = match format {
        "default" => Vec::new(),
        "compact" => vec!["--oneline".to_owned()],
        "detailed" => vec!["--format=fuller".to_owned()],
        "graph" => {
            let mut fmt = settings.history_graph_format.clone();
            if !author {
                fmt = author_placeholder()
                    .replace(&fmt, " ")
                    .into_owned();
            }
            let mut options = vec![format!("--format={fmt}")];
            options.extend(settings.history_graph_options.iter().cloned());
            options
        }
        unknown => bail!("{unknown}: Unknown format."),
    };

    Ok(options)
}

// Matches the author-name placeholder of a log format, with surrounding
// decoration, e.g. ` <%al> `.
fn author_placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r" ?<?%a[eEnNlL]>? ?").expect("valid regex"))
}

/// Start an interactive rebase from a commit or the last N commits.
///
/// Also reachable from `commit:fixup -e`.
pub fn edit_start(git: &Git, commit: Option<String>, count: Option<u32>) -> Result<()> {
    let arg = match (commit, count) {
        (Some(_), Some(_)) => bail!("Commit-id and `-n` option are exclusive."),
        (Some(commit), None) => format!("{commit}^"),
        (None, Some(count)) => format!("HEAD~{count}"),
        (None, None) => bail!("Commit-id or `-n` option required."),
    };
    git.run(["rebase", "-i", "--autosquash", arg.as_str()])?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn named_formats_map_to_log_options() {
        let settings = Settings::default();
        assert_eq!(
            format_options(&settings, "default", false).unwrap(),
            Vec::<String>::new()
        );
        assert_eq!(
            format_options(&settings, "compact", false).unwrap(),
            vec!["--oneline"]
        );
        assert_eq!(
            format_options(&settings, "detailed", false).unwrap(),
            vec!["--format=fuller"]
        );
    }

    #[test]
    fn graph_format_strips_author_placeholder_by_default() {
        let settings = Settings::default();
        let options = format_options(&settings, "graph", false).unwrap();
        assert_eq!(
            options,
            vec![
                "--format=%C(auto)%h %ad | %d %s",
                "--graph",
                "--date=short",
                "--decorate",
            ]
        );
    }

    #[test]
    fn graph_format_keeps_author_placeholder_on_request() {
        let settings = Settings::default();
        let options = format_options(&settings, "graph", true).unwrap();
        assert_eq!(options[0], "--format=%C(auto)%h %ad <%al> | %d %s");
    }

    #[test]
    fn unknown_formats_are_reported() {
        let settings = Settings::default();
        let error = format_options(&settings, "fancy", false).unwrap_err();
        assert_eq!(error.to_string(), "fancy: Unknown format.");
    }
}
