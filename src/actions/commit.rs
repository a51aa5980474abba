// SPDX-FileCopyrightText: 2026 Kei Watanabe <kei.wtnb.dev@gmail.com>
// SPDX-License-Identifier: MIT

//! `commit:` category.

use crate::{actions::history, runner::Git};

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

#[derive(Debug, Clone, Subcommand)]
pub enum CommitAction {
    /// Create a new commit.
    Create(CreateOptions),

    /// Correct the last commit.
    Correct(CorrectOptions),

    /// Correct the previous commit.
    Fixup(FixupOptions),

    /// Apply a commit to curr branch (known as 'cherry-pick').
    Apply(ApplyOptions),

    /// Show commits in current branch.
    Show(ShowOptions),

    /// Create a new commit which reverts the target commit.
    Revert(RevertOptions),

    /// Cancel recent commits up to the target commit-id.
    Rollback(RollbackOptions),
}

#[derive(Debug, Clone, Args)]
pub struct CreateOptions {
    /// Paths to commit.
    #[arg(value_name = "path")]
    pub paths: Vec<String>,

    /// Commit message.
    #[arg(short, long, value_name = "message")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct CorrectOptions {
    /// Reuse commit message (not invoke text editor for it).
    #[arg(short = 'M')]
    pub reuse: bool,
}

#[derive(Debug, Clone, Args)]
pub struct FixupOptions {
    /// Commit to fix up.
    #[arg(value_name = "commit")]
    pub commit: String,

    /// Start 'history:edit' action after fixup commit created.
    #[arg(short = 'e', long)]
    pub histedit: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ApplyOptions {
    /// Commits to apply.
    #[arg(value_name = "commit", required = true)]
    pub commits: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct ShowOptions {
    /// Commit to show.
    #[arg(value_name = "commit")]
    pub commit: Option<String>,

    /// Show latest N commits.
    #[arg(short = 'n', value_name = "N")]
    pub count: Option<u32>,

    /// Show commits related to file.
    #[arg(short, long, value_name = "path")]
    pub file: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct RevertOptions {
    /// Commits to revert.
    #[arg(value_name = "commit")]
    pub commits: Vec<String>,

    /// Revert latest N commits.
    #[arg(short = 'n', value_name = "N")]
    pub count: Option<u32>,

    /// Parent number (necessary to revert merge commit).
    #[arg(long, value_name = "N")]
    pub mainline: Option<u32>,

    /// Reuse commit message (not invoke text editor for it).
    #[arg(short = 'M')]
    pub reuse: bool,
}

#[derive(Debug, Clone, Args)]
pub struct RollbackOptions {
    /// Commit-id to roll back to.
    #[arg(value_name = "commit")]
    pub commit: Option<String>,

    /// Cancel recent N commits.
    #[arg(short = 'n', value_name = "N")]
    pub count: Option<u32>,

    /// Restore files after rollback.
    #[arg(long)]
    pub restore: bool,
}

impl CommitAction {
    pub fn run(self, git: &Git) -> Result<()> {
        match self {
            Self::Create(opts) => run_create(git, opts),
            Self::Correct(opts) => {
                let mut args = vec!["commit".to_owned(), "--amend".to_owned()];
                if opts.reuse {
                    args.push("--no-edit".to_owned());
                }
                Ok(git.run(args)?)
            }
            Self::Fixup(opts) => run_fixup(git, opts),
            Self::Apply(opts) => {
                let mut args = vec!["cherry-pick".to_owned()];
                args.extend(opts.commits);
                Ok(git.run(args)?)
            }
            Self::Show(opts) => run_show(git, opts),
            Self::Revert(opts) => run_revert(git, opts),
            Self::Rollback(opts) => run_rollback(git, opts),
        }
    }
}

fn run_create(git: &Git, opts: CreateOptions) -> Result<()> {
    let mut args = vec!["commit".to_owned()];
    if let Some(message) = opts.message {
        args.push("-m".to_owned());
        args.push(message);
    }
    if !opts.paths.is_empty() {
        args.push("--".to_owned());
        args.extend(opts.paths);
    }
    git.run(args)?;

    Ok(())
}

fn run_fixup(git: &Git, opts: FixupOptions) -> Result<()> {
    git.run(["commit", format!("--fixup={}", opts.commit).as_str()])?;
    if opts.histedit {
        history::edit_start(git, Some(opts.commit), None)?;
    }

    Ok(())
}

fn run_show(git: &Git, opts: ShowOptions) -> Result<()> {
    match (opts.commit, opts.count, opts.file) {
        (Some(commit), Some(count), _) => {
            git.run(["show", format!("{commit}~{count}..{commit}").as_str()])?
        }
        (None, Some(count), _) => git.run(["show", format!("HEAD~{count}..HEAD").as_str()])?,
        (Some(commit), None, _) => git.run(["show", commit.as_str()])?,
        (None, None, Some(file)) => git.run(["log", "-p", "--", file.as_str()])?,
        (None, None, None) => git.run(["log", "-p"])?,
    }

    Ok(())
}

fn run_revert(git: &Git, opts: RevertOptions) -> Result<()> {
    let mut flags: Vec<String> = Vec::new();
    if opts.reuse {
        flags.push("--no-edit".to_owned());
    }
    if let Some(mainline) = opts.mainline {
        flags.push("-m".to_owned());
        flags.push(mainline.to_string());
    }

    if let Some(count) = opts.count {
        if opts.commits.len() > 1 {
            bail!("Multiple commits are not allowed when '-n' option specified.");
        }
        let commit = opts
            .commits
            .first()
            .map(String::as_str)
            .unwrap_or("HEAD");
        let mut args = vec!["revert".to_owned()];
        args.extend(flags);
        args.push(format!("{commit}~{count}..{commit}"));
        git.run(args)?;
    } else if !opts.commits.is_empty() {
        let mut args = vec!["revert".to_owned()];
        args.extend(flags);
        args.extend(opts.commits);
        git.run(args)?;
    } else {
        bail!("`<commit-id>` or `-n <N>` option required.");
    }

    Ok(())
}

fn run_rollback(git: &Git, opts: RollbackOptions) -> Result<()> {
    let mut args = vec!["reset".to_owned()];
    if opts.restore {
        args.push("--hard".to_owned());
    }
    match (opts.commit, opts.count) {
        (Some(_), Some(_)) => bail!("Commit-id and `-n` option are exclusive."),
        (Some(commit), None) => args.push(commit),
        (None, Some(count)) => args.push(format!("HEAD~{count}")),
        (None, None) => args.push("HEAD^".to_owned()),
    }
    git.run(args)?;

    Ok(())
}
