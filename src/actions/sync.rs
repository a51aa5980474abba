// SPDX-FileCopyrightText: 2026 Kei Watanabe <kei.wtnb.dev@gmail.com>
// SPDX-License-Identifier: MIT

//! `sync:` category.

use crate::{resolve::current_branch, runner::Git};

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

#[derive(Debug, Clone, Subcommand)]
pub enum SyncAction {
    /// Download and upload commits.
    Both(UploadOptions),

    /// Upload commits to remote.
    Push(UploadOptions),

    /// Download commits from remote and apply them to local.
    Pull(PullOptions),
}

#[derive(Debug, Clone, Args)]
pub struct UploadOptions {
    /// Set upstream.
    #[arg(short, long, value_name = "remote")]
    pub upstream: Option<String>,

    /// Same as '-u origin'.
    #[arg(short = 'U')]
    pub origin: bool,

    /// Upload forcedly.
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Debug, Clone, Args)]
pub struct PullOptions {
    /// Just download, not apply.
    #[arg(short = 'N', long = "not-apply")]
    pub not_apply: bool,
}

impl SyncAction {
    pub fn run(self, git: &Git) -> Result<()> {
        match self {
            Self::Both(opts) => {
                run_pull(git, false)?;
                run_push(git, opts)
            }
            Self::Push(opts) => run_push(git, opts),
            Self::Pull(opts) => run_pull(git, opts.not_apply),
        }
    }
}

fn run_push(git: &Git, opts: UploadOptions) -> Result<()> {
    let branch = current_branch(git)?;
    let upstream = match opts.upstream {
        Some(upstream) => Some(upstream),
        None if opts.origin => Some("origin".to_owned()),
        None => ask_remote_repo(git, &branch)?,
    };

    let mut args = vec!["push".to_owned()];
    if opts.force {
        args.push("-f".to_owned());
    }
    if let Some(upstream) = upstream {
        // branch name is required when setting the upstream
        args.extend(["-u".to_owned(), upstream, branch]);
    }
    git.run(args)?;

    Ok(())
}

// Prompt for a remote name when the branch has no upstream configured.
fn ask_remote_repo(git: &Git, branch: &str) -> Result<Option<String>> {
    let output = git.capture(["config", "--get-regexp", "^branch\\."])?;
    let key = format!("branch.{branch}.remote");
    let has_upstream = output
        .lines()
        .any(|line| line.split_whitespace().next() == Some(key.as_str()));
    if has_upstream {
        return Ok(None);
    }

    let question = format!("Enter the remote repo name (default: {}) :", "origin".bold());
    let answer = git.ask(&question)?;
    Ok(Some(answer.unwrap_or_else(|| "origin".to_owned())))
}

fn run_pull(git: &Git, not_apply: bool) -> Result<()> {
    if not_apply {
        git.run(["fetch", "--prune"])?;
    } else {
        git.run(["pull", "--prune"])?;
    }

    Ok(())
}
