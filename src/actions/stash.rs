// SPDX-FileCopyrightText: 2026 Kei Watanabe <kei.wtnb.dev@gmail.com>
// SPDX-License-Identifier: MIT

//! `stash:` category.

use crate::runner::Git;

use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Clone, Subcommand)]
pub enum StashAction {
    /// List stash history.
    List,

    /// Show changes on stash.
    Show(NumOptions),

    /// Save current changes into stash.
    Put(PutOptions),

    /// Restore latest changes from stash.
    Pop(NumOptions),

    /// Delete latest changes from stash.
    Drop(NumOptions),
}

#[derive(Debug, Clone, Args)]
pub struct NumOptions {
    /// N-th changes on stash (1-origin).
    #[arg(short, long = "num", value_name = "N")]
    pub num: Option<u32>,
}

#[derive(Debug, Clone, Args)]
pub struct PutOptions {
    /// Files to stash (default: all changed files).
    #[arg(value_name = "path")]
    pub paths: Vec<String>,

    /// Message.
    #[arg(short, long, value_name = "message")]
    pub message: Option<String>,

    /// Pick up changes interactively.
    #[arg(short, long)]
    pub pick: bool,
}

impl StashAction {
    pub fn run(self, git: &Git) -> Result<()> {
        match self {
            Self::List => Ok(git.run(["stash", "list"])?),
            Self::Show(opts) => run_numbered(git, &["show", "-p"], opts.num),
            Self::Put(opts) => run_put(git, opts),
            Self::Pop(opts) => run_numbered(git, &["pop"], opts.num),
            Self::Drop(opts) => run_numbered(git, &["drop"], opts.num),
        }
    }
}

fn run_numbered(git: &Git, subargs: &[&str], num: Option<u32>) -> Result<()> {
    let mut args = vec!["stash".to_owned()];
    args.extend(subargs.iter().map(|s| (*s).to_owned()));
    if let Some(num) = num {
        // 1-origin on the command line, 0-origin in the ref
        args.push(format!("stash@{{{}}}", num.saturating_sub(1)));
    }
    git.run(args)?;

    Ok(())
}

fn run_put(git: &Git, opts: PutOptions) -> Result<()> {
    let mut args = vec!["stash".to_owned(), "push".to_owned()];
    if let Some(message) = opts.message {
        args.push("-m".to_owned());
        args.push(message);
    }
    if opts.pick {
        args.push("-p".to_owned());
    }
    if !opts.paths.is_empty() {
        args.push("--".to_owned());
        args.extend(opts.paths);
    }
    git.run(args)?;

    Ok(())
}
