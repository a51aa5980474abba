// SPDX-FileCopyrightText: 2026 Kei Watanabe <kei.wtnb.dev@gmail.com>
// SPDX-License-Identifier: MIT

//! `tag:` category.

use crate::runner::Git;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

#[derive(Debug, Clone, Subcommand)]
pub enum TagAction {
    /// List/show/create/delete tags.
    #[command(override_usage = "\n  gi tag                           # list\
                                \n  gi tag <tag>                     # show commit-id of the tag\
                                \n  gi tag <tag> <commit>            # create a tag on the commit\
                                \n  gi tag <tag> HEAD                # create a tag on current commit\
                                \n  gi tag <tag> \"\"                  # delete a tag")]
    Handle(HandleOptions),

    /// List tags.
    #[command(hide = true)]
    List(ListOptions),

    /// Upload tags.
    Upload,

    /// Download tags.
    Download,
}

#[derive(Debug, Clone, Args)]
pub struct HandleOptions {
    /// Tag name.
    #[arg(value_name = "tag")]
    pub tag: Option<String>,

    /// Commit-id to tag; "" deletes the tag.
    #[arg(value_name = "commit")]
    pub commit: Option<String>,

    /// List/delete tags on remote (not for show/create).
    #[arg(
        short, long,
        value_name = "origin",
        num_args = 0..=1,
        default_missing_value = "origin",
        require_equals = true
    )]
    pub remote: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct ListOptions {
    /// List remote tags.
    #[arg(short, long)]
    pub remote: bool,
}

impl TagAction {
    pub fn run(self, git: &Git) -> Result<()> {
        match self {
            Self::Handle(opts) => run_handle(git, opts),
            Self::List(opts) => run_list(git, opts.remote),
            Self::Upload => Ok(git.run(["push", "--tags"])?),
            Self::Download => Ok(git.run(["fetch", "--tags", "--prune-tags"])?),
        }
    }
}

fn run_handle(git: &Git, opts: HandleOptions) -> Result<()> {
    let Some(tag) = opts.tag else {
        return run_list(git, opts.remote.is_some());
    };

    match opts.commit.as_deref() {
        None => {
            // show
            if opts.remote.is_some() {
                bail!("Option '-r' or '--remote' is not available for showing tag.");
            }
            git.run(["rev-parse", tag.as_str()])?;
        }
        Some("") => {
            // delete
            if let Some(remote) = &opts.remote {
                // `push --delete <tag>` could hit a branch of the same name
                let refspec = format!(":refs/tags/{tag}");
                git.run(["push", remote.as_str(), refspec.as_str()])?;
            } else {
                git.run(["tag", "--delete", tag.as_str()])?;
            }
        }
        Some(commit) => {
            // create
            if opts.remote.is_some() {
                bail!("Option '-r' or '--remote' is not available for creating tag.");
            }
            git.run(["tag", tag.as_str(), commit])?;
        }
    }

    Ok(())
}

fn run_list(git: &Git, remote: bool) -> Result<()> {
    if remote {
        git.run(["ls-remote", "--tags"])?;
    } else {
        git.run(["tag", "-l"])?;
    }

    Ok(())
}
