// SPDX-FileCopyrightText: 2026 Kei Watanabe <kei.wtnb.dev@gmail.com>
// SPDX-License-Identifier: MIT

//! `staging:` category.

use crate::runner::Git;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use std::path::Path;

#[derive(Debug, Clone, Subcommand)]
pub enum StagingAction {
    /// Add changes of files into staging area.
    Add(AddOptions),

    /// Show changes in staging area.
    Show(PathsOptions),

    /// Edit changes in staging area.
    Edit(PathsOptions),

    /// Delete all changes in staging area.
    Clear(PathsOptions),
}

#[derive(Debug, Clone, Args)]
pub struct AddOptions {
    /// Paths whose changes to stage.
    #[arg(value_name = "path", required = true)]
    pub paths: Vec<String>,

    /// Pick up changes interactively.
    #[arg(short, long)]
    pub pick: bool,
}

#[derive(Debug, Clone, Args)]
pub struct PathsOptions {
    /// Paths to operate on.
    #[arg(value_name = "path")]
    pub paths: Vec<String>,
}

impl StagingAction {
    pub fn run(self, git: &Git) -> Result<()> {
        match self {
            Self::Add(opts) => run_add(git, opts),
            Self::Show(opts) => {
                let mut args = vec!["diff".to_owned(), "--cached".to_owned()];
                args.extend(opts.paths);
                Ok(git.run(args)?)
            }
            Self::Edit(opts) => {
                let mut args = vec!["add".to_owned(), "--edit".to_owned()];
                args.extend(opts.paths);
                Ok(git.run(args)?)
            }
            Self::Clear(opts) => {
                let mut args = vec!["reset".to_owned(), "HEAD".to_owned()];
                if !opts.paths.is_empty() {
                    args.push("--".to_owned());
                    args.extend(opts.paths);
                }
                Ok(git.run(args)?)
            }
        }
    }
}

fn run_add(git: &Git, opts: AddOptions) -> Result<()> {
    // Staging picks up changes of already-tracked files; new files belong
    // to 'track'.
    for path in &opts.paths {
        if Path::new(path).is_dir() {
            continue;
        }
        let output = git.capture(["ls-files", path.as_str()])?;
        if output.is_empty() {
            bail!("{path}: Not tracked yet (run 'track' action instead).");
        }
    }

    let mut args = vec!["add".to_owned()];
    args.push(if opts.pick { "-p" } else { "-u" }.to_owned());
    args.extend(opts.paths);
    git.run(args)?;

    Ok(())
}
