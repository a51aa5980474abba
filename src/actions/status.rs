// SPDX-FileCopyrightText: 2026 Kei Watanabe <kei.wtnb.dev@gmail.com>
// SPDX-License-Identifier: MIT

//! `status:` category.

use crate::runner::Git;

use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Clone, Subcommand)]
pub enum StatusAction {
    /// Same as 'status:compact .'.
    Here,

    /// Show various information of current status.
    Info(InfoOptions),

    /// Show status in compact format.
    Compact(StatusOptions),

    /// Show status in default format.
    Default(StatusOptions),
}

#[derive(Debug, Clone, Args)]
pub struct InfoOptions {
    /// Path to report on.
    #[arg(value_name = "path", default_value = ".")]
    pub path: String,
}

#[derive(Debug, Clone, Args)]
pub struct StatusOptions {
    /// Ignore untracked files.
    #[arg(short = 'U')]
    pub tracked_only: bool,

    /// Paths to report on.
    #[arg(value_name = "path")]
    pub paths: Vec<String>,
}

impl StatusAction {
    pub fn run(self, git: &Git) -> Result<()> {
        match self {
            Self::Here => git.run(["status", "-sb", "."])?,
            Self::Info(opts) => {
                // Untracked entries rendered ls-style, then the tracked ones.
                let pipeline = format!(
                    "git status -sb {} | sed -n 's!/$!!;/^??/s/^?? //p' | xargs ls -dF --color",
                    opts.path
                );
                git.sh(&pipeline)?;
                git.run(["status", "-sb", "-uno", opts.path.as_str()])?;
            }
            Self::Compact(opts) => {
                let mut args = vec!["status".to_owned(), "-sb".to_owned()];
                if opts.tracked_only {
                    args.push("-uno".to_owned());
                }
                args.extend(opts.paths);
                git.run(args)?;
            }
            Self::Default(opts) => {
                let mut args = vec!["status".to_owned()];
                if opts.tracked_only {
                    args.push("-uno".to_owned());
                }
                args.extend(opts.paths);
                git.run(args)?;
            }
        }

        Ok(())
    }
}
