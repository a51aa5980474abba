// SPDX-FileCopyrightText: 2026 Kei Watanabe <kei.wtnb.dev@gmail.com>
// SPDX-License-Identifier: MIT

//! `misc:` category.

use crate::{config::startup_template, runner::Git};

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use std::{fs, path::Path};

#[derive(Debug, Clone, Subcommand)]
pub enum MiscAction {
    /// Generate a startup file, or print to stdout if no args.
    #[command(override_usage = "\n  gi misc:startupfile <filename>   # generate a file\
                                \n  gi misc:startupfile              # print to stdout")]
    Startupfile(StartupfileOptions),
}

#[derive(Debug, Clone, Args)]
pub struct StartupfileOptions {
    /// Output filename ('-' prints to stdout).
    #[arg(value_name = "filename")]
    pub filename: Option<String>,
}

impl MiscAction {
    pub fn run(self, git: &Git) -> Result<()> {
        match self {
            Self::Startupfile(opts) => run_startupfile(git, opts.filename),
        }
    }
}

fn run_startupfile(git: &Git, filename: Option<String>) -> Result<()> {
    let template = startup_template();
    match filename.as_deref() {
        None | Some("-") => print!("{template}"),
        Some(filename) => {
            if Path::new(filename).exists() {
                bail!("{filename}: File already exists (remove it before generating new file).");
            }
            fs::write(filename, template)?;
            git.say(&format!("[OK] {filename} generated."));
        }
    }

    Ok(())
}
