// SPDX-FileCopyrightText: 2026 Kei Watanabe <kei.wtnb.dev@gmail.com>
// SPDX-License-Identifier: MIT

//! `file:` category.

use crate::runner::Git;

use anyhow::{bail, Result};
use clap::{Args, Subcommand, ValueEnum};
use std::path::Path;

#[derive(Debug, Clone, Subcommand)]
pub enum FileAction {
    /// List (un)tracked/ignored/missing files.
    List(ListOptions),

    /// Register files into the repository.
    Track(TrackOptions),

    /// Show changes of files.
    Changes(PathsOptions),

    /// Move files into a directory.
    Move(MoveOptions),

    /// Rename a file or directory to new name.
    Rename(RenameOptions),

    /// Delete files or directories.
    Delete(DeleteOptions),

    /// Restore files (= clear changes).
    Restore(PathsOptions),

    /// Print commit-id, author, and timestamp of each line.
    Blame(BlameOptions),

    /// Find by pattern.
    Egrep(EgrepOptions),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterType {
    /// Only tracked files (default).
    Tracked,

    /// Only not-tracked files.
    Untracked,

    /// Ignored files by '.gitignore'.
    Ignored,

    /// Tracked but missing files.
    Missing,
}

#[derive(Debug, Clone, Args)]
pub struct ListOptions {
    /// Path to list under.
    #[arg(value_name = "path", default_value = ".")]
    pub path: String,

    /// Filter type.
    #[arg(short = 'F', value_name = "filtertype", value_enum, default_value_t = FilterType::Tracked)]
    pub filtertype: FilterType,

    /// Show full list.
    #[arg(long)]
    pub full: bool,
}

#[derive(Debug, Clone, Args)]
pub struct TrackOptions {
    /// Files to track.
    #[arg(value_name = "file", required = true)]
    pub files: Vec<String>,

    /// Allow to track ignored files.
    #[arg(short, long)]
    pub force: bool,

    /// Track files under directories.
    #[arg(short, long)]
    pub recursive: bool,
}

#[derive(Debug, Clone, Args)]
pub struct PathsOptions {
    /// Paths to operate on.
    #[arg(value_name = "path")]
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct MoveOptions {
    /// Files to move.
    #[arg(value_name = "file", required = true)]
    pub files: Vec<String>,

    /// Target directory.
    #[arg(long, value_name = "dir")]
    pub to: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct RenameOptions {
    /// Current file or directory name.
    #[arg(value_name = "old_file")]
    pub old_file: String,

    /// New name.
    #[arg(value_name = "new_file")]
    pub new_file: String,
}

#[derive(Debug, Clone, Args)]
pub struct DeleteOptions {
    /// Files or directories to delete.
    #[arg(value_name = "file", required = true)]
    pub files: Vec<String>,

    /// Delete files recursively.
    #[arg(short, long)]
    pub recursive: bool,
}

#[derive(Debug, Clone, Args)]
pub struct BlameOptions {
    /// Files to annotate.
    #[arg(value_name = "file", required = true)]
    pub files: Vec<String>,

    /// Range (start,end) or function name.
    #[arg(short = 'L', value_name = "N1,N2|:func")]
    pub range: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct EgrepOptions {
    /// Extended regular expression to search for.
    #[arg(value_name = "pattern")]
    pub pattern: String,

    /// Commit to search in.
    #[arg(value_name = "commit")]
    pub commit: Option<String>,
}

impl FileAction {
    pub fn run(self, git: &Git) -> Result<()> {
        match self {
            Self::List(opts) => run_list(git, opts),
            Self::Track(opts) => run_track(git, opts),
            Self::Changes(opts) => {
                let mut args = vec!["diff".to_owned()];
                args.extend(opts.paths);
                Ok(git.run(args)?)
            }
            Self::Move(opts) => run_move(git, opts),
            Self::Rename(opts) => run_rename(git, opts),
            Self::Delete(opts) => {
                let mut args = vec!["rm".to_owned()];
                if opts.recursive {
                    args.push("-r".to_owned());
                }
                args.extend(opts.files);
                Ok(git.run(args)?)
            }
            Self::Restore(opts) => run_restore(git, opts),
            Self::Blame(opts) => {
                let mut args = vec!["blame".to_owned()];
                if let Some(range) = opts.range {
                    args.push("-L".to_owned());
                    args.push(range);
                }
                args.extend(opts.files);
                Ok(git.run(args)?)
            }
            Self::Egrep(opts) => {
                let mut args = vec!["grep".to_owned(), "-E".to_owned(), opts.pattern];
                if let Some(commit) = opts.commit {
                    args.push(commit);
                }
                Ok(git.run(args)?)
            }
        }
    }
}

fn run_list(git: &Git, opts: ListOptions) -> Result<()> {
    match opts.filtertype {
        FilterType::Tracked => git.run(["ls-files", opts.path.as_str()])?,
        FilterType::Untracked => {
            let opt = if opts.full { " -u" } else { "" };
            git.echo(&format!("git status -s{opt} {} | grep '^?? '", opts.path));
            let mut args = vec!["status", "-s"];
            if opts.full {
                args.push("-u");
            }
            args.push(opts.path.as_str());
            let output = git.capture(args)?;
            for line in output.lines().filter(|line| line.starts_with("?? ")) {
                println!("{line}");
            }
        }
        FilterType::Ignored => {
            let opt = if opts.full {
                "--ignored=matching"
            } else {
                "--ignored"
            };
            git.echo(&format!("git status -s {opt} {} | grep '^!! '", opts.path));
            let output = git.capture(["status", "-s", opt, opts.path.as_str()])?;
            for line in output.lines().filter(|line| line.starts_with("!! ")) {
                println!("{line}");
            }
        }
        FilterType::Missing => git.run(["ls-files", "--deleted", opts.path.as_str()])?,
    }

    Ok(())
}

fn run_track(git: &Git, opts: TrackOptions) -> Result<()> {
    for file in &opts.files {
        let output = git.capture(["ls-files", "--", file.as_str()])?;
        if !output.is_empty() {
            bail!("{file}: Already tracked.");
        }
    }
    for file in &opts.files {
        if Path::new(file).is_dir() && !opts.recursive {
            bail!(
                "{file}: File expected, but is a directory (specify `-r` or \
                 `--recursive` option to track files under the directory)."
            );
        }
    }

    let mut args = vec!["add".to_owned()];
    if opts.force {
        args.push("-f".to_owned());
    }
    args.extend(opts.files);
    git.run(args)?;

    Ok(())
}

fn run_move(git: &Git, opts: MoveOptions) -> Result<()> {
    let Some(dir) = opts.to else {
        bail!("Option `--to=<dir>` required.");
    };
    if !Path::new(&dir).exists() {
        bail!("--to={dir}: Directory not exist (create it first).");
    }
    if !Path::new(&dir).is_dir() {
        bail!("--to={dir}: Not a directory (to rename files, use 'file:rename' action instead).");
    }

    let mut args = vec!["mv".to_owned()];
    args.extend(opts.files);
    args.push(dir);
    git.run(args)?;

    Ok(())
}

fn run_rename(git: &Git, opts: RenameOptions) -> Result<()> {
    if Path::new(&opts.new_file).exists() {
        bail!("{}: Already exist.", opts.new_file);
    }
    git.run(["mv", opts.old_file.as_str(), opts.new_file.as_str()])?;

    Ok(())
}

fn run_restore(git: &Git, opts: PathsOptions) -> Result<()> {
    if opts.paths.is_empty() {
        git.run(["reset", "--hard"])?;
    } else {
        let mut args = vec!["checkout".to_owned(), "--".to_owned()];
        args.extend(opts.paths);
        git.run(args)?;
    }

    Ok(())
}
