// SPDX-FileCopyrightText: 2026 Kei Watanabe <kei.wtnb.dev@gmail.com>
// SPDX-License-Identifier: MIT

//! `branch:` category.
//!
//! The two compound actions live here: `join` merges the current branch
//! into another one (checking out the target first), `merge` pulls another
//! branch into the current one. Both are confirmation-gated and refuse
//! merges that would need a rebase first.

use crate::{
    config::Settings,
    resolve::{
        current_branch, parent_branch, previous_branch, remote_of_branch, resolve_branch,
        resolve_except_prev, same_commit,
    },
    runner::Git,
};

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

#[derive(Debug, Clone, Subcommand)]
pub enum BranchAction {
    /// List branches.
    List(ListOptions),

    /// Switch to previous or other branch.
    Switch(SwitchOptions),

    /// Create a new branch, not switch to it.
    Create(CreateOptions),

    /// Create a new branch and switch to it.
    Fork(ForkOptions),

    /// Merge current branch into previous or other branch.
    Join(MergeOptions),

    /// Merge previous or other branch into current branch.
    Merge(MergeOptions),

    /// Create a new local branch from a remote branch.
    Checkout(CheckoutOptions),

    /// Rename the current branch to other name.
    Rename(RenameOptions),

    /// Delete a branch.
    Delete(DeleteOptions),

    /// Change commit-id of current HEAD.
    Reset(ResetOptions),

    /// Rebase (move) current branch on top of other branch.
    Rebase(RebaseOptions),

    /// git pull && git stash && git rebase && git stash pop.
    Update(UpdateOptions),

    /// Print upstream repo name of current branch.
    Upstream,

    /// Show current branch name.
    Current,

    /// Show previous branch name.
    Previous,

    /// Show parent branch name (EXPERIMENTAL).
    Parent,

    /// Print CURR/PREV/PARENT branch name.
    Echo(EchoOptions),
}

#[derive(Debug, Clone, Args)]
pub struct ListOptions {
    /// List both local and remote branches (default).
    #[arg(short, long)]
    pub all: bool,

    /// List remote branches.
    #[arg(short, long)]
    pub remote: bool,

    /// List local branches.
    #[arg(short, long)]
    pub local: bool,
}

#[derive(Debug, Clone, Args)]
pub struct SwitchOptions {
    /// Branch name, CURR/PREV/PARENT, or '-' (default: previous branch).
    #[arg(value_name = "branch")]
    pub branch: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct CreateOptions {
    /// Name of the new branch.
    #[arg(value_name = "branch")]
    pub branch: String,

    /// Commit-id on where the new branch will be created.
    #[arg(long, value_name = "commit")]
    pub on: Option<String>,

    /// Switch to the new branch after created.
    #[arg(short = 'w', long)]
    pub switch: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ForkOptions {
    /// Name of the new branch.
    #[arg(value_name = "branch")]
    pub branch: String,

    /// Commit-id on where the new branch will be created.
    #[arg(long, value_name = "commit")]
    pub on: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct MergeOptions {
    /// Branch to merge with (default: previous branch).
    #[arg(value_name = "branch")]
    pub branch: Option<String>,

    /// Delete the merged branch afterwards.
    #[arg(short, long)]
    pub delete: bool,

    /// Use fast-forward merge.
    #[arg(long = "ff")]
    pub fastforward: bool,

    /// Reuse commit message (not invoke text editor for it).
    #[arg(short = 'M')]
    pub reuse: bool,
}

#[derive(Debug, Clone, Args)]
pub struct CheckoutOptions {
    /// Remote branch name.
    #[arg(value_name = "branch")]
    pub branch: String,

    /// Remote repository name (default: origin).
    #[arg(long, value_name = "remote", default_value = "origin")]
    pub remote: String,
}

#[derive(Debug, Clone, Args)]
pub struct RenameOptions {
    /// New branch name.
    #[arg(value_name = "new_branch")]
    pub new_branch: String,

    /// Target branch instead of current branch.
    #[arg(short, value_name = "branch")]
    pub target: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct DeleteOptions {
    /// Branch to delete (default: current branch, after confirmation).
    #[arg(value_name = "branch")]
    pub branch: Option<String>,

    /// Delete forcedly even if not merged.
    #[arg(short, long)]
    pub force: bool,

    /// Delete a remote branch.
    #[arg(
        short,
        long,
        value_name = "remote",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "origin"
    )]
    pub remote: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct ResetOptions {
    /// Commit-id to reset HEAD to.
    #[arg(value_name = "commit")]
    pub commit: String,

    /// Restore files after reset.
    #[arg(long)]
    pub restore: bool,
}

#[derive(Debug, Clone, Args)]
pub struct RebaseOptions {
    /// Branch to rebase onto.
    #[arg(value_name = "branch_onto")]
    pub branch_onto: String,

    /// Upstream branch the current one started from.
    #[arg(value_name = "branch_upstream")]
    pub branch_upstream: Option<String>,

    /// Commit-id where current branch started.
    #[arg(long, value_name = "commit-id")]
    pub from: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct UpdateOptions {
    /// Branch to update from (default: previous branch).
    #[arg(value_name = "branch")]
    pub branch: Option<String>,

    /// Rebase if prev branch updated.
    #[arg(short = 'b', long)]
    pub rebase: bool,
}

#[derive(Debug, Clone, Args)]
pub struct EchoOptions {
    /// CURR, PREV, PARENT, '-', or a branch name.
    #[arg(value_name = "branch")]
    pub branch: String,
}

impl BranchAction {
    pub fn run(self, git: &Git, settings: &Settings) -> Result<()> {
        match self {
            Self::List(opts) => run_list(git, opts),
            Self::Switch(opts) => run_switch(git, opts),
            Self::Create(opts) => run_create(git, opts),
            Self::Fork(opts) => run_fork(git, opts),
            Self::Join(opts) => run_join(git, opts),
            Self::Merge(opts) => run_merge(git, opts),
            Self::Checkout(opts) => run_checkout(git, opts),
            Self::Rename(opts) => run_rename(git, opts),
            Self::Delete(opts) => run_delete(git, opts),
            Self::Reset(opts) => run_reset(git, opts),
            Self::Rebase(opts) => run_rebase(git, opts),
            Self::Update(opts) => run_update(git, settings, opts),
            Self::Upstream => run_upstream(git),
            Self::Current => Ok(git.run(["rev-parse", "--abbrev-ref", "HEAD"])?),
            Self::Previous => Ok(git.run(["rev-parse", "--abbrev-ref", "@{-1}"])?),
            Self::Parent => run_parent(git),
            Self::Echo(opts) => run_echo(git, opts),
        }
    }
}

fn run_list(git: &Git, opts: ListOptions) -> Result<()> {
    let opt = if opts.remote {
        "-r"
    } else if opts.local {
        "-l"
    } else {
        "-a"
    };
    git.run(["branch", opt])?;

    Ok(())
}

fn run_switch(git: &Git, opts: SwitchOptions) -> Result<()> {
    let branch = resolve_except_prev(git, opts.branch.as_deref())?;
    git.run(["checkout", branch.as_str()])?;

    Ok(())
}

fn run_create(git: &Git, opts: CreateOptions) -> Result<()> {
    let mut args = vec!["branch".to_owned(), opts.branch.clone()];
    if let Some(on) = opts.on {
        args.push(on);
    }
    git.run(args)?;
    if opts.switch {
        git.run(["checkout", opts.branch.as_str()])?;
    }

    Ok(())
}

fn run_fork(git: &Git, opts: ForkOptions) -> Result<()> {
    let mut args = vec!["checkout".to_owned(), "-b".to_owned(), opts.branch];
    if let Some(on) = opts.on {
        args.push(on);
    }
    git.run(args)?;

    Ok(())
}

fn run_join(git: &Git, opts: MergeOptions) -> Result<()> {
    let into_branch = resolve_branch(git, opts.branch.as_deref().unwrap_or("PREV"))?;
    let merge_branch = current_branch(git)?;
    merge(git, &merge_branch, &into_branch, true, &opts)
}

fn run_merge(git: &Git, opts: MergeOptions) -> Result<()> {
    let merge_branch = resolve_branch(git, opts.branch.as_deref().unwrap_or("PREV"))?;
    let into_branch = current_branch(git)?;
    merge(git, &merge_branch, &into_branch, false, &opts)
}

// Shared machinery of join and merge. `switch` means the current branch is
// the one being merged, so the target gets checked out first and the merge
// names `-`.
fn merge(
    git: &Git,
    merge_branch: &str,
    into_branch: &str,
    switch: bool,
    opts: &MergeOptions,
) -> Result<()> {
    let question = if switch {
        format!(
            "Merge current branch '{}' into '{}'. OK?",
            merge_branch.bold(),
            into_branch.bold()
        )
    } else {
        format!(
            "Merge '{}' branch into '{}'. OK?",
            merge_branch.bold(),
            into_branch.bold()
        )
    };
    if !git.confirm(&question, true)? {
        println!("{}", if switch { "** Not joined." } else { "** Not merged." });
        return Ok(());
    }

    check_fastforward_available(git, into_branch, merge_branch)?;

    let mut args = vec!["merge".to_owned()];
    args.push(if opts.fastforward { "--ff-only" } else { "--no-ff" }.to_owned());
    if opts.reuse {
        args.push("--no-edit".to_owned());
    }
    if switch {
        git.run(["checkout", into_branch])?;
        args.push("-".to_owned());
    } else {
        args.push(merge_branch.to_owned());
    }
    git.run(args)?;

    if opts.delete {
        git.run(["branch", "-d", merge_branch])?;
    }

    Ok(())
}

fn check_fastforward_available(git: &Git, parent: &str, child: &str) -> Result<()> {
    if !git.check(["merge-base", "--is-ancestor", parent, child])? {
        bail!("Cannot merge '{child}' branch; rebase it onto '{parent}' in advance.");
    }

    Ok(())
}

fn run_checkout(git: &Git, opts: CheckoutOptions) -> Result<()> {
    let remote_branch = format!("{}/{}", opts.remote, opts.branch);
    git.run(["checkout", "-b", opts.branch.as_str(), remote_branch.as_str()])?;

    Ok(())
}

fn run_rename(git: &Git, opts: RenameOptions) -> Result<()> {
    let old_branch = match opts.target {
        Some(target) => target,
        None => current_branch(git)?,
    };
    git.run(["branch", "-m", old_branch.as_str(), opts.new_branch.as_str()])?;

    Ok(())
}

fn run_delete(git: &Git, opts: DeleteOptions) -> Result<()> {
    let branch = match opts.branch {
        None => {
            let branch = current_branch(git)?;
            let question = format!("Are you sure to delete current branch '{branch}'?");
            if !git.confirm(&question, false)? {
                return Ok(());
            }
            if opts.remote.is_none() {
                git.run(["checkout", "-"])?;
            }
            branch
        }
        Some(name) => resolve_branch(git, &name)?,
    };

    if let Some(remote) = opts.remote {
        let mut args = vec!["push".to_owned(), "--delete".to_owned()];
        if opts.force {
            args.push("-f".to_owned());
        }
        args.push(remote);
        args.push(branch);
        git.run(args)?;
    } else {
        let opt = if opts.force { "-D" } else { "-d" };
        git.run(["branch", opt, branch.as_str()])?;
    }

    Ok(())
}

fn run_reset(git: &Git, opts: ResetOptions) -> Result<()> {
    let mut args = vec!["reset".to_owned()];
    if opts.restore {
        args.push("--hard".to_owned());
    }
    args.push(opts.commit);
    git.run(args)?;

    Ok(())
}

fn run_rebase(git: &Git, opts: RebaseOptions) -> Result<()> {
    let onto = resolve_branch(git, &opts.branch_onto)?;
    if let Some(from) = opts.from {
        git.run([
            "rebase",
            format!("--onto={onto}").as_str(),
            format!("{from}^").as_str(),
        ])?;
    } else if let Some(upstream) = opts.branch_upstream {
        let upstream = resolve_branch(git, &upstream)?;
        git.run([
            "rebase",
            format!("--onto={onto}").as_str(),
            upstream.as_str(),
        ])?;
    } else {
        git.run(["rebase", onto.as_str()])?;
    }

    Ok(())
}

fn run_update(git: &Git, settings: &Settings, opts: UpdateOptions) -> Result<()> {
    if current_branch(git)? == settings.initial_branch {
        git.run(["pull"])?;
        return Ok(());
    }

    let branch = match opts.branch {
        Some(branch) => branch,
        None => previous_branch(git)?,
    };
    let Some(remote) = remote_of_branch(git, &branch)? else {
        bail!(
            "Previous branch '{branch}' has no remote repo. \
             (Hint: run `gi branch:upstream -t {branch} origin`.)"
        );
    };
    git.say(&format!("[INFO] previous: {branch}, remote: {remote}"));

    git.run(["fetch"])?;
    let file_changed = !git.capture(["diff"])?.is_empty();
    let remote_updated = !same_commit(git, &branch, &format!("{remote}/{branch}"))?;
    let rebase_required = !git
        .capture(["log", "--oneline", format!("HEAD..{branch}").as_str()])?
        .is_empty();

    if remote_updated || (opts.rebase && rebase_required) {
        if file_changed {
            git.run(["stash", "push", "-q"])?;
        }
        if remote_updated {
            git.run(["checkout", "-q", branch.as_str()])?;
            git.run(["pull"])?;
            git.run(["checkout", "-q", "-"])?;
        }
        if opts.rebase {
            git.run(["rebase", branch.as_str()])?;
        }
        if file_changed {
            git.run(["stash", "pop", "-q"])?;
        }
    }

    Ok(())
}

fn run_upstream(git: &Git) -> Result<()> {
    let branch = current_branch(git)?;
    git.echo(&format!(
        "git config --get-regexp '^branch\\.{branch}\\.remote' | awk '{{print $2}}'"
    ));
    let pattern = format!("^branch\\.{branch}\\.remote");
    let output = git.capture(["config", "--get-regexp", pattern.as_str()])?;
    for line in output.lines() {
        if let Some(remote) = line.split_whitespace().nth(1) {
            println!("{remote}");
        }
    }

    Ok(())
}

fn run_parent(git: &Git) -> Result<()> {
    git.echo(
        "git show-branch -a | sed 's/].*//' | grep '\\*' \
         | grep -v \"\\\\[$(git branch --show-current)\\$\" | head -n1 | sed 's/^.*\\[//'",
    );
    let parent = parent_branch(git)?;
    println!("{parent}");

    Ok(())
}

fn run_echo(git: &Git, opts: EchoOptions) -> Result<()> {
    match opts.branch.as_str() {
        "CURR" => git.run(["rev-parse", "--abbrev-ref", "HEAD"])?,
        "PREV" | "-" => git.run(["rev-parse", "--abbrev-ref", "@{-1}"])?,
        "PARENT" => return run_parent(git),
        other => git.run(["rev-parse", "--abbrev-ref", other])?,
    }

    Ok(())
}
