// SPDX-FileCopyrightText: 2026 Kei Watanabe <kei.wtnb.dev@gmail.com>
// SPDX-License-Identifier: MIT

//! `repo:` category, including the nested `repo:remote:` one.

use crate::{config::Settings, resolve::resolve_repository_url, runner::Git};

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use std::{env, fs, path::Path};

#[derive(Debug, Clone, Subcommand)]
pub enum RepoAction {
    /// Initialize git repository with empty initial commit.
    Init(InitOptions),

    /// Create a new directory and initialize it as a git repo.
    Create(CreateOptions),

    /// Copy a repository ('github:<user>/<repo>' is available).
    Clone(CloneOptions),

    /// Handle remote repositories.
    #[command(subcommand)]
    Remote(RemoteAction),
}

#[derive(Debug, Clone, Args)]
pub struct InitOptions {
    /// Branch name (default: from startup file, normally 'main').
    #[arg(short = 'b', long = "branch", value_name = "branch")]
    pub initial_branch: Option<String>,

    /// User name.
    #[arg(short, long, value_name = "user")]
    pub user: Option<String>,

    /// Email address.
    #[arg(short, long, value_name = "email")]
    pub email: Option<String>,

    /// Not create an empty initial commit.
    #[arg(short = 'x')]
    pub no_initial_commit: bool,
}

#[derive(Debug, Clone, Args)]
pub struct CreateOptions {
    /// Name of the new directory.
    #[arg(value_name = "name")]
    pub name: String,

    #[command(flatten)]
    pub init: InitOptions,
}

#[derive(Debug, Clone, Args)]
pub struct CloneOptions {
    /// URL of the repository ('github:<user>/<repo>' is available).
    #[arg(value_name = "url")]
    pub url: String,

    /// Directory to clone into.
    #[arg(value_name = "dir")]
    pub dir: Option<String>,

    /// User name.
    #[arg(short, long, value_name = "user")]
    pub user: Option<String>,

    /// Email address.
    #[arg(short, long, value_name = "email")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum RemoteAction {
    /// List/get/set/delete remote repository.
    #[command(override_usage = "\n  gi repo:remote                   # list\
                                \n  gi repo:remote <name>            # get\
                                \n  gi repo:remote <name> <url>      # set\
                                \n  gi repo:remote <name> \"\"         # delete")]
    Handle(RemoteOptions),

    /// Get/set/delete origin (= default remote repository).
    #[command(override_usage = "\n  gi repo:remote:origin            # get\
                                \n  gi repo:remote:origin <url>      # set\
                                \n  gi repo:remote:origin \"\"         # delete")]
    Origin(OriginOptions),
}

#[derive(Debug, Clone, Args)]
pub struct RemoteOptions {
    /// Remote repository name.
    #[arg(value_name = "name")]
    pub name: Option<String>,

    /// URL ('github:user/repo' is available); "" deletes the remote.
    #[arg(value_name = "url")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct OriginOptions {
    /// URL ('github:user/repo' is available); "" deletes origin.
    #[arg(value_name = "url")]
    pub url: Option<String>,
}

impl RepoAction {
    pub fn run(self, git: &Git, settings: &Settings) -> Result<()> {
        match self {
            Self::Init(opts) => run_init(git, settings, opts),
            Self::Create(opts) => run_create(git, settings, opts),
            Self::Clone(opts) => run_clone(git, opts),
            Self::Remote(action) => match action {
                RemoteAction::Handle(opts) => run_remote(git, opts.name, opts.url),
                RemoteAction::Origin(opts) => run_remote(git, Some("origin".to_owned()), opts.url),
            },
        }
    }
}

fn run_init(git: &Git, settings: &Settings, opts: InitOptions) -> Result<()> {
    if Path::new(".git").exists() {
        bail!("Directory '.git' already exists.");
    }

    let branch = opts
        .initial_branch
        .unwrap_or_else(|| settings.initial_branch.clone());
    git.run(["init", format!("--initial-branch={branch}").as_str()])?;
    config_user_and_email(git, opts.user, opts.email)?;

    if !opts.no_initial_commit {
        git.run([
            "commit",
            "--allow-empty",
            "-m",
            settings.initial_commit_message.as_str(),
        ])?;
    }

    if !Path::new(".gitignore").exists() {
        generate_gitignore(git, ".gitignore", &settings.gitignore)?;
    }

    Ok(())
}

fn run_create(git: &Git, settings: &Settings, opts: CreateOptions) -> Result<()> {
    git.mkdir(&opts.name)?;
    let previous = env::current_dir()?;
    git.chdir(&opts.name)?;
    let result = run_init(git, settings, opts.init);
    env::set_current_dir(previous)?;
    git.echo("cd -");

    result
}

fn run_clone(git: &Git, opts: CloneOptions) -> Result<()> {
    let url = resolve_repository_url(&opts.url)?;
    let mut args = vec!["clone".to_owned(), url.clone()];
    if let Some(dir) = &opts.dir {
        args.push(dir.clone());
    }
    git.run(args)?;

    let newdir = clone_directory(&url, opts.dir.as_deref());
    if Path::new(&newdir).is_dir() || git.dry_run() {
        let previous = env::current_dir()?;
        git.chdir(&newdir)?;
        let result = config_user_and_email(git, opts.user, opts.email);
        env::set_current_dir(previous)?;
        git.echo("cd -");
        result?;
    }

    Ok(())
}

/// Directory a clone lands in: an explicit one, or the final path segment
/// of the URL with any `.git` suffix dropped.
pub fn clone_directory(url: &str, dir: Option<&str>) -> String {
    if let Some(dir) = dir {
        return dir.to_owned();
    }

    let tail = url
        .trim_end_matches('/')
        .rsplit(['/', ':'])
        .next()
        .unwrap_or(url);
    tail.trim_end_matches(".git").to_owned()
}

// Configure user.name and user.email, prompting for values that are
// neither supplied nor already configured.
fn config_user_and_email(
    git: &Git,
    user: Option<String>,
    email: Option<String>,
) -> Result<()> {
    let user = match user {
        Some(user) => Some(user),
        None => {
            if git.capture(["config", "--get", "user.name"])?.is_empty() {
                git.ask("User name:")?
            } else {
                None
            }
        }
    };
    if let Some(user) = user {
        git.run(["config", "user.name", user.as_str()])?;
    }

    let email = match email {
        Some(email) => Some(email),
        None => {
            if git.capture(["config", "--get", "user.email"])?.is_empty() {
                git.ask("Email address:")?
            } else {
                None
            }
        }
    };
    if let Some(email) = email {
        git.run(["config", "user.email", email.as_str()])?;
    }

    Ok(())
}

fn generate_gitignore(git: &Git, filename: &str, items: &[String]) -> Result<()> {
    let mut redirect = "> ";
    for item in items {
        git.echo(&format!("echo {:<14} {} {}", format!("'{item}'"), redirect, filename));
        redirect = ">>";
    }
    if !git.dry_run() {
        let mut content = items.join("\n");
        content.push('\n');
        fs::write(filename, content)?;
    }

    Ok(())
}

fn run_remote(git: &Git, name: Option<String>, url: Option<String>) -> Result<()> {
    let url = match url {
        Some(url) if !url.is_empty() => Some(resolve_repository_url(&url)?),
        other => other,
    };

    let Some(name) = name else {
        git.run(["remote", "-v"])?;
        return Ok(());
    };
    let Some(url) = url else {
        git.run(["remote", "get-url", name.as_str()])?;
        return Ok(());
    };

    if url.is_empty() {
        git.run(["remote", "remove", name.as_str()])?;
    } else if git
        .capture(["remote"])?
        .split_whitespace()
        .any(|remote| remote == name)
    {
        git.run(["remote", "set-url", name.as_str(), url.as_str()])?;
    } else {
        git.run(["remote", "add", name.as_str(), url.as_str()])?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn clone_directory_prefers_the_explicit_one() {
        assert_eq!(
            clone_directory("git@github.com:user/repo.git", Some("elsewhere")),
            "elsewhere"
        );
    }

    #[test]
    fn clone_directory_derives_from_the_url() {
        assert_eq!(
            clone_directory("git@github.com:user/repo.git", None),
            "repo"
        );
        assert_eq!(
            clone_directory("https://example.org/deep/path/project.git", None),
            "project"
        );
        assert_eq!(clone_directory("https://example.org/project/", None), "project");
    }
}
