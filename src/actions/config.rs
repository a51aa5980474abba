// SPDX-FileCopyrightText: 2026 Kei Watanabe <kei.wtnb.dev@gmail.com>
// SPDX-License-Identifier: MIT

//! `config:` category. These act on git's own configuration; the gi
//! startup file is handled by [`crate::config`] and `misc:startupfile`.

use crate::runner::Git;

use anyhow::Result;
use clap::{Args, Subcommand};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Subcommand)]
pub enum ConfigAction {
    /// List/get/set/delete config values.
    #[command(override_usage = "\n  gi config                        # list\
                                \n  gi config <key>                  # get\
                                \n  gi config <key> <value>          # set\
                                \n  gi config <key> \"\"               # delete\
                                \n  gi config <prefix>.              # filter by prefix\
                                \n  gi config .                      # list top level prefixes")]
    Handle(HandleOptions),

    /// Set user name and email.
    #[command(override_usage = "\n  gi config:setuser <user> <u@email>  # set user name and email\
                                \n  gi config:setuser <user@email>      # set email (contains '@')\
                                \n  gi config:setuser <user>            # set user (not contain '@')")]
    Setuser(SetuserOptions),

    /// List/get/set/delete aliases of 'git' (not of 'gi').
    #[command(override_usage = "\n  gi config:alias                  # list\
                                \n  gi config:alias <name>           # get\
                                \n  gi config:alias <name> <value>   # set\
                                \n  gi config:alias <name> \"\"        # delete")]
    Alias(AliasOptions),
}

#[derive(Debug, Clone, Args)]
pub struct ScopeOptions {
    /// Handle global config.
    #[arg(short, long)]
    pub global: bool,

    /// Handle repository local config.
    #[arg(short, long)]
    pub local: bool,
}

impl ScopeOptions {
    fn to_args(&self) -> Vec<String> {
        let mut opts = Vec::new();
        if self.global {
            opts.push("--global".to_owned());
        }
        if self.local {
            opts.push("--local".to_owned());
        }
        opts
    }
}

#[derive(Debug, Clone, Args)]
pub struct HandleOptions {
    /// Config key, or a prefix ending with '.'.
    #[arg(value_name = "key")]
    pub key: Option<String>,

    /// Value to set; "" deletes the entry.
    #[arg(value_name = "value")]
    pub value: Option<String>,

    #[command(flatten)]
    pub scope: ScopeOptions,
}

#[derive(Debug, Clone, Args)]
pub struct SetuserOptions {
    /// User name, or email when it contains '@'. '-' skips the field.
    #[arg(value_name = "user")]
    pub user: String,

    /// Email address. '-' skips the field.
    #[arg(value_name = "email")]
    pub email: Option<String>,

    #[command(flatten)]
    pub scope: ScopeOptions,
}

#[derive(Debug, Clone, Args)]
pub struct AliasOptions {
    /// Alias name.
    #[arg(value_name = "name")]
    pub name: Option<String>,

    /// Alias value; "" deletes the alias.
    #[arg(value_name = "value")]
    pub value: Option<String>,
}

impl ConfigAction {
    pub fn run(self, git: &Git) -> Result<()> {
        match self {
            Self::Handle(opts) => run_handle(git, opts),
            Self::Setuser(opts) => run_setuser(git, opts),
            Self::Alias(opts) => run_alias(git, opts),
        }
    }
}

fn run_handle(git: &Git, opts: HandleOptions) -> Result<()> {
    let scope = opts.scope.to_args();
    let Some(key) = opts.key else {
        // list
        let mut args = vec!["config".to_owned()];
        args.extend(scope);
        args.push("--list".to_owned());
        git.run(args)?;
        return Ok(());
    };

    match opts.value.as_deref() {
        None if key == "." => print_section_counts(git, &scope),
        None if key.ends_with('.') => print_prefix_filtered(git, &scope, &key),
        None => {
            // get
            let mut args = vec!["config".to_owned()];
            args.extend(scope);
            args.push(key);
            git.run(args)?;
            Ok(())
        }
        Some("") => {
            // delete
            let mut args = vec!["config".to_owned()];
            args.extend(scope);
            args.push("--unset".to_owned());
            args.push(key);
            git.run(args)?;
            Ok(())
        }
        Some(value) => {
            // set
            let mut args = vec!["config".to_owned()];
            args.extend(scope);
            args.push(key);
            args.push(value.to_owned());
            git.run(args)?;
            Ok(())
        }
    }
}

// `gi config .` prints top-level section names with entry counts.
fn print_section_counts(git: &Git, scope: &[String]) -> Result<()> {
    git.echo(
        "gi config | awk -F. 'NR>1{d[$1]++}END{for(k in d){print(k\"\\t(\"d[k]\")\")}}' | sort",
    );
    let mut capture_args = vec!["config".to_owned(), "-l".to_owned()];
    capture_args.extend(scope.iter().cloned());
    let output = git.capture(capture_args)?;

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for line in output.lines() {
        if let Some((section, rest)) = line.split_once('.') {
            if !rest.is_empty() && section.chars().all(|c| c.is_alphanumeric() || c == '_') {
                *counts.entry(format!("{section}.")).or_insert(0) += 1;
            }
        }
    }
    for (section, count) in counts {
        println!("{section}\t({count})");
    }

    Ok(())
}

// `gi config core.` prints the `git config -l` lines under that prefix.
fn print_prefix_filtered(git: &Git, scope: &[String], prefix: &str) -> Result<()> {
    let pattern = format!("^{}", prefix.replace('.', "\\."));
    let scope_str = if scope.is_empty() {
        String::new()
    } else {
        format!("{} ", scope.join(" "))
    };
    git.echo(&format!("git config -l {scope_str}| grep '{pattern}'"));

    let mut capture_args = vec!["config".to_owned(), "-l".to_owned()];
    capture_args.extend(scope.iter().cloned());
    let output = git.capture(capture_args)?;
    for line in output.lines() {
        if line.starts_with(prefix) {
            println!("{line}");
        }
    }

    Ok(())
}

fn run_setuser(git: &Git, opts: SetuserOptions) -> Result<()> {
    let scope = opts.scope.to_args();
    let (mut user, mut email) = (Some(opts.user), opts.email);
    if email.is_none() && user.as_deref().is_some_and(|u| u.contains('@')) {
        email = user.take();
    }
    if user.as_deref() == Some("-") {
        user = None;
    }
    if email.as_deref() == Some("-") {
        email = None;
    }

    if let Some(user) = user {
        let mut args = vec!["config".to_owned()];
        args.extend(scope.iter().cloned());
        args.push("user.name".to_owned());
        args.push(user);
        git.run(args)?;
    }
    if let Some(email) = email {
        let mut args = vec!["config".to_owned()];
        args.extend(scope);
        args.push("user.email".to_owned());
        args.push(email);
        git.run(args)?;
    }

    Ok(())
}

fn run_alias(git: &Git, opts: AliasOptions) -> Result<()> {
    match (opts.name, opts.value.as_deref()) {
        (Some(name), Some("")) => {
            let key = format!("alias.{name}");
            git.run(["config", "--global", "--unset", key.as_str()])?;
        }
        (Some(name), Some(value)) => {
            let key = format!("alias.{name}");
            git.run(["config", "--global", key.as_str(), value])?;
        }
        (Some(name), None) => {
            let key = format!("alias.{name}");
            git.run(["config", "--global", key.as_str()])?;
        }
        (None, _) => {
            git.echo(
                "git config --get-regexp '^alias\\.' | sed -e 's/^alias\\.//;s/ /\\t= /'",
            );
            let output = git.capture(["config", "--get-regexp", "^alias."])?;
            for line in output.lines() {
                match line
                    .strip_prefix("alias.")
                    .and_then(|rest| rest.split_once(' '))
                {
                    Some((name, value)) => println!("{name}\t= {value}"),
                    None => println!("{line}"),
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scope_options_become_git_flags() {
        let scope = ScopeOptions {
            global: true,
            local: false,
        };
        assert_eq!(scope.to_args(), vec!["--global".to_owned()]);

        let scope = ScopeOptions {
            global: false,
            local: true,
        };
        assert_eq!(scope.to_args(), vec!["--local".to_owned()]);
    }
}
