// SPDX-FileCopyrightText: 2026 Kei Watanabe <kei.wtnb.dev@gmail.com>
// SPDX-License-Identifier: MIT

//! Command echo and execution.
//!
//! Every action funnels through a [`Git`] context that owns the process-wide
//! modes (dry-run, quiet) and the prompt string used for echoback. The
//! execution model is deliberately boring: one child process at a time,
//! inheriting stdio, blocking until exit.
//!
//! # Echoback
//!
//! Before a git command runs, the exact command line is printed in dim text
//! behind the prompt, e.g. `[gi]$ git status -sb .`. This makes `gi` a
//! teaching tool as much as a shortcut tool: the user always sees the real
//! git invocation. Dry-run mode keeps the echo and skips the execution.
//!
//! # Captures
//!
//! Name-resolution heuristics ([`crate::resolve`]) need real answers from
//! git even in dry-run mode, so [`Git::capture`] always executes. Captures
//! are never echoed and, like shell backticks, ignore the exit status.

use colored::Colorize;
use inquire::{Confirm, Text};
use std::{
    env, fs,
    path::Path,
    process::{Command, Stdio},
};
use tracing::debug;

/// Execution context shared by all actions.
#[derive(Debug, Clone)]
pub struct Git {
    prompt: String,
    dry_run: bool,
    quiet: bool,
}

impl Git {
    /// Construct new execution context.
    pub fn new(prompt: impl Into<String>, dry_run: bool, quiet: bool) -> Self {
        Self {
            prompt: prompt.into(),
            dry_run,
            quiet,
        }
    }

    /// Whether dry-run mode is active.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Echo and run a git command, inheriting stdio.
    ///
    /// # Errors
    ///
    /// - Return [`RunnerError::GitCommandFailed`] on non-zero exit status.
    /// - Return [`RunnerError::Io`] if the process cannot be spawned.
    pub fn run<I, S>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_owned()).collect();
        let command = format_command(&args);
        self.echo(&command);
        if self.dry_run {
            return Ok(());
        }

        debug!("spawn: {command}");
        let status = Command::new("git").args(&args).spawn()?.wait()?;
        if !status.success() {
            return Err(RunnerError::GitCommandFailed { command });
        }

        Ok(())
    }

    /// Echo and run a git command, swallowing a failing exit status.
    ///
    /// Used where the child may legitimately die mid-stream, e.g. a pager
    /// quitting while `git log` is still writing.
    pub fn run_ok<I, S>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self.run(args) {
            Err(RunnerError::GitCommandFailed { command }) => {
                debug!("ignored failure: {command}");
                Ok(())
            }
            other => other,
        }
    }

    /// Run a git command with captured stdout, without echoing.
    ///
    /// Runs even in dry-run mode. The exit status is ignored, matching
    /// shell backtick semantics; callers inspect the output instead.
    ///
    /// # Errors
    ///
    /// - Return [`RunnerError::Io`] if the process cannot be spawned.
    pub fn capture<I, S>(&self, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_owned()).collect();
        debug!("capture: {}", format_command(&args));
        let output = Command::new("git")
            .args(&args)
            .stderr(Stdio::null())
            .output()?;

        Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_owned())
    }

    /// Probe a git command for success, without echoing.
    ///
    /// Runs even in dry-run mode; probes are read-only. Stdio is inherited
    /// so diagnostics stay visible.
    ///
    /// # Errors
    ///
    /// - Return [`RunnerError::Io`] if the process cannot be spawned.
    pub fn check<I, S>(&self, args: I) -> Result<bool>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_owned()).collect();
        debug!("check: {}", format_command(&args));
        let status = Command::new("git").args(&args).status()?;

        Ok(status.success())
    }

    /// Echo and run a full shell pipeline via `sh -c`.
    ///
    /// # Errors
    ///
    /// - Return [`RunnerError::CommandFailed`] on non-zero exit status.
    /// - Return [`RunnerError::Io`] if the process cannot be spawned.
    pub fn sh(&self, command: &str) -> Result<()> {
        self.echo(command);
        if self.dry_run {
            return Ok(());
        }

        let status = Command::new("sh").arg("-c").arg(command).status()?;
        if !status.success() {
            return Err(RunnerError::CommandFailed {
                command: command.to_owned(),
            });
        }

        Ok(())
    }

    /// Create a directory, echoed like any other command.
    pub fn mkdir(&self, dir: &str) -> Result<()> {
        self.echo(&format!("mkdir {dir}"));
        if self.dry_run {
            return Ok(());
        }

        Ok(fs::create_dir(dir)?)
    }

    /// Change the current directory, echoed like any other command.
    ///
    /// In dry-run mode the change still happens when the directory exists,
    /// so that follow-up actions echo from the right place.
    pub fn chdir(&self, dir: &str) -> Result<()> {
        self.echo(&format!("cd {dir}"));
        if self.dry_run && !Path::new(dir).is_dir() {
            return Ok(());
        }

        Ok(env::set_current_dir(dir)?)
    }

    /// Echoback of a command line behind the prompt, in dim text.
    pub fn echo(&self, line: &str) {
        if !self.quiet {
            println!("{}", format!("{}{}", self.prompt, line).dimmed());
        }
    }

    /// Informational output, suppressed by quiet mode.
    pub fn say(&self, message: &str) {
        if !self.quiet {
            println!("{message}");
        }
    }

    /// Interactive yes/no prompt.
    pub fn confirm(&self, question: &str, default_yes: bool) -> Result<bool> {
        Ok(Confirm::new(question).with_default(default_yes).prompt()?)
    }

    /// Interactive free-text prompt. Empty answer becomes `None`.
    pub fn ask(&self, question: &str) -> Result<Option<String>> {
        let answer = Text::new(question).prompt()?;
        let answer = answer.trim();
        if answer.is_empty() {
            Ok(None)
        } else {
            Ok(Some(answer.to_owned()))
        }
    }
}

/// Format a git argument vector the way it is echoed and reported.
pub fn format_command(args: &[String]) -> String {
    let mut line = String::from("git");
    for arg in args {
        line.push(' ');
        line.push_str(&quote(arg));
    }
    line
}

/// Shell-quote a single argument for echoback.
///
/// Plain arguments pass through verbatim. An `--opt=value` argument quotes
/// only the value part. Everything else is wrapped in double quotes with
/// the characters special to `sh` backslash-escaped.
pub fn quote(arg: &str) -> String {
    if !arg.is_empty() && arg.chars().all(is_plain_char) {
        return arg.to_owned();
    }

    if let Some(eq) = option_value_split(arg) {
        let (opt, value) = arg.split_at(eq + 1);
        return format!("{}{}", opt, quote(value));
    }

    let mut quoted = String::from("\"");
    for c in arg.chars() {
        if matches!(c, '$' | '!' | '`' | '\\' | '"') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

fn is_plain_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | '_' | '.' | ',' | ':' | '=' | '%' | '/' | '^' | '@')
}

// Split index of the `=` in a `--opt=value` or `-o=value` argument.
fn option_value_split(arg: &str) -> Option<usize> {
    if !arg.starts_with('-') {
        return None;
    }
    let eq = arg.find('=')?;
    let head = &arg[..eq];
    if head
        .chars()
        .all(|c| c == '-' || c == '_' || c.is_ascii_alphanumeric())
    {
        Some(eq)
    } else {
        None
    }
}

/// Command execution error types.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Child git process exited with non-zero status.
    #[error("Git command failed: {command}")]
    GitCommandFailed { command: String },

    /// Shell pipeline exited with non-zero status.
    #[error("Command failed: {command}")]
    CommandFailed { command: String },

    /// Child process could not be spawned or waited on.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Interactive prompt failed or was aborted.
    #[error(transparent)]
    Prompt(#[from] inquire::InquireError),
}

/// Friendly result alias :3
pub type Result<T, E = RunnerError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_arguments_pass_through() {
        assert_eq!(quote("status"), "status");
        assert_eq!(quote("-sb"), "-sb");
        assert_eq!(quote("--format=fuller"), "--format=fuller");
        assert_eq!(quote("origin/topic"), "origin/topic");
        assert_eq!(quote("@{-1}"), "\"@{-1}\"");
    }

    #[test]
    fn special_characters_are_quoted_and_escaped() {
        assert_eq!(quote("hello world"), "\"hello world\"");
        assert_eq!(quote("a\"b"), "\"a\\\"b\"");
        assert_eq!(quote("$HOME"), "\"\\$HOME\"");
        assert_eq!(quote("back`tick"), "\"back\\`tick\"");
    }

    #[test]
    fn option_arguments_quote_only_the_value() {
        assert_eq!(quote("-m=fix the thing"), "-m=\"fix the thing\"");
        assert_eq!(
            quote("--format=%C(auto)%h %s"),
            "--format=\"%C(auto)%h %s\""
        );
    }

    #[test]
    fn command_line_formatting() {
        let args = vec![
            "commit".to_owned(),
            "-m".to_owned(),
            "fix a bug".to_owned(),
        ];
        assert_eq!(format_command(&args), "git commit -m \"fix a bug\"");
    }
}
